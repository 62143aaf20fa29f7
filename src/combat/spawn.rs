//! Monster spawning from the floor catalog.

use super::types::{Monster, MonsterKind};
use crate::core::balance::{floor_band, monster_hp};
use crate::core::constants::MAX_MONSTER_HP_REDUCTION_PERCENT;
use crate::floors::band_for_floor;
use rand::Rng;

/// Max HP after the relic reduction. Never below 1.
pub fn reduced_hp(original: u64, reduction_percent: f64) -> u64 {
    let reduction = reduction_percent.clamp(0.0, MAX_MONSTER_HP_REDUCTION_PERCENT);
    ((original as f64 * (1.0 - reduction / 100.0)).floor() as u64).max(1)
}

fn build(
    floor: u32,
    kind: MonsterKind,
    index: u32,
    name: &str,
    reduction_percent: f64,
    now_ms: i64,
) -> Monster {
    let original = ((monster_hp(floor) as f64) * kind.hp_multiplier()).floor() as u64;
    let max_hp = reduced_hp(original.max(1), reduction_percent);
    Monster {
        name: name.to_string(),
        floor,
        band: floor_band(floor),
        index,
        kind,
        current_hp: max_hp,
        max_hp,
        original_max_hp: original.max(1),
        spawned_at_ms: now_ms,
    }
}

/// Spawns a farming monster. Legendary is rolled first, then rare.
pub fn spawn_monster<R: Rng>(
    floor: u32,
    rare_chance: f64,
    legendary_chance: f64,
    hp_reduction_percent: f64,
    now_ms: i64,
    rng: &mut R,
) -> Monster {
    let band = band_for_floor(floor);
    if rng.gen::<f64>() < legendary_chance {
        return build(
            floor,
            MonsterKind::Legendary,
            0,
            band.legendary,
            hp_reduction_percent,
            now_ms,
        );
    }
    if rng.gen::<f64>() < rare_chance {
        let index = rng.gen_range(0..band.rares.len());
        return build(
            floor,
            MonsterKind::Rare,
            index as u32,
            band.rares[index],
            hp_reduction_percent,
            now_ms,
        );
    }
    let index = rng.gen_range(0..band.monsters.len());
    build(
        floor,
        MonsterKind::Normal,
        index as u32,
        band.monsters[index],
        hp_reduction_percent,
        now_ms,
    )
}

pub fn spawn_boss(floor: u32, hp_reduction_percent: f64, now_ms: i64) -> Monster {
    let band = band_for_floor(floor);
    build(floor, MonsterKind::Boss, 0, band.boss, hp_reduction_percent, now_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::balance::boss_hp;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_normal_spawn_uses_floor_hp() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let monster = spawn_monster(1, 0.0, 0.0, 0.0, 0, &mut rng);
        assert_eq!(monster.kind, MonsterKind::Normal);
        assert_eq!(monster.max_hp, monster_hp(1));
        assert_eq!(monster.current_hp, monster.max_hp);
        assert_eq!(monster.band, 0);
    }

    #[test]
    fn test_legendary_rolled_before_rare() {
        let mut rng = StepRng::new(0, 0);
        let monster = spawn_monster(15, 1.0, 1.0, 0.0, 0, &mut rng);
        assert_eq!(monster.kind, MonsterKind::Legendary);
        assert_eq!(monster.name, band_for_floor(15).legendary);
    }

    #[test]
    fn test_hp_reduction_keeps_original_for_gold() {
        let boss = spawn_boss(1, 30.0, 0);
        assert_eq!(boss.original_max_hp, boss_hp(1));
        assert_eq!(boss.max_hp, (boss_hp(1) as f64 * 0.7).floor() as u64);

        let capped = spawn_boss(1, 90.0, 0);
        assert_eq!(capped.max_hp, boss_hp(1) / 2);
    }

    #[test]
    fn test_reduced_hp_never_zero() {
        assert_eq!(reduced_hp(1, 50.0), 1);
        assert_eq!(reduced_hp(0, 0.0), 1);
    }
}
