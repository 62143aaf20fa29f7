//! The per-hit damage pipeline.
//!
//! Multipliers are applied in a fixed order; reordering them changes results
//! because the flat companion and collection terms enter midway.

use super::bonuses::CombatBonuses;
use super::types::Monster;
use crate::companions::CompanionSpecial;
use crate::core::constants::*;
use crate::items::StatId;
use crate::relics::RelicEffect;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    pub damage: u64,
    pub was_crit: bool,
}

/// Crit chance after capping, and crit damage after overflow conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CritProfile {
    pub chance: f64,
    /// Percent; 150 means x1.5.
    pub damage: f64,
}

/// Converts crit chance above 100 into crit damage. The 100-200 band is
/// consumed first at the low rate, anything beyond at the high rate.
pub fn resolve_crit(raw_chance: f64, base_crit_damage: f64) -> CritProfile {
    let chance = raw_chance.clamp(0.0, CRIT_CHANCE_CAP);
    let low_band = (raw_chance.min(CRIT_SECOND_BAND_START) - CRIT_CHANCE_CAP).max(0.0);
    let high_band = (raw_chance - CRIT_SECOND_BAND_START).max(0.0);
    CritProfile {
        chance,
        damage: base_crit_damage
            + low_band * CRIT_OVERFLOW_RATE_LOW
            + high_band * CRIT_OVERFLOW_RATE_HIGH,
    }
}

/// Active companion attack including the Kinship boost.
pub fn boosted_companion_attack(bonuses: &CombatBonuses) -> f64 {
    bonuses.companion.attack * (1.0 + bonuses.skills.companion_boost_percent / 100.0)
}

/// Damage before specials and crit.
pub fn base_damage(bonuses: &CombatBonuses, monster: &Monster) -> f64 {
    let mut damage = bonuses.base.attack + bonuses.equipment.flat_attack();

    let skill_percent = bonuses.skills.attack_percent + bonuses.skills.prestige_attack_percent;
    damage *= 1.0 + skill_percent / 100.0;
    damage *= 1.0 + bonuses.equipment.get(StatId::AttackPercent) / 100.0;

    damage += boosted_companion_attack(bonuses) + bonuses.collection.flat_attack;

    damage *= 1.0 + bonuses.collection.release_damage_percent(monster.band) / 100.0;
    damage *= 1.0 + bonuses.collection.boss_damage_percent / 100.0;

    let relics = &bonuses.relics;
    damage *= 1.0 + relics.get(RelicEffect::DamagePerRelic) * relics.relic_count() as f64 / 100.0;
    let amplifier = 1.0 + relics.get(RelicEffect::Amplifier) / 100.0;
    damage *= 1.0 + relics.get(RelicEffect::DamagePercent) * amplifier / 100.0;

    if monster.is_boss() {
        damage *= 1.0 + relics.get(RelicEffect::BossDamage) / 100.0;
        damage *= 1.0 + bonuses.equipment.get(StatId::BossDamage) / 100.0;
    }

    damage
}

/// Resolves one hit against `monster`.
///
/// RNG draws happen in a fixed order: the special proc (if any), then the
/// crit roll, which is always drawn even at 0% or 100% chance.
pub fn calculate_attack<R: Rng>(
    bonuses: &CombatBonuses,
    monster: &Monster,
    rng: &mut R,
) -> AttackResult {
    let mut damage = base_damage(bonuses, monster);

    match bonuses.companion.special {
        Some(CompanionSpecial::MaxHpProc { chance, percent }) => {
            if rng.gen::<f64>() < chance {
                damage += monster.max_hp as f64 * percent / 100.0;
            }
        }
        Some(CompanionSpecial::DamageOverTime { percent }) => {
            damage += boosted_companion_attack(bonuses) * percent / 100.0;
        }
        None => {}
    }

    let crit = resolve_crit(bonuses.raw_crit_chance(), bonuses.base_crit_damage());
    let roll = rng.gen::<f64>() * 100.0;
    let was_crit = roll < crit.chance;
    if was_crit {
        damage *= crit.damage / 100.0;
    }

    AttackResult {
        damage: damage.max(0.0).floor() as u64,
        was_crit,
    }
}
