//! Balance curves shared by the engine and the simulator.
//!
//! Pure functions of their inputs. Constants live in `constants.rs`;
//! anything that needs a formula lives here.

use super::constants::*;

/// Experience needed to advance from `level` to `level + 1`.
pub fn xp_to_next_level(level: u32) -> u64 {
    (XP_CURVE_BASE * f64::powf(level.max(1) as f64, XP_CURVE_EXPONENT)) as u64
}

/// Max HP of a normal monster on `floor` (floors are 1-based).
pub fn monster_hp(floor: u32) -> u64 {
    let exponent = floor.max(1) - 1;
    (MONSTER_BASE_HP * MONSTER_HP_GROWTH.powi(exponent as i32)).floor() as u64
}

/// Boss HP is always a fixed multiple of the floor's normal monster.
pub fn boss_hp(floor: u32) -> u64 {
    (monster_hp(floor) as f64 * BOSS_HP_MULTIPLIER).floor() as u64
}

/// Monsters to clear before the boss, before any reduction bonuses.
pub fn base_monsters_required(floor: u32) -> u32 {
    BASE_MONSTERS_PER_FLOOR + floor.max(1).saturating_sub(1) / FLOORS_PER_BAND
}

/// Monsters to clear after reductions; never below `MIN_MONSTERS_PER_FLOOR`.
pub fn monsters_required(floor: u32, reduction: u32) -> u32 {
    base_monsters_required(floor)
        .saturating_sub(reduction)
        .max(MIN_MONSTERS_PER_FLOOR)
}

/// Floor band (0-9) used by the catalogs and the collection ledger.
/// Floors wrap every hundred, so floor 101 shares a band with floor 1.
pub fn floor_band(floor: u32) -> u32 {
    let stage = (floor.max(1) - 1) % FLOORS_PER_CYCLE;
    stage / FLOORS_PER_BAND
}

/// Gold cost of enhancing from `level` to `level + 1`.
pub fn enhance_gold_cost(level: u32) -> u64 {
    let next = level as u64 + 1;
    ENHANCE_GOLD_BASE * next * next
}

/// Success probability of enhancing from `level` to `level + 1`.
pub fn enhance_success_rate(level: u32) -> f64 {
    ENHANCE_SUCCESS_RATES
        .get(level as usize)
        .copied()
        .unwrap_or(0.0)
}

/// Stat multiplier granted by an enhancement level.
pub fn enhancement_multiplier(level: u32) -> f64 {
    let level = level.min(MAX_ENHANCE_LEVEL) as f64;
    let above = (level - ENHANCE_DOWNGRADE_THRESHOLD as f64).max(0.0);
    1.0 + 0.05 * level + 0.05 * above
}

/// Essence cost of an item-level upgrade attempt.
pub fn upgrade_essence_cost(item_level: u32) -> u64 {
    UPGRADE_BASE_ESSENCE_COST + item_level as u64
}

/// Success probability of an item-level upgrade; decays with level.
pub fn upgrade_success_rate(item_level: u32) -> f64 {
    (UPGRADE_BASE_SUCCESS - UPGRADE_SUCCESS_DECAY * item_level as f64).max(UPGRADE_MIN_SUCCESS)
}

/// Awaken stones needed for the next awakening.
pub fn awaken_cost(awakenings: u32) -> u64 {
    awakenings as u64 + 1
}

/// Relic fragments needed for the next gacha pull.
pub fn gacha_cost(gacha_count: u32) -> u64 {
    (RELIC_GACHA_BASE_COST * RELIC_GACHA_COST_GROWTH.powi(gacha_count as i32)).floor() as u64
}

/// Relic fragments to level a relic, after the capped cost reduction.
pub fn relic_upgrade_cost(level: u32, reduction_percent: f64) -> u64 {
    let base = RELIC_UPGRADE_COST_PER_LEVEL * (level as u64 + 1);
    let reduction = reduction_percent.clamp(0.0, MAX_RELIC_COST_REDUCTION_PERCENT);
    ((base as f64 * (1.0 - reduction / 100.0)).floor() as u64).max(1)
}

/// Relic fragments awarded for prestiging at `floor`, before relic bonuses.
pub fn prestige_fragments(floor: u32) -> u64 {
    (floor as f64 / 10.0).powf(PRESTIGE_FRAGMENT_EXPONENT).floor() as u64
}

/// Prestige points awarded for prestiging at `floor`.
pub fn prestige_points(floor: u32) -> u32 {
    1 + floor.saturating_sub(PRESTIGE_MIN_FLOOR) / PRESTIGE_POINT_FLOOR_STEP
}
