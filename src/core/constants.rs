// =============================================================================
// TICK AND TIMING
// =============================================================================

/// One damage application per tick.
pub const TICK_INTERVAL_MS: u64 = 100;
/// The boss timer runs on its own one-second cadence.
pub const TIMER_INTERVAL_MS: u64 = 1000;
/// Rare and legendary monsters flee if not killed within this window.
pub const RARE_FLEE_WINDOW_MS: i64 = 30_000;
/// Combat log ring buffer capacity (most-recent-first).
pub const COMBAT_LOG_CAPACITY: usize = 50;

// =============================================================================
// PLAYER BASE STATS
// =============================================================================

pub const BASE_ATTACK: f64 = 10.0;
pub const BASE_CRIT_CHANCE: f64 = 5.0;
/// Crit damage in percent (150 = x1.5).
pub const BASE_CRIT_DAMAGE: f64 = 150.0;
pub const ATTACK_PER_LEVEL: f64 = 2.0;
pub const SKILL_POINTS_PER_LEVEL: u32 = 1;

// XP curve: xp_to_next(level) = XP_CURVE_BASE * level^XP_CURVE_EXPONENT
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;

// =============================================================================
// MONSTERS AND FLOORS
// =============================================================================

pub const MONSTER_BASE_HP: f64 = 100.0;
pub const MONSTER_HP_GROWTH: f64 = 1.12;
pub const RARE_HP_MULTIPLIER: f64 = 3.0;
pub const LEGENDARY_HP_MULTIPLIER: f64 = 8.0;
pub const BOSS_HP_MULTIPLIER: f64 = 10.0;

/// Floors per band; bands wrap every `FLOORS_PER_CYCLE` floors.
pub const FLOORS_PER_BAND: u32 = 10;
pub const FLOORS_PER_CYCLE: u32 = 100;

pub const BASE_MONSTERS_PER_FLOOR: u32 = 10;
pub const MIN_MONSTERS_PER_FLOOR: u32 = 5;

pub const BASE_RARE_SPAWN_CHANCE: f64 = 0.02;
pub const BASE_LEGENDARY_SPAWN_CHANCE: f64 = 0.002;

/// Extra kill-counter rolls a single kill may trigger.
pub const MAX_STAGE_SKIP_ROLLS: u32 = 3;

pub const BOSS_TIME_LIMIT_SECONDS: u32 = 30;
/// Caps on relic effects that would otherwise trivialize the floor loop.
pub const MAX_MONSTER_HP_REDUCTION_PERCENT: f64 = 50.0;
pub const MAX_BOSS_SKIP_CHANCE_PERCENT: f64 = 50.0;

// Experience per kill, by monster kind
pub const XP_NORMAL_KILL: f64 = 10.0;
pub const XP_RARE_KILL: f64 = 30.0;
pub const XP_LEGENDARY_KILL: f64 = 100.0;
pub const XP_BOSS_KILL: f64 = 50.0;

pub const GOLD_JACKPOT_MULTIPLIER: f64 = 10.0;

// =============================================================================
// CRIT CONVERSION
// =============================================================================

pub const CRIT_CHANCE_CAP: f64 = 100.0;
pub const CRIT_SECOND_BAND_START: f64 = 200.0;
/// Crit damage gained per excess crit chance point in the 100-200 band.
pub const CRIT_OVERFLOW_RATE_LOW: f64 = 3.0;
/// Crit damage gained per excess crit chance point above 200.
pub const CRIT_OVERFLOW_RATE_HIGH: f64 = 5.0;

// =============================================================================
// EQUIPMENT
// =============================================================================

pub const INVENTORY_CAPACITY: usize = 100;
// Main attack = (base + per_level * item_level) * grade power * slot factor
pub const MAIN_STAT_BASE: f64 = 4.0;
pub const MAIN_STAT_PER_LEVEL: f64 = 1.0;
pub const POTENTIAL_SLOTS: usize = 3;
pub const ANCIENT_CHANCE: f64 = 0.01;
pub const BOSS_SET_ITEM_CHANCE: f64 = 0.20;

pub const UPGRADE_CHARGES: u32 = 10;
pub const MAX_AWAKENINGS: u32 = 5;
pub const AWAKEN_MAIN_STAT_BONUS: f64 = 0.10;
pub const UPGRADE_BASE_ESSENCE_COST: u64 = 5;
pub const UPGRADE_BASE_SUCCESS: f64 = 0.95;
pub const UPGRADE_SUCCESS_DECAY: f64 = 0.01;
pub const UPGRADE_MIN_SUCCESS: f64 = 0.25;

pub const MAX_ENHANCE_LEVEL: u32 = 20;
pub const ENHANCE_GOLD_BASE: u64 = 500;
/// Failing at or above this level may drop the enhancement level.
pub const ENHANCE_DOWNGRADE_THRESHOLD: u32 = 10;
pub const ENHANCE_DOWNGRADE_CHANCE: f64 = 0.5;

pub const ENHANCE_SUCCESS_RATES: [f64; 20] = [
    1.00, 0.95, 0.90, 0.85, 0.80, // +1-5
    0.75, 0.70, 0.65, 0.60, 0.55, // +6-10
    0.45, 0.40, 0.35, 0.30, 0.25, // +11-15
    0.20, 0.15, 0.10, 0.07, 0.05, // +16-20
];

/// Essence returned on disassembly, indexed by grade.
pub const ESSENCE_BY_GRADE: [u64; 6] = [1, 3, 8, 20, 50, 120];

pub const REROLL_ORB_COST: u64 = 1;
pub const LOCK_KEY_PER_LOCKED_STAT: u64 = 1;
pub const PERFECT_CUBE_COST: u64 = 1;

// =============================================================================
// DROPS
// =============================================================================

pub const EQUIPMENT_DROP_CHANCE: f64 = 0.05;
pub const BOSS_EQUIPMENT_DROP_CHANCE: f64 = 0.5;
pub const COMPANION_CARD_CHANCE: f64 = 0.005;
pub const BOSS_COMPANION_CARD_CHANCE: f64 = 0.05;

// =============================================================================
// COLLECTION
// =============================================================================

pub const RARE_CAPTURE_CHANCE: f64 = 0.10;
pub const LEGENDARY_CAPTURE_CHANCE: f64 = 0.04;
pub const BOSS_CAPTURE_CHANCE: f64 = 0.05;

pub const RARE_COLLECTION_ATTACK: f64 = 5.0;
pub const LEGENDARY_COLLECTION_ATTACK: f64 = 20.0;
pub const COLLECTION_GOLD_PER_ENTRY: f64 = 1.0;
pub const BOSS_COLLECTION_DAMAGE_PERCENT: f64 = 3.0;
pub const MAX_COLLECTION_MONSTER_REDUCTION: u32 = 5;

pub const RELEASE_DAMAGE_PERCENT: f64 = 10.0;
pub const RELEASE_GOLD_PERCENT: f64 = 5.0;
pub const RELEASE_DROP_PERCENT: f64 = 5.0;

/// Lifetime release milestones: (releases, fragment reward).
pub const RELEASE_MILESTONES: [(u32, u64); 5] =
    [(5, 10), (15, 25), (30, 50), (50, 100), (100, 200)];
pub const MILESTONE_RARE_SPAWN_BONUS: f64 = 0.005;
pub const MILESTONE_LEGENDARY_SPAWN_BONUS: f64 = 0.0005;

// =============================================================================
// RELICS
// =============================================================================

pub const RELIC_GACHA_BASE_COST: f64 = 10.0;
pub const RELIC_GACHA_COST_GROWTH: f64 = 1.5;
pub const RELIC_UPGRADE_COST_PER_LEVEL: u64 = 5;
pub const MAX_RELIC_COST_REDUCTION_PERCENT: f64 = 50.0;

// =============================================================================
// SKILLS AND COMPANIONS
// =============================================================================

pub const MAX_SKILL_LEVEL: u32 = 100;
pub const MAX_PRESTIGE_SKILL_LEVEL: u32 = 50;
pub const MAX_COMPANION_LEVEL: u32 = 10;
pub const COMPANION_ATTACK_PER_LEVEL: f64 = 0.2;

// =============================================================================
// PRESTIGE
// =============================================================================

pub const PRESTIGE_MIN_FLOOR: u32 = 50;
pub const PRESTIGE_FRAGMENT_EXPONENT: f64 = 1.5;
pub const PRESTIGE_POINT_FLOOR_STEP: u32 = 25;

// =============================================================================
// PERSISTENCE
// =============================================================================

/// "ASCENT01" little-endian.
pub const SAVE_VERSION_MAGIC: u64 = 0x3130_544E_4543_5341;
