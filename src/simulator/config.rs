//! Simulation configuration.

use crate::core::constants::PRESTIGE_MIN_FLOOR;

/// Configuration for a headless simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent sessions to simulate
    pub num_runs: u32,

    /// Base seed; run `i` uses `seed + i` (None = random)
    pub seed: Option<u64>,

    /// Simulated wall time per run, in seconds
    pub sim_seconds: u64,

    /// Prestige as soon as the run reaches `prestige_floor`
    pub auto_prestige: bool,

    /// Floor at which an auto-prestige happens (never below the prestige minimum)
    pub prestige_floor: u32,

    /// Equip drops that beat the item in their slot
    pub auto_equip: bool,

    /// Spend skill and prestige points, and pull relics, as they come in
    pub spend_points: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            sim_seconds: 3_600,
            auto_prestige: false,
            prestige_floor: PRESTIGE_MIN_FLOOR,
            auto_equip: true,
            spend_points: true,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// A handful of short runs for a quick balance check
    pub fn quick_test() -> Self {
        Self {
            num_runs: 20,
            sim_seconds: 600,
            ..Default::default()
        }
    }

    /// Long runs that prestige whenever allowed
    pub fn prestige_test() -> Self {
        Self {
            num_runs: 20,
            sim_seconds: 8 * 3_600,
            auto_prestige: true,
            ..Default::default()
        }
    }

    /// Idle baseline: nothing is equipped or spent
    pub fn idle_baseline(num_runs: u32) -> Self {
        Self {
            num_runs,
            auto_equip: false,
            spend_points: false,
            ..Default::default()
        }
    }

    /// The floor an auto-prestige fires at.
    pub fn effective_prestige_floor(&self) -> u32 {
        self.prestige_floor.max(PRESTIGE_MIN_FLOOR)
    }
}
