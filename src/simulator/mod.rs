//! Headless balance simulator.
//!
//! Runs many seeded sessions through the real engine to analyze:
//! - Floor pacing and boss timeouts
//! - Drop, capture and jackpot rates
//! - Prestige cadence and relic fragment income

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, simulate_single_run, RunStats};
