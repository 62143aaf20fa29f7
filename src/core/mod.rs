//! Core simulation: constants, balance curves, state, tick and engine.

#![allow(unused_imports)]

pub mod balance;
pub mod clock;
pub mod combat_log;
pub mod command;
pub mod constants;
pub mod engine;
pub mod game_state;
pub mod scheduler;
pub mod tick;

pub use clock::{Clock, ManualClock, SystemClock};
pub use combat_log::{CombatLog, LogEntry, LogKind};
pub use command::{CommandError, CommandResult, Outcome, Reply, Resource};
pub use engine::{ItemLocation, Simulation};
pub use game_state::{GameState, Settings};
pub use tick::{game_tick, TickEvent, TickResult};
