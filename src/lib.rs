//! Ascent - Incremental Floor-Climbing Combat Simulator
//!
//! This library exposes the simulation engine for hosts, tests and the
//! headless balance simulator.

pub mod character;
pub mod collection;
pub mod combat;
pub mod companions;
pub mod core;
pub mod enhancement;
pub mod floors;
pub mod items;
pub mod relics;
pub mod simulator;
pub mod wallet;

pub use crate::core::{GameState, Simulation, TickEvent};
