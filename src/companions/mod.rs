//! Companions: card-unlocked helpers that fight alongside the player.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
