//! Relics: permanent, prestige-surviving bonuses bought with relic fragments.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
