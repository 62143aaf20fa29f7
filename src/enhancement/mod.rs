//! Item forge: level upgrades, awakening, enhancement, potentials, disassembly.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
