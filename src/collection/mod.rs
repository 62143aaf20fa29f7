//! Collection ledger: captured and released rare, legendary and boss monsters.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
