//! Floor bands, monster catalog, and the floor/boss state machine.

pub mod data;
pub mod progression;

pub use data::*;
pub use progression::*;
