//! Item system: types, equipment containers, generation, drops, and stat aggregation.

pub mod drops;
pub mod equipment;
pub mod generation;
pub mod sets;
pub mod stats;
pub mod types;

pub use equipment::*;
pub use generation::*;
pub use sets::*;
pub use stats::*;
pub use types::*;
