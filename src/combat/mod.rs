//! Monsters, the per-hit damage pipeline and kill rewards.

#![allow(unused_imports)]

pub mod bonuses;
pub mod damage;
pub mod rewards;
pub mod spawn;
pub mod types;

pub use bonuses::*;
pub use damage::*;
pub use rewards::*;
pub use spawn::*;
pub use types::*;
