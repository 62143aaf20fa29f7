//! The player character: stats, skills, prestige and persistence.

#![allow(unused_imports)]

pub mod player;
pub mod prestige;
pub mod save;
pub mod skills;

pub use player::*;
pub use prestige::*;
pub use save::*;
pub use skills::*;
