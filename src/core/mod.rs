//! Tuning constants and difficulty profiles.

pub mod constants;
pub mod difficulty;

pub use constants::*;
pub use difficulty::{Difficulty, DifficultyProfile};
