//! Unicorn Dash game world and controller.

pub mod collision;
pub mod decor;
pub mod entities;
pub mod high_scores;
pub mod logic;
pub mod player;
pub mod session;
pub mod sound;
pub mod spawner;

pub use high_scores::{HighScoreStore, HighScores, JsonFileStore, MemoryStore};
pub use logic::{hold_duck, process_input, step, tick, GameInput, StepReport};
pub use session::{Game, GameScreen};
pub use sound::{Recorder, Silent, SoundEvent, SoundPlayer, TerminalBell};
