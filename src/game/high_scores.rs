//! Best score per difficulty and where it is kept.

use crate::core::difficulty::Difficulty;
use crate::utils::persistence::{data_path, load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

pub const HIGH_SCORE_FILE: &str = "high_scores.json";

/// Difficulty → best score. Serialized as `{"EASY": n, "NORMAL": n, "HARD": n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores(BTreeMap<Difficulty, u64>);

impl Default for HighScores {
    fn default() -> Self {
        Self(Difficulty::ALL.iter().map(|d| (*d, 0)).collect())
    }
}

impl HighScores {
    pub fn get(&self, difficulty: Difficulty) -> u64 {
        self.0.get(&difficulty).copied().unwrap_or(0)
    }

    pub fn set(&mut self, difficulty: Difficulty, score: u64) {
        self.0.insert(difficulty, score);
    }

    /// Record `score` if it beats the stored best. Returns true on a new record.
    pub fn submit(&mut self, difficulty: Difficulty, score: u64) -> bool {
        if score > self.get(difficulty) {
            self.set(difficulty, score);
            true
        } else {
            false
        }
    }

    /// Fill in any difficulty missing from a partially written file.
    fn normalized(mut self) -> Self {
        for d in Difficulty::ALL {
            self.0.entry(d).or_insert(0);
        }
        self
    }
}

/// Where high scores live between sessions.
pub trait HighScoreStore {
    /// Never fails: absent or corrupt data loads as all zeros.
    fn load(&self) -> HighScores;
    fn save(&mut self, scores: &HighScores) -> io::Result<()>;
}

/// JSON file, by default ~/.unicorn_dash/high_scores.json.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> io::Result<Self> {
        Ok(Self::new(data_path(HIGH_SCORE_FILE)?))
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> HighScores {
        load_json_or_default::<HighScores>(&self.path).normalized()
    }

    fn save(&mut self, scores: &HighScores) -> io::Result<()> {
        save_json(&self.path, scores)
    }
}

/// Keeps scores in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub scores: HighScores,
    pub saves: u32,
    /// Make every save fail, to exercise the error path.
    pub fail_saves: bool,
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> HighScores {
        self.scores.clone()
    }

    fn save(&mut self, scores: &HighScores) -> io::Result<()> {
        if self.fail_saves {
            return Err(io::Error::other("save disabled"));
        }
        self.scores = scores.clone();
        self.saves += 1;
        Ok(())
    }
}

impl<S: HighScoreStore> HighScoreStore for Rc<RefCell<S>> {
    fn load(&self) -> HighScores {
        self.borrow().load()
    }

    fn save(&mut self, scores: &HighScores) -> io::Result<()> {
        self.borrow_mut().save(scores)
    }
}
