//! Keyboard mapping from crossterm events to game inputs.
//!
//! Most terminals only report key presses. The duck key needs a "held"
//! state, so `DuckLatch` tracks it from release events when the terminal
//! sends them and falls back to key-repeat timing when it does not.

use crate::core::difficulty::Difficulty;
use crate::game::GameInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// How long a single press keeps the duck held, covering the terminal's
/// initial key-repeat delay.
const DUCK_FIRST_HOLD: Duration = Duration::from_millis(500);
/// Hold extension for each auto-repeat press.
const DUCK_REPEAT_HOLD: Duration = Duration::from_millis(150);

/// Map a key event to a game input. Auto-repeat only counts for the duck key.
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    let is_duck_key = matches!(key.code, KeyCode::Down | KeyCode::Char('s'));

    match key.kind {
        KeyEventKind::Release if is_duck_key => return Some(GameInput::DuckUp),
        KeyEventKind::Release => return None,
        KeyEventKind::Repeat if !is_duck_key => return None,
        _ => {}
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') => Some(GameInput::Jump),
        KeyCode::Down | KeyCode::Char('s') => Some(GameInput::DuckDown),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameInput::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameInput::Restart),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(GameInput::Menu),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameInput::Quit),
        KeyCode::Char('1') => Some(GameInput::SelectDifficulty(Difficulty::Easy)),
        KeyCode::Char('2') => Some(GameInput::SelectDifficulty(Difficulty::Normal)),
        KeyCode::Char('3') => Some(GameInput::SelectDifficulty(Difficulty::Hard)),
        KeyCode::Enter => Some(GameInput::Start),
        _ => None,
    }
}

/// Held state of the duck key.
#[derive(Debug, Clone, Default)]
pub struct DuckLatch {
    held_until: Option<Instant>,
    /// Set once the terminal has sent a release; timing is no longer needed.
    release_events: bool,
    pressed: bool,
}

impl DuckLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a mapped input. Duck inputs drive the latch; a jump press ends
    /// a timed hold.
    pub fn observe(&mut self, input: GameInput, now: Instant) {
        match input {
            GameInput::DuckDown => self.press(now),
            GameInput::DuckUp => self.release(),
            GameInput::Jump if !self.release_events => self.held_until = None,
            _ => {}
        }
    }

    pub fn press(&mut self, now: Instant) {
        let window = if self.is_held(now) {
            DUCK_REPEAT_HOLD
        } else {
            DUCK_FIRST_HOLD
        };
        self.pressed = true;
        self.held_until = Some(now + window);
    }

    pub fn release(&mut self) {
        self.release_events = true;
        self.pressed = false;
        self.held_until = None;
    }

    pub fn is_held(&self, now: Instant) -> bool {
        if self.release_events {
            return self.pressed;
        }
        self.held_until.is_some_and(|until| now < until)
    }
}
