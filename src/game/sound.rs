//! Sound events and the pluggable audio backend.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    Jump,
    DoubleJump,
    Coin,
    Star,
    PowerUp,
    Duck,
    Hit,
}

impl SoundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::DoubleJump => "double_jump",
            Self::Coin => "coin",
            Self::Star => "star",
            Self::PowerUp => "power_up",
            Self::Duck => "duck",
            Self::Hit => "hit",
        }
    }
}

/// Fire-and-forget audio backend.
pub trait SoundPlayer {
    fn play(&mut self, event: SoundEvent);
}

/// Discards everything (`--mute`).
#[derive(Debug, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _event: SoundEvent) {}
}

/// Rings the terminal bell for hits and power-ups.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl SoundPlayer for TerminalBell {
    fn play(&mut self, event: SoundEvent) {
        tracing::trace!(sound = event.name(), "play");
        if matches!(event, SoundEvent::Hit | SoundEvent::PowerUp) {
            let mut out = std::io::stdout();
            if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
                tracing::trace!(error = %e, "bell write failed");
            }
        }
    }
}

/// Records every event, for tests and replays.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<SoundEvent>,
}

impl SoundPlayer for Recorder {
    fn play(&mut self, event: SoundEvent) {
        self.events.push(event);
    }
}

/// Lets a caller keep a handle on a player it hands to the game.
impl<S: SoundPlayer> SoundPlayer for Rc<RefCell<S>> {
    fn play(&mut self, event: SoundEvent) {
        self.borrow_mut().play(event);
    }
}
