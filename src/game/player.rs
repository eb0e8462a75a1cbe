//! The unicorn: jump/double-jump, duck, power-up timers and the death
//! animation.

use super::entities::{PowerUpKind, Rect};
use crate::core::constants::*;
use crate::core::difficulty::DifficultyProfile;

/// Outcome of a jump press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Left the ground.
    Jumped,
    /// Second jump while airborne.
    DoubleJumped,
    /// Pressed while ducking: the player stood up instead.
    StoodUp,
    /// Out of jump charges, or dying.
    Rejected,
}

/// Coarse state the unicorn sprite is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Running,
    Airborne(u32),
    Ducking,
    Dying,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f64,
    /// Top of the standing sprite. `ground_y()` when on the ground.
    pub y: f64,
    /// Rows per tick, negative = upward.
    pub velocity_y: f64,
    pub is_jumping: bool,
    pub is_ducking: bool,
    pub jump_count: u32,

    pub shield_active: bool,
    pub shield_remaining: u32,
    pub magnet_active: bool,
    pub magnet_remaining: u32,

    pub is_dying: bool,
    pub death_timer: u32,
    /// Spin angle of the death animation, degrees.
    pub rotation: f64,

    /// Leg animation frame (0-3), advances while running.
    pub run_anim_frame: u32,
    run_anim_timer: u32,

    gravity: f64,
    jump_strength: f64,
}

impl Player {
    pub fn new(profile: &DifficultyProfile) -> Self {
        Self {
            x: PLAYER_X,
            y: Self::ground_y(),
            velocity_y: 0.0,
            is_jumping: false,
            is_ducking: false,
            jump_count: 0,

            shield_active: false,
            shield_remaining: 0,
            magnet_active: false,
            magnet_remaining: 0,

            is_dying: false,
            death_timer: 0,
            rotation: 0.0,

            run_anim_frame: 0,
            run_anim_timer: 0,

            gravity: profile.gravity,
            jump_strength: profile.jump_strength,
        }
    }

    /// Standing `y` when the hooves touch the ground line.
    pub fn ground_y() -> f64 {
        GROUND_LINE - PLAYER_HEIGHT
    }

    pub fn is_on_ground(&self) -> bool {
        self.y >= Self::ground_y()
    }

    pub fn state(&self) -> PlayerState {
        if self.is_dying {
            PlayerState::Dying
        } else if self.is_jumping {
            PlayerState::Airborne(self.jump_count)
        } else if self.is_ducking {
            PlayerState::Ducking
        } else {
            PlayerState::Running
        }
    }

    /// Handle a jump press.
    pub fn jump(&mut self) -> JumpOutcome {
        if self.is_dying {
            return JumpOutcome::Rejected;
        }
        if self.is_ducking {
            self.stand_up();
            return JumpOutcome::StoodUp;
        }
        if self.jump_count >= MAX_JUMPS {
            return JumpOutcome::Rejected;
        }

        self.velocity_y = self.jump_strength;
        self.is_jumping = true;
        self.jump_count += 1;
        if self.jump_count == 1 {
            JumpOutcome::Jumped
        } else {
            JumpOutcome::DoubleJumped
        }
    }

    /// Start ducking. Only possible while running on the ground.
    /// Returns true if the player went from standing to ducking.
    pub fn duck(&mut self) -> bool {
        if self.is_dying || self.is_jumping || self.is_ducking {
            return false;
        }
        self.is_ducking = true;
        true
    }

    pub fn stand_up(&mut self) {
        self.is_ducking = false;
    }

    /// One physics tick.
    pub fn update(&mut self) {
        if self.is_dying {
            self.update_dying();
            return;
        }

        self.velocity_y += self.gravity;
        self.y += self.velocity_y;

        if self.y >= Self::ground_y() {
            self.y = Self::ground_y();
            self.velocity_y = 0.0;
            self.is_jumping = false;
            self.jump_count = 0;
        }

        if !self.is_jumping {
            self.run_anim_timer += 1;
            if self.run_anim_timer > 4 {
                self.run_anim_timer = 0;
                self.run_anim_frame = (self.run_anim_frame + 1) % 4;
            }
        }

        self.tick_power_ups();
    }

    fn tick_power_ups(&mut self) {
        if self.shield_active {
            self.shield_remaining = self.shield_remaining.saturating_sub(1);
            if self.shield_remaining == 0 {
                self.shield_active = false;
            }
        }
        if self.magnet_active {
            self.magnet_remaining = self.magnet_remaining.saturating_sub(1);
            if self.magnet_remaining == 0 {
                self.magnet_active = false;
            }
        }
    }

    fn update_dying(&mut self) {
        if self.death_timer == 0 {
            return;
        }
        self.death_timer -= 1;
        self.velocity_y += self.gravity;
        self.y += self.velocity_y;
        self.rotation = (self.rotation + DEATH_SPIN_DEGREES) % 360.0;
    }

    /// Enter the death animation. Power-ups are dropped.
    pub fn start_dying(&mut self) {
        if self.is_dying {
            return;
        }
        self.is_dying = true;
        self.is_ducking = false;
        self.death_timer = DEATH_DURATION_TICKS;
        self.velocity_y = DEATH_KICK_VELOCITY;
        self.rotation = 0.0;
        self.shield_active = false;
        self.shield_remaining = 0;
        self.magnet_active = false;
        self.magnet_remaining = 0;
    }

    /// True once the death animation has played out.
    pub fn death_finished(&self) -> bool {
        self.is_dying && self.death_timer == 0
    }

    pub fn activate(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Shield => {
                self.shield_active = true;
                self.shield_remaining = kind.duration();
            }
            PowerUpKind::Magnet => {
                self.magnet_active = true;
                self.magnet_remaining = kind.duration();
            }
        }
    }

    /// Spend the shield on a collision. Returns false if there was none.
    pub fn consume_shield(&mut self) -> bool {
        if !self.shield_active {
            return false;
        }
        self.shield_active = false;
        self.shield_remaining = 0;
        true
    }

    /// Collision rectangle, shorter while ducking.
    pub fn hitbox(&self) -> Rect {
        if self.is_ducking {
            Rect::new(
                self.x + 10.0,
                self.y + (PLAYER_HEIGHT - PLAYER_DUCK_HEIGHT) + 5.0,
                PLAYER_WIDTH - 20.0,
                PLAYER_DUCK_HEIGHT - 10.0,
            )
        } else {
            Rect::new(
                self.x + 15.0,
                self.y + 10.0,
                PLAYER_WIDTH - 25.0,
                PLAYER_HEIGHT - 15.0,
            )
        }
    }

    /// Magnet target: center of the sprite.
    pub fn center(&self) -> (f64, f64) {
        (self.x + PLAYER_WIDTH / 2.0, self.y + PLAYER_HEIGHT / 2.0)
    }
}
