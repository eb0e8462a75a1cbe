//! World objects that scroll past the player: obstacles, collectibles and
//! power-ups.

use crate::core::constants::*;

/// Axis-aligned rectangle in world pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Shared behavior of everything that scrolls across the world.
pub trait WorldEntity {
    /// Advance one tick at the given world speed.
    fn update(&mut self, speed: f64);
    /// Collision rectangle.
    fn bounds(&self) -> Rect;
    /// True once the entity has crossed the left edge of the screen.
    fn is_off_screen(&self) -> bool;
    /// True if the entity should leave its live list at end of tick.
    fn is_spent(&self) -> bool {
        self.is_off_screen()
    }
}

/// Drop every entity that was collected or scrolled away.
pub fn prune<E: WorldEntity>(entities: &mut Vec<E>) {
    entities.retain(|e| !e.is_spent());
}

// ── Obstacles ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RockSize {
    Small,
    Medium,
    Large,
    Crystal,
}

impl RockSize {
    /// Plain rock sizes (crystal is rolled separately).
    pub const PLAIN: [RockSize; 3] = [RockSize::Small, RockSize::Medium, RockSize::Large];

    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            Self::Small => (30.0, 35.0),
            Self::Medium => (40.0, 50.0),
            Self::Large => (55.0, 65.0),
            Self::Crystal => (35.0, 55.0),
        }
    }
}

/// Flight altitude of a dragon. `Low` skims the ground at head height and
/// can only be avoided by ducking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltitudeBand {
    Low,
    Mid,
    High,
    Sky,
}

impl AltitudeBand {
    pub const AIRBORNE: [AltitudeBand; 3] = [AltitudeBand::Mid, AltitudeBand::High, AltitudeBand::Sky];

    /// Top edge of the dragon sprite.
    pub fn y(&self) -> f64 {
        match self {
            Self::Low => GROUND_LINE - 65.0,
            Self::Mid => GROUND_LINE - 100.0,
            Self::High => GROUND_LINE - 140.0,
            Self::Sky => GROUND_LINE - 180.0,
        }
    }
}

pub const DRAGON_WIDTH: f64 = 60.0;
pub const DRAGON_HEIGHT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Rock(RockSize),
    Dragon { band: AltitudeBand, duckable: bool },
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Ticks alive, drives wing flapping in the renderer.
    pub anim_tick: u32,
    /// Set when a shield absorbed this obstacle.
    pub destroyed: bool,
}

impl Obstacle {
    /// A rock resting on the ground line.
    pub fn rock(x: f64, size: RockSize) -> Self {
        let (width, height) = size.dimensions();
        Self {
            kind: ObstacleKind::Rock(size),
            x,
            y: GROUND_LINE - height,
            width,
            height,
            anim_tick: 0,
            destroyed: false,
        }
    }

    pub fn dragon(x: f64, band: AltitudeBand) -> Self {
        Self {
            kind: ObstacleKind::Dragon {
                band,
                duckable: band == AltitudeBand::Low,
            },
            x,
            y: band.y(),
            width: DRAGON_WIDTH,
            height: DRAGON_HEIGHT,
            anim_tick: 0,
            destroyed: false,
        }
    }
}

impl WorldEntity for Obstacle {
    fn update(&mut self, speed: f64) {
        match self.kind {
            ObstacleKind::Rock(_) => self.x -= speed,
            ObstacleKind::Dragon { .. } => self.x -= speed * DRAGON_SPEED_FACTOR,
        }
        self.anim_tick = self.anim_tick.wrapping_add(1);
    }

    fn bounds(&self) -> Rect {
        match self.kind {
            ObstacleKind::Rock(_) => Rect::new(
                self.x + 5.0,
                self.y + 10.0,
                self.width - 10.0,
                self.height - 10.0,
            ),
            ObstacleKind::Dragon { .. } => Rect::new(
                self.x + 10.0,
                self.y + 10.0,
                self.width - 15.0,
                self.height - 15.0,
            ),
        }
    }

    fn is_off_screen(&self) -> bool {
        self.x < 0.0
    }

    fn is_spent(&self) -> bool {
        self.destroyed || self.is_off_screen()
    }
}

// ── Collectibles ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    Star,
    Coin,
}

impl CollectibleKind {
    pub fn value(&self) -> u64 {
        match self {
            Self::Star => STAR_VALUE,
            Self::Coin => COIN_VALUE,
        }
    }

    pub fn size(&self) -> f64 {
        match self {
            Self::Star => STAR_SIZE,
            Self::Coin => COIN_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub x: f64,
    pub y: f64,
    pub collected: bool,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            collected: false,
        }
    }

    pub fn value(&self) -> u64 {
        self.kind.value()
    }

    /// Move toward `target` for one magnet tick.
    ///
    /// Inside `range` the step is `pull_speed * (1 - d / range)` along the
    /// normalized direction, never overshooting the target. Returns the
    /// distance moved.
    pub fn pull_toward(&mut self, target: (f64, f64), range: f64, pull_speed: f64) -> f64 {
        let (cx, cy) = self.bounds().center();
        let dx = target.0 - cx;
        let dy = target.1 - cy;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance >= range || distance <= f64::EPSILON {
            return 0.0;
        }

        let step = (pull_speed * (1.0 - distance / range)).min(distance);
        self.x += dx / distance * step;
        self.y += dy / distance * step;
        step
    }
}

impl WorldEntity for Collectible {
    fn update(&mut self, speed: f64) {
        self.x -= speed;
    }

    fn bounds(&self) -> Rect {
        let size = self.kind.size();
        Rect::new(self.x, self.y, size, size)
    }

    fn is_off_screen(&self) -> bool {
        self.x + self.kind.size() < 0.0
    }

    fn is_spent(&self) -> bool {
        self.collected || self.is_off_screen()
    }
}

// ── Power-ups ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Shield,
    Magnet,
}

impl PowerUpKind {
    /// Active duration in ticks.
    pub fn duration(&self) -> u32 {
        match self {
            Self::Shield => SHIELD_DURATION_TICKS,
            Self::Magnet => MAGNET_DURATION_TICKS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub x: f64,
    pub y: f64,
    pub collected: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            collected: false,
        }
    }
}

impl WorldEntity for PowerUp {
    fn update(&mut self, speed: f64) {
        self.x -= speed;
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, POWER_UP_SIZE, POWER_UP_SIZE)
    }

    fn is_off_screen(&self) -> bool {
        self.x + POWER_UP_SIZE < 0.0
    }

    fn is_spent(&self) -> bool {
        self.collected || self.is_off_screen()
    }
}
