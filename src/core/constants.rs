// Tick and timing
pub const PHYSICS_TICK_MS: u64 = 16;
pub const MAX_FRAME_DT_MS: u64 = 100;
pub const INPUT_POLL_MS: u64 = 8;

// Logical screen (pixels, y grows downward)
pub const SCREEN_WIDTH: f64 = 900.0;
pub const SCREEN_HEIGHT: f64 = 500.0;
pub const GROUND_HEIGHT: f64 = 60.0;
pub const GROUND_LINE: f64 = SCREEN_HEIGHT - GROUND_HEIGHT;
pub const GROUND_TILE: f64 = 30.0;

// Player body
pub const PLAYER_X: f64 = 100.0;
pub const PLAYER_WIDTH: f64 = 70.0;
pub const PLAYER_HEIGHT: f64 = 60.0;
pub const PLAYER_DUCK_HEIGHT: f64 = 32.0;
pub const MAX_JUMPS: u32 = 2;

// Death animation
pub const DEATH_DURATION_TICKS: u32 = 60;
pub const DEATH_KICK_VELOCITY: f64 = -10.0;
pub const DEATH_SPIN_DEGREES: f64 = 12.0;

// Power-ups
pub const SHIELD_DURATION_TICKS: u32 = 600;
pub const MAGNET_DURATION_TICKS: u32 = 480;
pub const MAGNET_RANGE: f64 = 200.0;
pub const MAGNET_PULL_SPEED: f64 = 8.0;

// Spawning
pub const SPAWN_X: f64 = SCREEN_WIDTH + 50.0;
pub const PICKUP_SPAWN_X: f64 = SCREEN_WIDTH + 20.0;
pub const BASE_OBSTACLE_GAP: u32 = 100;
pub const OBSTACLE_GAP_SCORE_DIVISOR: u64 = 150;
pub const DRAGON_MIN_SCORE: u64 = 300;
pub const DRAGON_CHANCE_CAP: f64 = 0.35;
pub const DRAGON_CHANCE_SCORE_DIVISOR: f64 = 4000.0;
pub const DRAGON_LOW_BAND_CHANCE: f64 = 0.3;
pub const DRAGON_SPEED_FACTOR: f64 = 1.3;
pub const CRYSTAL_CHANCE: f64 = 0.2;
pub const COLLECTIBLE_CHANCE: f64 = 0.015;
pub const STAR_CHANCE: f64 = 0.3;
pub const POWER_UP_CHANCE: f64 = 0.005;
pub const POWER_UP_MIN_SCORE: u64 = 200;

// Pickup altitudes (top edge) and sizes
pub const PICKUP_BANDS: [f64; 3] = [GROUND_LINE - 50.0, GROUND_LINE - 120.0, GROUND_LINE - 190.0];
pub const STAR_SIZE: f64 = 30.0;
pub const COIN_SIZE: f64 = 24.0;
pub const POWER_UP_SIZE: f64 = 30.0;
pub const STAR_VALUE: u64 = 50;
pub const COIN_VALUE: u64 = 25;

// Screen shake
pub const SHAKE_ON_DEATH: f64 = 12.0;
pub const SHAKE_ON_SHIELD_BREAK: f64 = 5.0;
pub const SHAKE_DECAY_PER_TICK: f64 = 0.5;

// Background decoration
pub const MAX_CLOUDS: usize = 5;
pub const CLOUD_SPAWN_CHANCE: f64 = 0.008;
