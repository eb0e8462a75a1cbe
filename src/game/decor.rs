//! Background clouds. They drift on every screen, paused or not.

use crate::core::constants::{CLOUD_SPAWN_CHANCE, MAX_CLOUDS, SCREEN_WIDTH};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudSize {
    Small,
    Medium,
    Large,
}

impl CloudSize {
    pub fn width(&self) -> f64 {
        match self {
            Self::Small => 80.0,
            Self::Medium => 105.0,
            Self::Large => 145.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub size: CloudSize,
}

impl Cloud {
    fn random<R: Rng>(x: f64, rng: &mut R) -> Self {
        let size = match rng.gen_range(0..3) {
            0 => CloudSize::Small,
            1 => CloudSize::Medium,
            _ => CloudSize::Large,
        };
        Self {
            x,
            y: rng.gen_range(40.0..150.0),
            speed: rng.gen_range(0.3..1.0),
            size,
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.size.width() < 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Backdrop {
    pub clouds: Vec<Cloud>,
}

impl Backdrop {
    /// A sky with a few clouds already on screen.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let clouds = (0..4)
            .map(|_| {
                let x = rng.gen_range(100.0..800.0);
                Cloud::random(x, rng)
            })
            .collect();
        Self { clouds }
    }

    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed;
        }
        self.clouds.retain(|c| !c.is_off_screen());

        if self.clouds.len() < MAX_CLOUDS && rng.gen::<f64>() < CLOUD_SPAWN_CHANCE {
            let x = rng.gen_range(SCREEN_WIDTH..SCREEN_WIDTH + 300.0);
            self.clouds.push(Cloud::random(x, rng));
        }
    }
}
