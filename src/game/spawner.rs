//! Spawn policy for obstacles, collectibles and power-ups.

use super::entities::{
    AltitudeBand, Collectible, CollectibleKind, Obstacle, PowerUp, PowerUpKind, RockSize,
};
use crate::core::constants::*;
use crate::core::difficulty::DifficultyProfile;
use rand::Rng;

/// Everything introduced into the world on one tick.
#[derive(Debug, Default)]
pub struct SpawnBatch {
    pub obstacle: Option<Obstacle>,
    pub collectible: Option<Collectible>,
    pub power_up: Option<PowerUp>,
}

/// Ticks between obstacles: shrinks with score down to the profile floor.
pub fn obstacle_gap(profile: &DifficultyProfile, score: u64) -> u32 {
    let ramp = (BASE_OBSTACLE_GAP as u64).saturating_sub(score / OBSTACLE_GAP_SCORE_DIVISOR);
    (ramp as u32).max(profile.min_obstacle_gap)
}

/// Probability that a spawned obstacle is a dragon, ignoring the score gate.
pub fn dragon_chance(score: u64) -> f64 {
    (score as f64 / DRAGON_CHANCE_SCORE_DIVISOR).min(DRAGON_CHANCE_CAP)
}

#[derive(Debug, Clone)]
pub struct Spawner {
    profile: DifficultyProfile,
    /// Ticks since the last obstacle.
    pub obstacle_timer: u32,
}

impl Spawner {
    pub fn new(profile: DifficultyProfile) -> Self {
        Self {
            profile,
            obstacle_timer: 0,
        }
    }

    /// Run the three independent spawn rolls for one tick.
    pub fn tick<R: Rng>(&mut self, score: u64, rng: &mut R) -> SpawnBatch {
        let mut batch = SpawnBatch::default();

        self.obstacle_timer += 1;
        if self.obstacle_timer > obstacle_gap(&self.profile, score) {
            self.obstacle_timer = 0;
            batch.obstacle = Some(roll_obstacle(score, rng));
        }

        if rng.gen::<f64>() < COLLECTIBLE_CHANCE {
            batch.collectible = Some(roll_collectible(rng));
        }

        if score > POWER_UP_MIN_SCORE && rng.gen::<f64>() < POWER_UP_CHANCE {
            batch.power_up = Some(roll_power_up(rng));
        }

        batch
    }
}

/// Pick the obstacle kind for a spawn at `score`.
pub fn roll_obstacle<R: Rng>(score: u64, rng: &mut R) -> Obstacle {
    if score > DRAGON_MIN_SCORE && rng.gen::<f64>() < dragon_chance(score) {
        let band = if rng.gen::<f64>() < DRAGON_LOW_BAND_CHANCE {
            AltitudeBand::Low
        } else {
            AltitudeBand::AIRBORNE[rng.gen_range(0..AltitudeBand::AIRBORNE.len())]
        };
        Obstacle::dragon(SPAWN_X, band)
    } else if rng.gen::<f64>() < CRYSTAL_CHANCE {
        Obstacle::rock(SPAWN_X, RockSize::Crystal)
    } else {
        let size = RockSize::PLAIN[rng.gen_range(0..RockSize::PLAIN.len())];
        Obstacle::rock(SPAWN_X, size)
    }
}

fn pickup_band<R: Rng>(rng: &mut R) -> f64 {
    PICKUP_BANDS[rng.gen_range(0..PICKUP_BANDS.len())]
}

fn roll_collectible<R: Rng>(rng: &mut R) -> Collectible {
    let kind = if rng.gen::<f64>() < STAR_CHANCE {
        CollectibleKind::Star
    } else {
        CollectibleKind::Coin
    };
    Collectible::new(kind, PICKUP_SPAWN_X, pickup_band(rng))
}

fn roll_power_up<R: Rng>(rng: &mut R) -> PowerUp {
    let kind = if rng.gen::<bool>() {
        PowerUpKind::Shield
    } else {
        PowerUpKind::Magnet
    };
    PowerUp::new(kind, PICKUP_SPAWN_X, pickup_band(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::difficulty::Difficulty;
    use crate::game::entities::ObstacleKind;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Every `gen::<f64>()` returns 0.0: all probability rolls succeed.
    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Every `gen::<f64>()` returns 0.5, above every spawn probability,
    /// while `gen_range` still accepts the sample.
    fn never() -> StepRng {
        StepRng::new(1 << 63, 0)
    }

    #[test]
    fn test_obstacle_gap_ramps_to_floor() {
        let normal = Difficulty::Normal.profile();
        assert_eq!(obstacle_gap(&normal, 0), 100);
        assert_eq!(obstacle_gap(&normal, 1500), 90);
        assert_eq!(obstacle_gap(&normal, 4499), 71);
        assert_eq!(obstacle_gap(&normal, 1_000_000), 70);

        let easy = Difficulty::Easy.profile();
        assert_eq!(obstacle_gap(&easy, 0), 100);
        assert_eq!(obstacle_gap(&easy, 3000), 90);
    }

    #[test]
    fn test_dragon_chance_clamped_at_high_score() {
        assert!((dragon_chance(5000) - 0.35).abs() < f64::EPSILON);
        assert!((dragon_chance(400) - 0.1).abs() < f64::EPSILON);
        assert!(dragon_chance(0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_obstacle_spawns_after_gap() {
        let profile = Difficulty::Hard.profile();
        let mut spawner = Spawner::new(profile);
        let mut rng = never();
        let gap = obstacle_gap(&profile, 0);

        for _ in 0..gap {
            assert!(spawner.tick(0, &mut rng).obstacle.is_none());
        }
        let batch = spawner.tick(0, &mut rng);
        assert!(batch.obstacle.is_some());
        assert_eq!(spawner.obstacle_timer, 0);
    }

    #[test]
    fn test_no_dragons_below_score_gate() {
        let mut rng = always();
        let obstacle = roll_obstacle(DRAGON_MIN_SCORE, &mut rng);
        // Dragon roll skipped; the crystal roll succeeds instead.
        assert_eq!(obstacle.kind, ObstacleKind::Rock(RockSize::Crystal));
    }

    #[test]
    fn test_dragon_spawns_above_score_gate() {
        let mut rng = always();
        let obstacle = roll_obstacle(5000, &mut rng);
        assert!(matches!(obstacle.kind, ObstacleKind::Dragon { .. }));
        assert!((obstacle.x - SPAWN_X).abs() < f64::EPSILON);
    }

    #[test]
    fn test_plain_rock_when_every_roll_fails() {
        let mut rng = never();
        let obstacle = roll_obstacle(5000, &mut rng);
        assert!(matches!(
            obstacle.kind,
            ObstacleKind::Rock(RockSize::Small | RockSize::Medium | RockSize::Large)
        ));
    }

    #[test]
    fn test_collectible_and_power_up_rolls_are_independent() {
        let mut spawner = Spawner::new(Difficulty::Normal.profile());
        let batch = spawner.tick(1000, &mut always());
        assert!(batch.collectible.is_some());
        assert!(batch.power_up.is_some());
    }

    #[test]
    fn test_power_ups_gated_by_score() {
        let mut spawner = Spawner::new(Difficulty::Normal.profile());
        let batch = spawner.tick(POWER_UP_MIN_SCORE, &mut always());
        assert!(batch.collectible.is_some());
        assert!(batch.power_up.is_none());
    }

    #[test]
    fn test_pickups_spawn_in_bands() {
        let mut spawner = Spawner::new(Difficulty::Normal.profile());
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = 0;
        for _ in 0..5000 {
            if let Some(c) = spawner.tick(1000, &mut rng).collectible {
                assert!(PICKUP_BANDS.contains(&c.y));
                assert!(!c.collected);
                seen += 1;
            }
        }
        assert!(seen > 0);
    }

    #[test]
    fn test_low_band_dragon_share() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut dragons = 0;
        let mut low = 0;
        for _ in 0..20_000 {
            let o = roll_obstacle(10_000, &mut rng);
            if let ObstacleKind::Dragon { band, duckable } = o.kind {
                dragons += 1;
                if band == AltitudeBand::Low {
                    assert!(duckable);
                    low += 1;
                }
            }
        }
        let dragon_rate = dragons as f64 / 20_000.0;
        let low_rate = low as f64 / dragons as f64;
        assert!((dragon_rate - 0.35).abs() < 0.03, "dragon rate {}", dragon_rate);
        assert!((low_rate - 0.3).abs() < 0.04, "low band rate {}", low_rate);
    }
}
