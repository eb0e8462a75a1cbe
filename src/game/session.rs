//! Game session state: the current screen, the world and the collaborators
//! (high-score store, sound player) the controller talks to.

use super::decor::Backdrop;
use super::entities::{Collectible, Obstacle, PowerUp};
use super::high_scores::{HighScoreStore, HighScores};
use super::player::Player;
use super::sound::{SoundEvent, SoundPlayer};
use super::spawner::Spawner;
use crate::core::constants::{MAGNET_DURATION_TICKS, SHIELD_DURATION_TICKS};
use crate::core::difficulty::{Difficulty, DifficultyProfile};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameScreen {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Main session struct.
pub struct Game {
    pub difficulty: Difficulty,
    pub profile: DifficultyProfile,
    pub screen: GameScreen,

    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub power_ups: Vec<PowerUp>,
    pub spawner: Spawner,
    pub backdrop: Backdrop,

    pub score: u64,
    pub coins_collected: u32,
    pub stars_collected: u32,
    /// World scroll speed, px per tick.
    pub game_speed: f64,
    /// Ground tile scroll position, `[0, GROUND_TILE)`.
    pub ground_offset: f64,
    /// Screen shake magnitude in px; decays every tick.
    pub shake: f64,

    pub high_scores: HighScores,
    /// Set when the finished run beat the stored best.
    pub new_high_score: bool,
    pub should_quit: bool,

    /// Accumulated time for fixed-step physics.
    pub accumulated_time_ms: u64,
    pub tick_count: u64,

    pub(crate) rng: StdRng,
    store: Box<dyn HighScoreStore>,
    sound: Box<dyn SoundPlayer>,
}

impl Game {
    /// New session on the menu screen. `seed` fixes every random roll.
    pub fn new(
        difficulty: Difficulty,
        store: Box<dyn HighScoreStore>,
        sound: Box<dyn SoundPlayer>,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let profile = difficulty.profile();
        let backdrop = Backdrop::new(&mut rng);
        let high_scores = store.load();

        Self {
            difficulty,
            profile,
            screen: GameScreen::Menu,
            player: Player::new(&profile),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            power_ups: Vec::new(),
            spawner: Spawner::new(profile),
            backdrop,
            score: 0,
            coins_collected: 0,
            stars_collected: 0,
            game_speed: profile.initial_speed,
            ground_offset: 0.0,
            shake: 0.0,
            high_scores,
            new_high_score: false,
            should_quit: false,
            accumulated_time_ms: 0,
            tick_count: 0,
            rng,
            store,
            sound,
        }
    }

    /// Begin a fresh run at `difficulty`.
    pub fn start(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.profile = difficulty.profile();
        self.player = Player::new(&self.profile);
        self.obstacles.clear();
        self.collectibles.clear();
        self.power_ups.clear();
        self.spawner = Spawner::new(self.profile);
        self.score = 0;
        self.coins_collected = 0;
        self.stars_collected = 0;
        self.game_speed = self.profile.initial_speed;
        self.ground_offset = 0.0;
        self.shake = 0.0;
        self.new_high_score = false;
        self.accumulated_time_ms = 0;
        self.screen = GameScreen::Playing;
        tracing::info!(difficulty = difficulty.name(), "run started");
    }

    /// Best score recorded for the active difficulty.
    pub fn best_score(&self) -> u64 {
        self.high_scores.get(self.difficulty)
    }

    /// How far the speed ramp has progressed, 0-100.
    pub fn speed_percent(&self) -> u32 {
        self.profile.speed_percent(self.game_speed)
    }

    /// Shield time left as a fraction of a full pickup.
    pub fn shield_fraction(&self) -> f64 {
        self.player.shield_remaining as f64 / SHIELD_DURATION_TICKS as f64
    }

    pub fn magnet_fraction(&self) -> f64 {
        self.player.magnet_remaining as f64 / MAGNET_DURATION_TICKS as f64
    }

    /// The game-over overlay waits for the death animation.
    pub fn death_animation_done(&self) -> bool {
        self.screen == GameScreen::GameOver && self.player.death_finished()
    }

    pub(crate) fn play(&mut self, event: SoundEvent) {
        self.sound.play(event);
    }

    /// Write high scores through the store. Failures are logged and play
    /// continues on the in-memory copy.
    pub fn save_high_scores(&mut self) {
        match self.store.save(&self.high_scores) {
            Ok(()) => tracing::debug!("high scores saved"),
            Err(e) => tracing::warn!(error = %e, "could not save high scores"),
        }
    }

    /// Persist and flag the loop to exit.
    pub fn quit(&mut self) {
        self.save_high_scores();
        self.should_quit = true;
        tracing::info!(score = self.score, "quit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::high_scores::MemoryStore;
    use crate::game::sound::Silent;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn game_with(store: MemoryStore) -> Game {
        Game::new(
            Difficulty::Normal,
            Box::new(store),
            Box::new(Silent),
            Some(1),
        )
    }

    #[test]
    fn test_new_game_starts_on_menu() {
        let game = game_with(MemoryStore::default());
        assert_eq!(game.screen, GameScreen::Menu);
        assert_eq!(game.score, 0);
        assert!((game.game_speed - 9.0).abs() < f64::EPSILON);
        assert!(!game.backdrop.clouds.is_empty());
    }

    #[test]
    fn test_loads_high_scores_at_startup() {
        let mut store = MemoryStore::default();
        store.scores.set(Difficulty::Normal, 1234);
        let game = game_with(store);
        assert_eq!(game.best_score(), 1234);
    }

    #[test]
    fn test_start_resets_run_and_switches_profile() {
        let mut game = game_with(MemoryStore::default());
        game.score = 500;
        game.shake = 4.0;
        game.start(Difficulty::Hard);
        assert_eq!(game.screen, GameScreen::Playing);
        assert_eq!(game.difficulty, Difficulty::Hard);
        assert_eq!(game.score, 0);
        assert!(game.shake.abs() < f64::EPSILON);
        assert!((game.game_speed - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_speed_percent_tracks_ramp() {
        let mut game = game_with(MemoryStore::default());
        game.start(Difficulty::Normal);
        assert_eq!(game.speed_percent(), 0);
        game.game_speed = 12.5;
        assert_eq!(game.speed_percent(), 50);
        game.game_speed = 16.0;
        assert_eq!(game.speed_percent(), 100);
    }

    #[test]
    fn test_quit_saves_and_flags() {
        let store = Rc::new(RefCell::new(MemoryStore::default()));
        let mut game = Game::new(
            Difficulty::Easy,
            Box::new(Rc::clone(&store)),
            Box::new(Silent),
            Some(3),
        );
        game.quit();
        assert!(game.should_quit);
        assert_eq!(store.borrow().saves, 1);
    }

    #[test]
    fn test_failed_save_is_not_fatal() {
        let mut game = game_with(MemoryStore {
            fail_saves: true,
            ..Default::default()
        });
        game.high_scores.set(Difficulty::Normal, 77);
        game.quit();
        assert!(game.should_quit);
        assert_eq!(game.best_score(), 77);
    }
}
