//! Integration test: game loop
//!
//! Drives full runs through the public controller API: fixed-step ticks,
//! screen transitions, shield and death handling.

use unicorn_dash::core::constants::*;
use unicorn_dash::core::difficulty::Difficulty;
use unicorn_dash::game::entities::PowerUpKind;
use unicorn_dash::game::{
    process_input, step, tick, Game, GameInput, GameScreen, MemoryStore, Recorder, Silent,
    SoundEvent,
};
use std::cell::RefCell;
use std::rc::Rc;

fn new_game(difficulty: Difficulty, seed: u64) -> Game {
    Game::new(
        difficulty,
        Box::new(MemoryStore::default()),
        Box::new(Silent),
        Some(seed),
    )
}

/// Step until the run ends, checking the speed bounds on every tick.
fn run_until_death(game: &mut Game, max_steps: u32) -> u32 {
    for n in 1..=max_steps {
        let report = step(game);
        let p = game.profile;
        assert!(game.game_speed >= p.initial_speed && game.game_speed <= p.max_speed);
        if report.died {
            return n;
        }
    }
    panic!("run never ended in {} steps", max_steps);
}

// ── Full runs ──

#[test]
fn test_idle_runner_hits_first_rock() {
    for d in Difficulty::ALL {
        let mut game = new_game(d, 11);
        process_input(&mut game, GameInput::Start);
        let steps = run_until_death(&mut game, 5_000);

        // First obstacle needs the full gap plus the trip across the screen
        assert!(steps > BASE_OBSTACLE_GAP, "{:?} died after {}", d, steps);
        assert_eq!(game.screen, GameScreen::GameOver);
        assert!(game.score >= steps as u64 - 1);
        assert!(game.new_high_score);
        assert_eq!(game.best_score(), game.score);
    }
}

#[test]
fn test_same_seed_same_run() {
    let play = |seed| {
        let mut game = new_game(Difficulty::Hard, seed);
        process_input(&mut game, GameInput::Start);
        let steps = run_until_death(&mut game, 5_000);
        (steps, game.score)
    };
    assert_eq!(play(77), play(77));
}

#[test]
fn test_score_frozen_after_death() {
    let mut game = new_game(Difficulty::Normal, 3);
    process_input(&mut game, GameInput::Start);
    run_until_death(&mut game, 5_000);
    let score = game.score;
    let obstacles: Vec<f64> = game.obstacles.iter().map(|o| o.x).collect();

    for _ in 0..200 {
        step(&mut game);
    }
    assert_eq!(game.score, score);
    let after: Vec<f64> = game.obstacles.iter().map(|o| o.x).collect();
    assert_eq!(obstacles, after, "entities freeze on game over");
    assert!(game.death_animation_done());
}

#[test]
fn test_shield_saves_one_hit() {
    let sounds = Rc::new(RefCell::new(Recorder::default()));
    let mut game = Game::new(
        Difficulty::Normal,
        Box::new(MemoryStore::default()),
        Box::new(Rc::clone(&sounds)),
        Some(21),
    );
    process_input(&mut game, GameInput::Start);
    game.player.activate(PowerUpKind::Shield);

    let mut broke = false;
    for _ in 0..SHIELD_DURATION_TICKS {
        let report = step(&mut game);
        if report.collisions.shield_broken {
            assert!(!report.died);
            broke = true;
            break;
        }
    }
    assert!(broke, "first rock arrives before the shield expires");
    assert_eq!(game.screen, GameScreen::Playing);
    assert!(!game.player.shield_active);
    assert!(sounds.borrow().events.contains(&SoundEvent::Hit));

    // The next rock is fatal
    run_until_death(&mut game, 5_000);
}

// ── Fixed-step timing ──

#[test]
fn test_tick_converts_wall_time_to_steps() {
    let mut game = new_game(Difficulty::Easy, 1);
    process_input(&mut game, GameInput::Start);
    for _ in 0..10 {
        tick(&mut game, 48);
    }
    assert_eq!(game.tick_count, 30);
    assert_eq!(game.score, 30);
}

#[test]
fn test_paused_game_ignores_time() {
    let mut game = new_game(Difficulty::Easy, 1);
    process_input(&mut game, GameInput::Start);
    tick(&mut game, 64);
    process_input(&mut game, GameInput::Pause);
    let score = game.score;
    for _ in 0..50 {
        tick(&mut game, 100);
    }
    assert_eq!(game.score, score);
    process_input(&mut game, GameInput::Pause);
    tick(&mut game, 16);
    assert_eq!(game.score, score + 1);
}

// ── Screen flow ──

#[test]
fn test_menu_to_game_over_to_new_difficulty() {
    let mut game = new_game(Difficulty::Normal, 5);
    assert_eq!(game.screen, GameScreen::Menu);

    process_input(&mut game, GameInput::SelectDifficulty(Difficulty::Hard));
    assert_eq!(game.difficulty, Difficulty::Hard);
    run_until_death(&mut game, 5_000);
    let hard_best = game.best_score();

    process_input(&mut game, GameInput::SelectDifficulty(Difficulty::Easy));
    assert_eq!(game.screen, GameScreen::Playing);
    assert_eq!(game.best_score(), 0);
    assert_eq!(game.high_scores.get(Difficulty::Hard), hard_best);

    process_input(&mut game, GameInput::Menu);
    assert_eq!(game.screen, GameScreen::Menu);
    process_input(&mut game, GameInput::Quit);
    assert!(game.should_quit);
}
