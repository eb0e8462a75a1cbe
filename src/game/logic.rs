//! Unicorn Dash controller: input handling per screen and the fixed-step
//! tick that drives physics, spawning and collisions.

use super::collision::{apply_magnet, resolve, CollisionReport};
use super::entities::{prune, CollectibleKind, WorldEntity};
use super::player::JumpOutcome;
use super::session::{Game, GameScreen};
use super::sound::SoundEvent;
use crate::core::constants::*;
use crate::core::difficulty::Difficulty;

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Jump,     // Space or Up arrow
    DuckDown, // Down arrow pressed
    DuckUp,   // Down arrow released
    Pause,
    Restart,
    Menu,
    Quit,
    SelectDifficulty(Difficulty),
    Start, // Enter
}

/// What happened during one physics step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub spawned_obstacle: bool,
    pub collisions: CollisionReport,
    /// The player died this step.
    pub died: bool,
}

/// Apply one input event. Transitions that make no sense on the current
/// screen are ignored.
pub fn process_input(game: &mut Game, input: GameInput) {
    if input == GameInput::Quit {
        game.quit();
        return;
    }

    match game.screen {
        GameScreen::Menu => match input {
            GameInput::SelectDifficulty(d) => game.start(d),
            GameInput::Jump | GameInput::Start => game.start(game.difficulty),
            _ => {}
        },
        GameScreen::Playing => match input {
            GameInput::Jump => jump(game),
            GameInput::DuckDown => duck(game),
            GameInput::DuckUp => game.player.stand_up(),
            GameInput::Pause => game.screen = GameScreen::Paused,
            GameInput::Restart => game.start(game.difficulty),
            GameInput::Menu => game.screen = GameScreen::Menu,
            _ => {}
        },
        GameScreen::Paused => match input {
            GameInput::Pause => game.screen = GameScreen::Playing,
            GameInput::Restart => game.start(game.difficulty),
            GameInput::Menu => game.screen = GameScreen::Menu,
            _ => {}
        },
        GameScreen::GameOver => match input {
            GameInput::Restart | GameInput::Start => game.start(game.difficulty),
            GameInput::Jump if game.player.death_finished() => game.start(game.difficulty),
            GameInput::SelectDifficulty(d) => game.start(d),
            GameInput::Menu => game.screen = GameScreen::Menu,
            _ => {}
        },
    }
}

/// Per-frame poll of the duck key: holding it ducks as soon as the player
/// is able to (e.g. on landing), letting go stands up.
pub fn hold_duck(game: &mut Game, held: bool) {
    if game.screen != GameScreen::Playing {
        return;
    }
    if held {
        duck(game);
    } else if game.player.is_ducking {
        game.player.stand_up();
    }
}

fn jump(game: &mut Game) {
    match game.player.jump() {
        JumpOutcome::Jumped => game.play(SoundEvent::Jump),
        JumpOutcome::DoubleJumped => game.play(SoundEvent::DoubleJump),
        JumpOutcome::StoodUp | JumpOutcome::Rejected => {}
    }
}

fn duck(game: &mut Game) {
    if game.player.duck() {
        game.play(SoundEvent::Duck);
    }
}

/// Advance the game. Called from the main loop.
///
/// `dt_ms` is milliseconds since the last call. Internally steps in 16ms
/// increments. Returns true if anything was stepped.
pub fn tick(game: &mut Game, dt_ms: u64) -> bool {
    if game.should_quit {
        return false;
    }

    // Clamp to avoid a burst of steps after a stall
    let dt_ms = dt_ms.min(MAX_FRAME_DT_MS);

    game.accumulated_time_ms += dt_ms;
    let mut changed = false;

    while game.accumulated_time_ms >= PHYSICS_TICK_MS {
        game.accumulated_time_ms -= PHYSICS_TICK_MS;
        step(game);
        changed = true;
    }

    changed
}

/// Single 16ms step. Clouds and shake decay run on every screen; the world
/// only moves while playing, and the death animation keeps running on the
/// game-over screen.
pub fn step(game: &mut Game) -> StepReport {
    game.tick_count += 1;
    game.backdrop.update(&mut game.rng);
    game.shake = (game.shake - SHAKE_DECAY_PER_TICK).max(0.0);

    match game.screen {
        GameScreen::Playing => step_playing(game),
        GameScreen::GameOver => {
            game.player.update();
            StepReport::default()
        }
        GameScreen::Menu | GameScreen::Paused => StepReport::default(),
    }
}

fn step_playing(game: &mut Game) -> StepReport {
    let mut report = StepReport::default();

    // 1. Player physics
    game.player.update();

    // 2. Spawn
    let batch = game.spawner.tick(game.score, &mut game.rng);
    if let Some(obstacle) = batch.obstacle {
        tracing::trace!(kind = ?obstacle.kind, score = game.score, "obstacle spawned");
        game.obstacles.push(obstacle);
        report.spawned_obstacle = true;
    }
    game.collectibles.extend(batch.collectible);
    game.power_ups.extend(batch.power_up);

    // 3. Scroll, magnet, drop whatever left the screen
    let speed = game.game_speed;
    game.obstacles.iter_mut().for_each(|o| o.update(speed));
    game.collectibles.iter_mut().for_each(|c| c.update(speed));
    game.power_ups.iter_mut().for_each(|p| p.update(speed));
    apply_magnet(&game.player, &mut game.collectibles);
    prune_all(game);

    // 4. Collisions and pickups
    let hits = resolve(
        &mut game.player,
        &mut game.obstacles,
        &mut game.collectibles,
        &mut game.power_ups,
    );
    apply_collisions(game, &hits);
    prune_all(game);

    // 5. Score and speed
    if hits.fatal {
        on_death(game);
        report.died = true;
    } else {
        game.score += 1;
        game.game_speed = game.profile.speed_for_score(game.score);
        game.ground_offset = (game.ground_offset + game.game_speed) % GROUND_TILE;
    }

    report.collisions = hits;
    report
}

fn prune_all(game: &mut Game) {
    prune(&mut game.obstacles);
    prune(&mut game.collectibles);
    prune(&mut game.power_ups);
}

fn apply_collisions(game: &mut Game, hits: &CollisionReport) {
    if hits.shield_broken {
        game.shake = game.shake.max(SHAKE_ON_SHIELD_BREAK);
        game.play(SoundEvent::Hit);
        tracing::debug!(score = game.score, "shield broken");
    }

    for kind in &hits.collected {
        match kind {
            CollectibleKind::Star => {
                game.stars_collected += 1;
                game.play(SoundEvent::Star);
            }
            CollectibleKind::Coin => {
                game.coins_collected += 1;
                game.play(SoundEvent::Coin);
            }
        }
    }
    game.score += hits.points;

    for kind in &hits.power_ups {
        tracing::debug!(power_up = ?kind, "power-up collected");
        game.play(SoundEvent::PowerUp);
    }
}

fn on_death(game: &mut Game) {
    game.screen = GameScreen::GameOver;
    game.shake = SHAKE_ON_DEATH;
    game.play(SoundEvent::Hit);

    game.new_high_score = game.high_scores.submit(game.difficulty, game.score);
    tracing::info!(
        score = game.score,
        difficulty = game.difficulty.name(),
        new_high_score = game.new_high_score,
        "game over"
    );
    if game.new_high_score {
        game.save_high_scores();
    }
}
