pub mod game_common;
pub mod menu_scene;
pub mod play_scene;

use crate::game::{Game, GameScreen};
use ratatui::Frame;

/// Draw the whole frame for the current screen.
pub fn draw_ui(frame: &mut Frame, game: &Game) {
    let area = frame.size();
    match game.screen {
        GameScreen::Menu => menu_scene::render_menu(frame, area, game),
        GameScreen::Playing | GameScreen::Paused | GameScreen::GameOver => {
            play_scene::render_play_scene(frame, area, game)
        }
    }
}
