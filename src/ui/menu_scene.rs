//! Title menu: difficulty choice and best scores over the drifting sky.

use super::game_common::{controls_line, render_modal};
use super::play_scene::render_field;
use crate::core::difficulty::Difficulty;
use crate::game::Game;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

pub fn render_menu(frame: &mut Frame, area: Rect, game: &Game) {
    render_field(frame, area, game, false);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Run, jump and duck past rocks and dragons.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];
    lines.extend(Difficulty::ALL.iter().enumerate().map(|(i, d)| difficulty_line(game, i, *d)));
    lines.push(Line::from(""));
    lines.push(controls_line(&[
        ("[1/2/3]", "Pick & play"),
        ("[Enter]", "Play"),
        ("[Q]", "Quit"),
    ]));

    render_modal(frame, area, " UNICORN DASH ", Color::LightMagenta, 52, lines);
}

fn difficulty_line(game: &Game, index: usize, difficulty: Difficulty) -> Line<'static> {
    let selected = difficulty == game.difficulty;
    let marker = if selected { "▶ " } else { "  " };
    let name_style = if selected {
        Style::default()
            .fg(Color::LightMagenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::LightMagenta)),
        Span::styled(format!("[{}] ", index + 1), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{:<8}", difficulty.name()), name_style),
        Span::styled(
            format!("best {:>6}", game.high_scores.get(difficulty)),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}
