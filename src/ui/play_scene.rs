//! Unicorn Dash play field rendering.
//!
//! Uses a cell buffer for per-character color control. The world
//! (900×500 logical px) is scaled onto the terminal area, drawn into a 2D
//! grid and then stamped row-by-row as Paragraph widgets.

use super::game_common::{
    create_game_layout, label_value, meter, render_info_panel_frame, render_modal,
    render_status_bar,
};
use crate::core::constants::*;
use crate::game::entities::{
    CollectibleKind, ObstacleKind, PowerUpKind, RockSize, WorldEntity,
};
use crate::game::player::PlayerState;
use crate::game::{Game, GameScreen};
use rand::Rng;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

// ── Palette ─────────────────────────────────────────────────────────
const GRASS_CHAR: char = '▓';
const GRASS_ALT: char = '▒';
const DIRT_CHAR: char = '░';
const UNICORN_COLOR: Color = Color::Rgb(255, 190, 215);
const MANE_COLOR: Color = Color::Rgb(190, 110, 255);
const HORN_COLOR: Color = Color::Rgb(255, 215, 60);
const CLOUD_COLOR: Color = Color::Rgb(190, 190, 210);

/// Render the play screen (also used under the pause and game-over modals).
pub fn render_play_scene(frame: &mut Frame, area: Rect, game: &Game) {
    let layout = create_game_layout(
        frame,
        area,
        " Unicorn Dash ",
        Color::LightMagenta,
        10,
        24,
    );

    render_field(frame, layout.content, game, true);
    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);

    match game.screen {
        GameScreen::Paused => render_pause_modal(frame, layout.content),
        GameScreen::GameOver if game.death_animation_done() => {
            render_game_over_modal(frame, layout.content, game)
        }
        _ => {}
    }
}

/// Draw the sky and ground, plus the world when `show_world` is set.
pub fn render_field(frame: &mut Frame, area: Rect, game: &Game, show_world: bool) {
    if area.height < 2 || area.width < 10 {
        return;
    }
    let buffer = build_field(
        game,
        area.width as usize,
        area.height as usize,
        shake_offset(game.shake),
        show_world,
    );
    buffer.render(frame, area);
}

/// Random screen offset in world px for the current shake magnitude.
fn shake_offset(shake: f64) -> (f64, f64) {
    if shake <= 0.0 {
        return (0.0, 0.0);
    }
    let mut rng = rand::thread_rng();
    (rng.gen_range(-shake..=shake), rng.gen_range(-shake..=shake))
}

/// Cell in the render buffer with foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl Cell {
    fn fg(ch: char, fg: Color) -> Self {
        Self {
            ch,
            fg,
            bg: Color::Reset,
        }
    }
}

pub(crate) struct CellBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        if col < self.width && row < self.height {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Write a cell; anything outside the buffer is clipped.
    pub fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = cell;
        }
    }

    pub fn text(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, Cell::fg(ch, fg));
        }
    }

    #[cfg(test)]
    pub fn row_string(&self, row: usize) -> String {
        (0..self.width)
            .filter_map(|col| self.get(col, row))
            .map(|c| c.ch)
            .collect()
    }

    /// Stamp the buffer onto `area`, merging runs of equal style into spans.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        for row in 0..self.height.min(area.height as usize) {
            let mut spans: Vec<Span> = Vec::new();
            let mut current_fg = Color::Reset;
            let mut current_bg = Color::Reset;
            let mut current_text = String::new();

            for cell in &self.cells[row * self.width..(row + 1) * self.width] {
                if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current_text),
                        Style::default().fg(current_fg).bg(current_bg),
                    ));
                }
                current_fg = cell.fg;
                current_bg = cell.bg;
                current_text.push(cell.ch);
            }
            if !current_text.is_empty() {
                spans.push(Span::styled(
                    current_text,
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }

            let row_area = Rect::new(area.x, area.y + row as u16, area.width, 1);
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }
    }
}

/// World → cell mapping for one frame. `dx`/`dy` is the shake offset.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    sx: f64,
    sy: f64,
    dx: f64,
    dy: f64,
}

impl Viewport {
    fn new(cols: usize, rows: usize, shake: (f64, f64)) -> Self {
        Self {
            sx: cols as f64 / SCREEN_WIDTH,
            sy: rows as f64 / SCREEN_HEIGHT,
            dx: shake.0,
            dy: shake.1,
        }
    }

    fn col(&self, x: f64) -> i32 {
        ((x + self.dx) * self.sx).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        ((y + self.dy) * self.sy).floor() as i32
    }

    /// Cells covering `[x, x+w) × [y, y+h)` as `(c0, r0, c1, r1)`, end
    /// exclusive, never smaller than one cell.
    fn span(&self, x: f64, y: f64, w: f64, h: f64) -> (i32, i32, i32, i32) {
        let c0 = self.col(x);
        let r0 = self.row(y);
        let c1 = (((x + w + self.dx) * self.sx).ceil() as i32).max(c0 + 1);
        let r1 = (((y + h + self.dy) * self.sy).ceil() as i32).max(r0 + 1);
        (c0, r0, c1, r1)
    }
}

pub(crate) fn build_field(
    game: &Game,
    cols: usize,
    rows: usize,
    shake: (f64, f64),
    show_world: bool,
) -> CellBuffer {
    let mut buf = CellBuffer::new(cols, rows);
    let vp = Viewport::new(cols, rows, shake);

    draw_clouds(&mut buf, &vp, game);
    draw_ground(&mut buf, &vp, game.ground_offset);

    if show_world {
        draw_pickups(&mut buf, &vp, game);
        draw_obstacles(&mut buf, &vp, game);
        draw_unicorn(&mut buf, &vp, game);
        draw_hud(&mut buf, game);
    }
    buf
}

fn draw_clouds(buf: &mut CellBuffer, vp: &Viewport, game: &Game) {
    for cloud in &game.backdrop.clouds {
        let w = cloud.size.width();
        let (c0, r0, c1, r1) = vp.span(cloud.x, cloud.y, w, w * 0.3);
        for row in r0..r1 {
            // Rounded ends: the outer rows are a column shorter on each side
            let inset = if row == r0 || row == r1 - 1 { 1 } else { 0 };
            for col in (c0 + inset)..(c1 - inset) {
                buf.put(col, row, Cell::fg(DIRT_CHAR, CLOUD_COLOR));
            }
        }
    }
}

fn draw_ground(buf: &mut CellBuffer, vp: &Viewport, offset: f64) {
    let top = vp.row(GROUND_LINE);
    for row in top..buf.height as i32 {
        for col in 0..buf.width as i32 {
            let cell = if row == top {
                // Alternate half tiles so the grass visibly scrolls
                let world_x = col as f64 / vp.sx + offset;
                let ch = if world_x.rem_euclid(GROUND_TILE) < GROUND_TILE / 2.0 {
                    GRASS_CHAR
                } else {
                    GRASS_ALT
                };
                Cell {
                    ch,
                    fg: Color::Rgb(110, 190, 90),
                    bg: Color::Rgb(60, 120, 55),
                }
            } else {
                Cell {
                    ch: DIRT_CHAR,
                    fg: Color::Rgb(120, 90, 60),
                    bg: Color::Rgb(70, 50, 35),
                }
            };
            buf.put(col, row, cell);
        }
    }
}

fn draw_obstacles(buf: &mut CellBuffer, vp: &Viewport, game: &Game) {
    for obstacle in &game.obstacles {
        let (c0, r0, c1, r1) = vp.span(obstacle.x, obstacle.y, obstacle.width, obstacle.height);
        match obstacle.kind {
            ObstacleKind::Rock(size) => {
                let (ch, fg) = match size {
                    RockSize::Small => ('▲', Color::Rgb(150, 150, 150)),
                    RockSize::Medium => ('▲', Color::Rgb(125, 125, 130)),
                    RockSize::Large => ('█', Color::Rgb(100, 100, 110)),
                    RockSize::Crystal => ('◆', Color::Rgb(120, 220, 255)),
                };
                fill(buf, (c0, r0, c1, r1), Cell::fg(ch, fg));
            }
            ObstacleKind::Dragon { duckable, .. } => {
                let body = if duckable {
                    Color::Rgb(235, 140, 40)
                } else {
                    Color::Rgb(210, 60, 60)
                };
                let wing = if (obstacle.anim_tick / 8) % 2 == 0 { 'W' } else { 'M' };
                for row in r0..r1 {
                    for col in c0..c1 {
                        let ch = if row == r0 {
                            wing
                        } else if col == c0 {
                            '<'
                        } else {
                            '▓'
                        };
                        buf.put(col, row, Cell::fg(ch, body));
                    }
                }
            }
        }
    }
}

fn draw_pickups(buf: &mut CellBuffer, vp: &Viewport, game: &Game) {
    for item in &game.collectibles {
        let (ch, fg) = match item.kind {
            CollectibleKind::Star => ('★', Color::Rgb(255, 235, 80)),
            CollectibleKind::Coin => ('●', Color::Rgb(240, 190, 40)),
        };
        let b = item.bounds();
        fill(buf, vp.span(b.x, b.y, b.w, b.h), Cell::fg(ch, fg));
    }
    for power_up in &game.power_ups {
        let (ch, fg) = match power_up.kind {
            PowerUpKind::Shield => ('S', Color::Cyan),
            PowerUpKind::Magnet => ('U', Color::LightMagenta),
        };
        let b = power_up.bounds();
        fill(buf, vp.span(b.x, b.y, b.w, b.h), Cell::fg(ch, fg));
    }
}

fn draw_unicorn(buf: &mut CellBuffer, vp: &Viewport, game: &Game) {
    let p = &game.player;
    let state = p.state();
    let (top, height) = match state {
        PlayerState::Ducking => (p.y + PLAYER_HEIGHT - PLAYER_DUCK_HEIGHT, PLAYER_DUCK_HEIGHT),
        _ => (p.y, PLAYER_HEIGHT),
    };
    let (c0, r0, c1, r1) = vp.span(p.x, top, PLAYER_WIDTH, height);

    if state == PlayerState::Dying {
        // Tumbling: glyph follows the spin angle
        const SPIN: [char; 4] = ['█', '▚', '▀', '▞'];
        let ch = SPIN[((p.rotation / 90.0) as usize) % SPIN.len()];
        fill(buf, (c0, r0, c1, r1), Cell::fg(ch, Color::Rgb(190, 130, 150)));
        return;
    }

    for row in r0..r1 {
        for col in c0..c1 {
            let cell = if row == r0 && col == c1 - 1 {
                Cell::fg('^', HORN_COLOR)
            } else if row == r0 {
                Cell::fg('≈', MANE_COLOR)
            } else if row == r1 - 1 && r1 - r0 > 1 {
                let leg = match state {
                    // Legs tucked mid-air
                    PlayerState::Airborne(_) => '=',
                    _ if (col + p.run_anim_frame as i32) % 2 == 0 => '/',
                    _ => '\\',
                };
                Cell::fg(leg, UNICORN_COLOR)
            } else {
                Cell::fg('█', UNICORN_COLOR)
            };
            buf.put(col, row, cell);
        }
    }

    if p.shield_active {
        for row in r0..r1 {
            buf.put(c0 - 1, row, Cell::fg('(', Color::Cyan));
            buf.put(c1, row, Cell::fg(')', Color::Cyan));
        }
    }
    if p.magnet_active {
        buf.put(c1 - 1, r0 - 1, Cell::fg('U', Color::LightMagenta));
    }
}

fn draw_hud(buf: &mut CellBuffer, game: &Game) {
    buf.text(1, 0, &format!("Score: {}", game.score), Color::White);
    let best = format!("Best: {}", game.best_score().max(game.score));
    let col = buf.width as i32 - best.chars().count() as i32 - 1;
    buf.text(col, 0, &best, Color::DarkGray);
}

fn fill(buf: &mut CellBuffer, (c0, r0, c1, r1): (i32, i32, i32, i32), cell: Cell) {
    for row in r0..r1 {
        for col in c0..c1 {
            buf.put(col, row, cell);
        }
    }
}

/// Render the status bar below the play field.
fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &Game) {
    match game.screen {
        GameScreen::Paused => render_status_bar(
            frame,
            area,
            "Paused",
            Color::Yellow,
            &[("[P]", "Resume"), ("[R]", "Restart"), ("[M]", "Menu"), ("[Q]", "Quit")],
        ),
        GameScreen::GameOver => render_status_bar(
            frame,
            area,
            "Game Over",
            Color::Red,
            &[("[R]", "Restart"), ("[1/2/3]", "Difficulty"), ("[M]", "Menu"), ("[Q]", "Quit")],
        ),
        _ => {
            let duck_hint = if game.player.is_ducking { "Ducking" } else { "Duck" };
            render_status_bar(
                frame,
                area,
                "Run!",
                Color::LightMagenta,
                &[
                    ("[Space/Up]", "Jump"),
                    ("[Down]", duck_hint),
                    ("[P]", "Pause"),
                    ("[Q]", "Quit"),
                ],
            );
        }
    }
}

/// Render the info panel on the right side.
fn render_info_panel(frame: &mut Frame, area: Rect, game: &Game) {
    let inner = render_info_panel_frame(frame, area);
    let value = Style::default().fg(Color::White);

    let mut lines: Vec<Line> = vec![
        label_value(
            "Difficulty: ",
            game.difficulty.name().to_string(),
            Style::default().fg(Color::LightMagenta),
        ),
        label_value(
            "Score: ",
            game.score.to_string(),
            value.add_modifier(Modifier::BOLD),
        ),
        label_value("Best: ", game.best_score().to_string(), value),
        label_value("Speed: ", format!("{}%", game.speed_percent()), value),
        Line::from(""),
        label_value("Coins: ", game.coins_collected.to_string(), value),
        label_value("Stars: ", game.stars_collected.to_string(), value),
        Line::from(""),
    ];

    if game.player.shield_active {
        lines.push(label_value(
            "Shield ",
            meter(game.shield_fraction(), 10),
            Style::default().fg(Color::Cyan),
        ));
    }
    if game.player.magnet_active {
        lines.push(label_value(
            "Magnet ",
            meter(game.magnet_fraction(), 10),
            Style::default().fg(Color::LightMagenta),
        ));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Legend:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    for (glyph, color, label) in [
        (" ▲ ", Color::Rgb(150, 150, 150), "Rock"),
        (" ◆ ", Color::Rgb(120, 220, 255), "Crystal"),
        (" W ", Color::Rgb(210, 60, 60), "Dragon"),
        (" W ", Color::Rgb(235, 140, 40), "Low dragon (duck)"),
        (" ★ ", Color::Rgb(255, 235, 80), "Star +50"),
        (" ● ", Color::Rgb(240, 190, 40), "Coin +25"),
        (" S ", Color::Cyan, "Shield"),
        (" U ", Color::LightMagenta, "Magnet"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(glyph, Style::default().fg(color)),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_pause_modal(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Take a breather.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[P] Resume  [R] Restart  [M] Menu",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    render_modal(frame, area, " PAUSED ", Color::Yellow, 40, lines);
}

fn render_game_over_modal(frame: &mut Frame, area: Rect, game: &Game) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Score: {}", game.score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Best ({}): {}", game.difficulty.name(), game.best_score()),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!(
                "Coins {}  Stars {}",
                game.coins_collected, game.stars_collected
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if game.new_high_score {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "NEW HIGH SCORE!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Space/R] Again  [1/2/3] Difficulty  [M] Menu",
        Style::default().fg(Color::DarkGray),
    )));
    render_modal(frame, area, " GAME OVER ", Color::Red, 50, lines);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::difficulty::Difficulty;
    use crate::game::entities::Obstacle;
    use crate::game::high_scores::MemoryStore;
    use crate::game::sound::Silent;

    const COLS: usize = 90;
    const ROWS: usize = 25;

    fn game() -> Game {
        let mut game = Game::new(
            Difficulty::Normal,
            Box::new(MemoryStore::default()),
            Box::new(Silent),
            Some(5),
        );
        game.start(Difficulty::Normal);
        game.backdrop.clouds.clear();
        game
    }

    fn unicorn_cells(buf: &CellBuffer) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                if buf.get(col, row).map(|c| c.fg) == Some(UNICORN_COLOR) {
                    found.push((col, row));
                }
            }
        }
        found
    }

    #[test]
    fn test_ground_fills_from_ground_line() {
        let buf = build_field(&game(), COLS, ROWS, (0.0, 0.0), true);
        // 440 / 500 * 25 = 22
        let grass = buf.row_string(22);
        assert!(grass.chars().all(|c| c == GRASS_CHAR || c == GRASS_ALT));
        assert!(buf.row_string(24).chars().all(|c| c == DIRT_CHAR));
        assert!(buf.row_string(21).contains('/'), "legs just above the grass");
    }

    #[test]
    fn test_airborne_unicorn_tucks_legs() {
        let mut g = game();
        g.player.jump();
        let legs = build_field(&g, COLS, ROWS, (0.0, 0.0), false).row_string(21);
        assert!(legs.contains('='));
        assert!(!legs.contains('/'));
    }

    #[test]
    fn test_ground_pattern_scrolls() {
        let mut g = game();
        let before = build_field(&g, COLS, ROWS, (0.0, 0.0), false).row_string(22);
        g.ground_offset = GROUND_TILE / 2.0;
        let after = build_field(&g, COLS, ROWS, (0.0, 0.0), false).row_string(22);
        assert_ne!(before, after);
    }

    #[test]
    fn test_unicorn_at_player_column() {
        let buf = build_field(&game(), COLS, ROWS, (0.0, 0.0), true);
        let cells = unicorn_cells(&buf);
        assert!(!cells.is_empty());
        // x 100..170 at 0.1 cells/px
        assert!(cells.iter().all(|&(c, _)| (10..17).contains(&c)));
        assert_eq!(buf.get(16, 19).map(|c| c.ch), Some('^'));
    }

    #[test]
    fn test_shake_shifts_world() {
        let buf = build_field(&game(), COLS, ROWS, (10.0, 0.0), true);
        let min_col = unicorn_cells(&buf).iter().map(|&(c, _)| c).min();
        assert_eq!(min_col, Some(11));
    }

    #[test]
    fn test_rock_and_dragon_drawn() {
        let mut g = game();
        g.obstacles.push(Obstacle::rock(500.0, RockSize::Small));
        g.obstacles.push(Obstacle::dragon(
            700.0,
            crate::game::entities::AltitudeBand::High,
        ));
        let buf = build_field(&g, COLS, ROWS, (0.0, 0.0), true);
        assert_eq!(buf.get(51, 21).map(|c| c.ch), Some('▲'));
        // High band top edge at y 300 → row 15
        assert_eq!(buf.get(72, 15).map(|c| c.ch), Some('W'));
    }

    #[test]
    fn test_menu_backdrop_hides_world() {
        let buf = build_field(&game(), COLS, ROWS, (0.0, 0.0), false);
        assert!(unicorn_cells(&buf).is_empty());
        assert!(!buf.row_string(0).contains("Score"));
    }

    #[test]
    fn test_hud_shows_score() {
        let mut g = game();
        g.score = 321;
        let buf = build_field(&g, COLS, ROWS, (0.0, 0.0), true);
        assert!(buf.row_string(0).contains("Score: 321"));
        assert!(buf.row_string(0).contains("Best: 321"));
    }

    #[test]
    fn test_put_clips_outside() {
        let mut buf = CellBuffer::new(3, 2);
        buf.put(-1, 0, Cell::fg('x', Color::Red));
        buf.put(3, 1, Cell::fg('x', Color::Red));
        buf.put(2, 1, Cell::fg('y', Color::Red));
        assert_eq!(buf.row_string(0), "   ");
        assert_eq!(buf.row_string(1), "  y");
    }
}
