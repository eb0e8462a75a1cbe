use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use unicorn_dash::build_info;
use unicorn_dash::cli::{self, Command};
use unicorn_dash::core::constants::INPUT_POLL_MS;
use unicorn_dash::game::{
    hold_duck, process_input, tick, Game, HighScoreStore, JsonFileStore, MemoryStore, Silent,
    SoundPlayer, TerminalBell,
};
use unicorn_dash::input::{map_key, DuckLatch};
use unicorn_dash::ui::draw_ui;
use unicorn_dash::utils::persistence::data_path;

const LOG_FILE: &str = "unicorn_dash.log";
const LOG_ENV: &str = "UNICORN_DASH_LOG";

fn main() -> io::Result<()> {
    let options = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Play(options)) => options,
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            std::process::exit(0);
        }
        Ok(Command::Help) => {
            println!("{}", cli::USAGE);
            std::process::exit(0);
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'unicorn-dash --help' for usage.");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging() {
        eprintln!("Warning: logging disabled: {}", e);
    }
    tracing::info!(version = %build_info::version_line(), ?options, "starting");

    let store: Box<dyn HighScoreStore> = match JsonFileStore::default_location() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "no data directory, high scores will not persist");
            Box::new(MemoryStore::default())
        }
    };
    let sound: Box<dyn SoundPlayer> = if options.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell)
    };
    let mut game = Game::new(options.difficulty, store, sound, options.seed);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    // Key release events, where the terminal supports them
    let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced_keys {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = run(&mut terminal, &mut game);

    // Restore terminal whether or not the loop failed
    if enhanced_keys {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    result
}

/// Main loop: draw, drain input, poll the duck key, step physics.
fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, game: &mut Game) -> io::Result<()> {
    let mut duck = DuckLatch::new();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| draw_ui(frame, game))?;

        let mut timeout = Duration::from_millis(INPUT_POLL_MS);
        while event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    duck.observe(input, Instant::now());
                    process_input(game, input);
                }
            }
            timeout = Duration::ZERO;
        }
        if game.should_quit {
            return Ok(());
        }
        hold_duck(game, duck.is_held(Instant::now()));

        let now = Instant::now();
        let dt_ms = now.duration_since(last_tick).as_millis() as u64;
        last_tick = now;
        tick(game, dt_ms);
    }
}

/// Log to ~/.unicorn_dash/unicorn_dash.log; the terminal belongs to the game.
fn init_logging() -> io::Result<()> {
    let path = data_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}
