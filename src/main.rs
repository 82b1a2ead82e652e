// Material Tabs
// Terminal demo hosting the Material-style tab bar

// IMPORTS ------------------>>

use anyhow::{Context, Result};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use material_tabs::config::default_config_path;
use material_tabs::config_validation::{load_and_validate_config, parse_log_level};
use material_tabs::core::EventHandler;
use material_tabs::ui::app_view::{render_app, AppLayout};
use material_tabs::App;

//--------------------------------------------------------<<

/// Frame interval while something is moving
const ANIMATION_FRAME: Duration = Duration::from_millis(16);

/// Poll interval while idle
const IDLE_POLL: Duration = Duration::from_millis(250);

// ┌──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                                                 MAIN ENTRY POINT                                                 │
// └──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┘

fn main() -> Result<()> {
    // Optional config path as the first argument
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    let (app_config, props) = load_and_validate_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    // The terminal is in raw mode, so log to a file
    let level = parse_log_level(&app_config.application.log_level)?;
    let log_file = File::create(&app_config.application.log_file)
        .with_context(|| format!("creating log file {}", app_config.application.log_file))?;
    WriteLogger::init(level, Config::default(), log_file).context("initializing logger")?;
    log::info!("Starting with config {}", config_path.display());

    let mut app = App::new(&app_config, props);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("Exiting with error: {:#}", e);
    }
    result
}

// ┌────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                                           MAIN LOOP                                            │
// └────────────────────────────────────────────────────────────────────────────────────────────────┘

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let mut last_frame = Instant::now();

    while !app.should_quit {
        // Advance animations by the real time since the last frame
        let now = Instant::now();
        app.tick(now - last_frame);
        last_frame = now;

        // Lay out before drawing so a measurement lands in this frame
        let size = terminal.size()?;
        let layout = AppLayout::new(Rect::new(0, 0, size.width, size.height), app.bar_height());
        app.layout(layout.tab_bar);

        terminal.draw(|f| render_app(f, app, &layout))?;

        let timeout = if app.is_animating() { ANIMATION_FRAME } else { IDLE_POLL };
        if event::poll(timeout)? {
            let event = EventHandler::handle(event::read()?);
            app.handle_event(event);
        }
    }

    Ok(())
}
