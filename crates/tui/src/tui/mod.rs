use std::io::{self, Stdout};
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use crate::config::AppConfig;
use crate::core::{open_or_memory, Board, DynStore, KeyValueStore};

mod app;
mod buffer;
mod constants;
mod helpers;

use app::App;
use constants::TICK_RATE;

type Backend = CrosstermBackend<Stdout>;

pub fn run(config: AppConfig) -> Result<()> {
    let mut app = open_app(&config);

    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;
    terminal.hide_cursor().context("failed to hide cursor")?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    result
}

/// Build the app on top of the configured store, or an in-memory one when the
/// database cannot be opened. The fallback is flagged in the header and the
/// status line.
fn open_app(config: &AppConfig) -> App<DynStore> {
    let first_run = !config.db_path().exists();
    let opened = open_or_memory(config);
    let durable = opened.is_durable();
    let storage_label = if durable {
        config.db_path().display().to_string()
    } else {
        String::from("in memory only (not saved)")
    };

    let board = Board::open(opened.store);
    info!(
        db = %config.db_path().display(),
        tasks = board.tasks().len(),
        durable,
        first_run,
        "starting terminal ui"
    );

    let mut app = App::new(board, storage_label);
    if let Some(err) = &opened.fallback {
        app.set_status_error(format!(
            "Storage unavailable, changes will not be saved: {err}"
        ));
    } else if first_run {
        app.set_status_info(format!(
            "Initialized taskdeck data store at {}",
            config.db_path().display()
        ));
    }
    app
}

fn run_app<S: KeyValueStore>(terminal: &mut Terminal<Backend>, app: &mut App<S>) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| app.draw(f))?;
        if app.should_quit() {
            break;
        }

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| std::time::Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.on_tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
