//! Fieldwire - terminal host for the reactive form engine
//!
//! Presents the invoice (default) or product costing form and routes key
//! presses through the rule engine.

mod app;
mod platform;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fieldwire::config::EngineConfig;
use fieldwire::rules::FormKind;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fieldwire=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let kind = if std::env::args().skip(1).any(|arg| arg == "--costing") {
        FormKind::Costing
    } else {
        FormKind::Invoice
    };
    let config = EngineConfig::load()?;
    let mut app = App::new(kind, config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        let term_size = terminal.size()?;
        app.resize(term_size.width);

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Wake up in time for the earliest debounce deadline
        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now())?;
                }
                Event::Resize(width, _height) => app.resize(width),
                _ => {}
            }
        }
        app.tick(Instant::now());

        if app.should_quit() {
            return Ok(());
        }
    }
}
