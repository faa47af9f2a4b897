//! project-board: a terminal board of active and finished projects
//!
//! Projects are created through a form and moved between the two columns
//! by dragging them with the mouse or the keyboard.

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::panic;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use project_board::{App, BoardConfig};

/// Setup the terminal for TUI mode
fn setup_terminal(mouse: bool) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mouse: bool) -> Result<()> {
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Initialize logging with RUST_LOG environment variable support
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();
    install_panic_hook();

    let cwd = std::env::current_dir().ok();
    let config = BoardConfig::load(cwd.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Falling back to default configuration: {}", e);
        BoardConfig::default()
    });

    tracing::info!(?cwd, "Starting project-board");

    let mouse = config.ui.mouse;
    let mut terminal = setup_terminal(mouse)?;

    let result = match App::new(config) {
        Ok(mut app) => {
            // Raw mode delivers Ctrl+C as a key; the signal arm covers SIGINT from outside
            tokio::select! {
                res = app.run(&mut terminal) => res,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received Ctrl+C, shutting down gracefully");
                    Ok(())
                }
            }
        }
        Err(e) => Err(e),
    };

    // Restore terminal (always, even on error)
    restore_terminal(&mut terminal, mouse)?;

    result?;

    Ok(())
}
