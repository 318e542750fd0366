//! Terminal setup and teardown for superfile.
//!
//! Enters raw mode and the alternate screen, hands a [TerminalPresenter] to the
//! interaction loop and restores the terminal afterwards, also when the loop fails.

use crate::app::{AppState, ExitReason, view_file};
use crate::app::input::KeyDecoder;
use crate::config::Config;
use crate::ui::TerminalPresenter;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};

type Presenter = TerminalPresenter<CrosstermBackend<Stdout>>;

/// Initializes the terminal in raw mode and alternate screen and runs the browser.
///
/// Blocks until the loop ends. Returns an error if terminal setup or teardown fails.
pub fn run_terminal(app: &mut AppState, decoder: &mut dyn KeyDecoder) -> io::Result<ExitReason> {
    let mut presenter = setup(app.config())?;
    let result = app.run(decoder, &mut presenter);
    restore(presenter)?;
    result
}

/// Shows one file full-screen, then restores the terminal.
pub fn run_file_view(
    config: &Config,
    path: &std::path::Path,
    decoder: &mut dyn KeyDecoder,
) -> io::Result<ExitReason> {
    let mut presenter = setup(config)?;
    let result = view_file(
        config,
        path,
        config.general().page_size(),
        decoder,
        &mut presenter,
    );
    restore(presenter)?;
    Ok(result?.unwrap_or(ExitReason::Quit))
}

fn setup(config: &Config) -> io::Result<Presenter> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
        let _ = disable_raw_mode();
        return Err(e);
    }
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    tracing::debug!("terminal ready");
    Ok(TerminalPresenter::new(terminal, config.clone()))
}

fn restore(presenter: Presenter) -> io::Result<()> {
    let mut terminal = presenter.into_terminal();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    terminal.show_cursor()?;
    Ok(())
}
