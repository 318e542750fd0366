//! main.rs
//! Entry point for superfile

use superfile_tui::app::input::select_decoder;
use superfile_tui::app::{AppState, ExitReason};
use superfile_tui::config::Config;
use superfile_tui::core::terminal;
use superfile_tui::errors::AppError;
use superfile_tui::utils::cli::{Cli, init_config};
use superfile_tui::utils::{logging, resolve_initial_dir};

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[superfile] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let cli = Cli::parse();

    if cli.init {
        return if init_config() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    if let Err(e) = logging::init() {
        eprintln!("[superfile] Logging disabled: {}", e);
    }

    let mut config = Config::load();
    if let Some(theme) = cli.theme {
        config.set_theme(theme.as_str());
    }

    match run(cli, config) {
        Ok(ExitReason::Interrupted) => {
            println!("Interrupted.");
            ExitCode::SUCCESS
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[superfile] Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Validates the requested path before touching the terminal, then runs the
/// file viewer or the browser.
fn run(cli: Cli, config: Config) -> Result<ExitReason, AppError> {
    let mut decoder = select_decoder(config.general().input());

    if let Some(file) = cli.file {
        let path = file
            .canonicalize()
            .ok()
            .filter(|p| p.is_file())
            .ok_or(AppError::InvalidFile(file))?;
        return Ok(terminal::run_file_view(&config, &path, decoder.as_mut())?);
    }

    let dir = resolve_initial_dir(cli.path.as_deref())
        .ok()
        .filter(|p| p.is_dir())
        .ok_or_else(|| AppError::InvalidPath(cli.path.unwrap_or_else(|| PathBuf::from("."))))?;

    let mut listing = config.general().listing();
    if cli.show_hidden {
        listing.show_hidden = true;
    }

    let mut app = AppState::from_dir(config, listing, &dir);
    Ok(terminal::run_terminal(&mut app, decoder.as_mut())?)
}
