//! Command-line argument parsing for superfile.
//!
//! With no arguments `sf` opens the browser in the current directory.

use crate::config::Config;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sf",
    version,
    about = "superfile - a paginated terminal file browser",
    after_help = "ENVIRONMENT:\n  SUPERFILE_CONFIG   Override the default config path\n  SUPERFILE_LOG      Log filter (e.g. \"debug\"), written to the cache directory"
)]
pub struct Cli {
    /// Directory to open (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Open a single file in the viewer, then exit
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum, value_name = "NAME")]
    pub theme: Option<ThemeName>,

    /// Show hidden files
    #[arg(long)]
    pub show_hidden: bool,

    /// Write the default configuration file and exit
    #[arg(long)]
    pub init: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum ThemeName {
    Monokai,
    Dracula,
    GithubDark,
    SolarizedDark,
    SolarizedLight,
}

impl ThemeName {
    /// Name of the matching preset.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Monokai => "monokai",
            ThemeName::Dracula => "dracula",
            ThemeName::GithubDark => "github-dark",
            ThemeName::SolarizedDark => "solarized-dark",
            ThemeName::SolarizedLight => "solarized-light",
        }
    }
}

/// Writes the default config to [Config::default_path], reporting on stderr.
/// Returns `true` on success.
pub fn init_config() -> bool {
    let path = Config::default_path();
    match Config::generate_default(&path) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Error: {}", e);
            false
        }
    }
}
