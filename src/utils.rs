//! Miscellaneous utility functions for superfile.
//!
//! - [helpers]: color parsing, home directory handling and start path resolution.
//! - [cli]: command-line arguments.
//! - [logging]: the optional log file.

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{expand_home_path, get_home, parse_color, resolve_initial_dir, shorten_home_path};
