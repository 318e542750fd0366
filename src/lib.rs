//! Internal library crate for superfile.
//!
//! The shipped application is the `sf` binary (`src/main.rs`).
//!
//! This library exists to share code between targets (binary, tests) and to keep modules organized.
//! This API is only used to build the `sf` binary and is not considered a library for external use.

pub mod app;
pub mod config;
pub mod core;
pub mod errors;
pub mod ui;
pub mod utils;
