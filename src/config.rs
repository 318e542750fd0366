//! Configuration for superfile.
//!
//! - [load]: reading `superfile.toml` and the [Config] struct.
//! - [general]: listing defaults, page size, search and preview limits, input mode.
//! - [display]: what the browser draws.
//! - [theme] and [presets]: colors.
//! - [input]: key bindings.

pub mod display;
pub mod general;
pub mod input;
pub mod load;
pub mod presets;
pub mod theme;

pub use display::Display;
pub use general::{General, InputMode, InternalGeneral};
pub use input::Keys;
pub use load::{Config, RawConfig};
pub use theme::Theme;
