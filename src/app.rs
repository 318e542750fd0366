//! Application logic for superfile.
//!
//! - [nav]: the navigation and pagination engine.
//! - [input]: key decoders.
//! - [keymap]: key to action mapping.
//! - [state]: [AppState] and the interaction loop.
//! - [handlers]: menus, prompts and detail screens driven by the loop.

pub mod handlers;
pub mod input;
pub mod keymap;
pub mod nav;
pub mod state;

pub use handlers::view_file;
pub use state::{AppState, ExitReason};
