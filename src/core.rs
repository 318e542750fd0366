//! Core functionality of superfile.
//!
//! Filesystem access and everything derived from it, independent of the UI:
//! - [fm]: directory entries, listing options and the [fm::Lister] trait.
//! - [meta]: file attributes, hashing and the properties report.
//! - [find]: recursive name search.
//! - [stats]: bounded directory statistics.
//! - [hexdump] and [preview]: content of the file screens.
//! - [formatter] and [icons]: display helpers.
//! - [terminal]: terminal setup and teardown around the interaction loop.

pub mod find;
pub mod fm;
pub mod formatter;
pub mod hexdump;
pub mod icons;
pub mod meta;
pub mod preview;
pub mod stats;
pub mod terminal;

pub use fm::{Entry, EntryKind, FsLister, Lister, ListingConfig, SortKey};
