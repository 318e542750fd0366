//! Directory listing for superfile.
//!
//! Provides the [Entry] type shown in the browser, the session-wide [ListingConfig],
//! the [Lister] seam used by the navigation engine and its filesystem implementation
//! [FsLister].

use crate::core::icons::dir_icon;
use crate::core::meta::{FileAttributes, describe};
use crate::errors::ListingError;

use serde::Deserialize;

use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::SystemTime;

/// Kind-specific data of an [Entry].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File(FileAttributes),
    /// `children` is `None` when the directory could not be read.
    Directory { children: Option<usize> },
}

/// One child of a listed directory. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: OsString,
    lowercase_name: String,
    path: PathBuf,
    kind: EntryKind,
}

impl Entry {
    pub fn new(parent: &Path, name: OsString, kind: EntryKind) -> Self {
        let path = parent.join(&name);
        let lowercase_name = name.to_string_lossy().to_lowercase();
        Entry {
            name,
            lowercase_name,
            path,
            kind,
        }
    }

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> std::borrow::Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn lowercase_name(&self) -> &str {
        &self.lowercase_name
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory { .. })
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        is_hidden_name(&self.name)
    }

    pub fn attributes(&self) -> Option<&FileAttributes> {
        match &self.kind {
            EntryKind::File(attrs) => Some(attrs),
            EntryKind::Directory { .. } => None,
        }
    }

    /// Child count of a directory, `Some(None)` when it was unreadable, `None` for files.
    pub fn children(&self) -> Option<Option<usize>> {
        match self.kind {
            EntryKind::Directory { children } => Some(children),
            EntryKind::File(_) => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match &self.kind {
            EntryKind::File(attrs) => attrs.icon(),
            EntryKind::Directory { children } => dir_icon(children.is_some()),
        }
    }

    /// Value compared by the size sort. Directories use their child count and
    /// unreadable directories sort before everything else.
    fn size_key(&self) -> Option<u64> {
        match &self.kind {
            EntryKind::File(attrs) => Some(attrs.size()),
            EntryKind::Directory { children } => children.map(|c| c as u64),
        }
    }

    fn modified_key(&self) -> Option<SystemTime> {
        self.attributes().map(FileAttributes::modified)
    }
}

/// Names starting with `.` are hidden.
#[inline]
pub fn is_hidden_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

/// Sort key for directory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Type,
    Size,
    Date,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Name, SortKey::Type, SortKey::Size, SortKey::Date];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Type => "type",
            SortKey::Size => "size",
            SortKey::Date => "date",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "type" => Ok(SortKey::Type),
            "size" => Ok(SortKey::Size),
            "date" | "modified" => Ok(SortKey::Date),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

/// Session-wide listing options. Any change invalidates the current listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListingConfig {
    pub show_hidden: bool,
    pub sort_key: SortKey,
    pub reverse: bool,
}

impl ListingConfig {
    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
    }

    /// Selecting the active key flips the direction, a new key resets it to ascending.
    pub fn select_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.reverse = !self.reverse;
        } else {
            self.sort_key = key;
            self.reverse = false;
        }
    }

    #[inline]
    pub fn direction_arrow(&self) -> &'static str {
        if self.reverse { "↑" } else { "↓" }
    }
}

/// What a path currently points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Directory,
    File,
    Missing,
}

/// Source of directory listings for the navigation engine.
pub trait Lister {
    /// Lists the children of `path`, filtered and sorted per `config`.
    fn list(&self, path: &Path, config: &ListingConfig) -> Result<Vec<Entry>, ListingError>;

    fn probe(&self, path: &Path) -> PathKind {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => PathKind::Directory,
            Ok(_) => PathKind::File,
            Err(_) => PathKind::Missing,
        }
    }
}

/// [Lister] backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl Lister for FsLister {
    fn list(&self, path: &Path, config: &ListingConfig) -> Result<Vec<Entry>, ListingError> {
        let read = fs::read_dir(path).map_err(|e| ListingError::from_io(path, e))?;
        let mut entries = Vec::with_capacity(64);

        for dir_entry in read {
            let Ok(dir_entry) = dir_entry else {
                continue;
            };
            let name = dir_entry.file_name();
            if !config.show_hidden && is_hidden_name(&name) {
                continue;
            }

            let full = dir_entry.path();
            let kind = if full.is_dir() {
                EntryKind::Directory {
                    children: fs::read_dir(&full).ok().map(|rd| rd.count()),
                }
            } else {
                EntryKind::File(describe(&full))
            };
            entries.push(Entry::new(path, name, kind));
        }

        sort_entries(&mut entries, config);
        tracing::trace!(path = %path.display(), count = entries.len(), "listed directory");
        Ok(entries)
    }
}

/// Orders `entries` for display.
///
/// A base pass by raw name makes the result independent of the filesystem's
/// enumeration order. The primary pass is stable, and every mode except
/// [SortKey::Type] finishes with a stable directories-first pass.
pub fn sort_entries(entries: &mut [Entry], config: &ListingConfig) {
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let reverse = config.reverse;
    match config.sort_key {
        SortKey::Type => {
            entries.sort_by(|a, b| {
                b.is_dir()
                    .cmp(&a.is_dir())
                    .then_with(|| directed(a.lowercase_name.cmp(&b.lowercase_name), reverse))
            });
        }
        key => {
            entries.sort_by(|a, b| directed(primary_cmp(a, b, key), reverse));
            entries.sort_by_key(|e| !e.is_dir());
        }
    }
}

fn primary_cmp(a: &Entry, b: &Entry, key: SortKey) -> Ordering {
    match key {
        SortKey::Name | SortKey::Type => a.lowercase_name.cmp(&b.lowercase_name),
        SortKey::Size => a.size_key().cmp(&b.size_key()),
        SortKey::Date => a.modified_key().cmp(&b.modified_key()),
    }
}

#[inline]
fn directed(ord: Ordering, reverse: bool) -> Ordering {
    if reverse { ord.reverse() } else { ord }
}
