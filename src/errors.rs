//! Error types shared across superfile.
//!
//! Every layer gets its own enum so callers can decide how to recover:
//! - [ListingError]: a directory could not be listed. The engine recovers and shows a status line.
//! - [MetadataError]: attributes of a single file could not be read. Recovered with sentinel values.
//! - [HashError]: a digest could not be computed. Recovered with a placeholder string.
//! - [DecodeError]: a key could not be read from the input source.
//! - [AppError]: fatal start-up failures.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListingError {
    /// Classifies an I/O error raised while opening `path` for listing.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ListingError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => ListingError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotADirectory => ListingError::NotADirectory(path.to_path_buf()),
            _ => ListingError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ListingError::NotFound(p)
            | ListingError::PermissionDenied(p)
            | ListingError::NotADirectory(p) => p,
            ListingError::Io { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("cannot stat {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("modification time unavailable for {}", .0.display())]
    NoModifiedTime(PathBuf),
}

#[derive(Debug, Error)]
pub enum HashError {
    #[error("file too large to hash ({size} bytes)")]
    TooLarge { size: u64 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl HashError {
    /// Text shown in place of a digest.
    pub fn placeholder(&self) -> &'static str {
        match self {
            HashError::TooLarge { .. } => "File too large to hash",
            HashError::Io(_) => "Unable to compute hash",
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("input stream closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("path '{}' cannot be opened", .0.display())]
    InvalidPath(PathBuf),
    #[error("'{}' is not a readable file", .0.display())]
    InvalidFile(PathBuf),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
