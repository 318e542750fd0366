//! Content of the single-file view.
//!
//! Text is shown line by line up to a cap, images only get a notice, and everything
//! that does not decode as UTF-8 falls back to a hex dump.

use crate::core::hexdump::{HexDump, HexOptions, hex_dump};
use crate::core::meta::{FileAttributes, HashAlgorithm, describe, hash};

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Files larger than this are never read as text.
const MAX_PREVIEW_SIZE: u64 = 10 * 1024 * 1024;
/// Bytes inspected for NUL when the MIME type says nothing about the content.
const BINARY_PEEK_BYTES: usize = 1024;
const SHORT_DIGEST_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBody {
    Text { lines: Vec<String>, truncated: bool },
    Hex(HexDump),
    Image,
    Empty,
    Unreadable(String),
}

#[derive(Debug, Clone)]
pub struct FileView {
    path: PathBuf,
    attributes: FileAttributes,
    short_md5: String,
    body: FileBody,
}

impl FileView {
    pub fn load(path: &Path, max_lines: usize) -> Self {
        let attributes = describe(path);
        let digest = hash(path, HashAlgorithm::Md5);
        let short_md5 = digest.chars().take(SHORT_DIGEST_LEN).collect();
        let body = load_body(path, &attributes, max_lines.max(1));
        FileView {
            path: path.to_path_buf(),
            attributes,
            short_md5,
            body,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn attributes(&self) -> &FileAttributes {
        &self.attributes
    }

    pub fn short_md5(&self) -> &str {
        &self.short_md5
    }

    pub fn body(&self) -> &FileBody {
        &self.body
    }

    /// Number of scrollable body lines.
    pub fn body_len(&self) -> usize {
        match &self.body {
            FileBody::Text { lines, .. } => lines.len(),
            FileBody::Hex(dump) => dump.rows.len(),
            _ => 1,
        }
    }
}

fn load_body(path: &Path, attributes: &FileAttributes, max_lines: usize) -> FileBody {
    if attributes.is_image() {
        return FileBody::Image;
    }
    if attributes.size() == 0 {
        return FileBody::Empty;
    }
    if attributes.size() <= MAX_PREVIEW_SIZE
        && (attributes.is_text() || !looks_binary(path))
        && let Some(body) = read_text(path, max_lines)
    {
        return body;
    }
    match hex_dump(path, HexOptions::default()) {
        Ok(dump) => FileBody::Hex(dump),
        Err(e) => FileBody::Unreadable(e.to_string()),
    }
}

fn looks_binary(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return true;
    };
    let mut buffer = [0u8; BINARY_PEEK_BYTES];
    let n = file.read(&mut buffer).unwrap_or(0);
    buffer[..n].contains(&0)
}

/// `None` when the content is not valid UTF-8.
fn read_text(path: &Path, max_lines: usize) -> Option<FileBody> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let mut lines = Vec::with_capacity(max_lines.min(1024));
    let mut buf = String::new();

    loop {
        buf.clear();
        match reader.read_line(&mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if lines.len() == max_lines {
                    return Some(FileBody::Text {
                        lines,
                        truncated: true,
                    });
                }
                lines.push(buf.trim_end_matches(['\n', '\r']).to_string());
            }
            Err(_) => return None,
        }
    }

    Some(FileBody::Text {
        lines,
        truncated: false,
    })
}
