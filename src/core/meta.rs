//! Metadata provider: per-file attributes, digests and the properties report.
//!
//! [describe] never fails. When a file cannot be inspected it returns
//! [FileAttributes::unknown] so the listing can still show the entry.

use crate::core::formatter::{format_attributes, format_mode_octal};
use crate::core::icons::{UNKNOWN_ICON, file_icon};
use crate::errors::{HashError, MetadataError};

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use std::fs::{self, File, Metadata};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Files larger than this are never hashed.
pub const MAX_HASH_BYTES: u64 = 100 * 1024 * 1024;
const HASH_CHUNK: usize = 4096;

pub const UNKNOWN_MIME: &str = "unknown";
const EXECUTABLE_MIME: &str = "application/x-executable";
const BINARY_MIME: &str = "application/octet-stream";

/// Attributes shown for a file entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttributes {
    size: u64,
    modified: SystemTime,
    mime: String,
    icon: &'static str,
    extension: String,
}

impl FileAttributes {
    /// Sentinel used when the file cannot be inspected.
    pub fn unknown() -> Self {
        FileAttributes {
            size: 0,
            modified: SystemTime::now(),
            mime: UNKNOWN_MIME.to_string(),
            icon: UNKNOWN_ICON,
            extension: String::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    #[inline]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    #[inline]
    pub fn icon(&self) -> &'static str {
        self.icon
    }

    /// Lowercase extension with its leading dot, or empty.
    #[inline]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    /// MIME types whose content is shown as text.
    pub fn is_text(&self) -> bool {
        self.mime.starts_with("text/")
            || matches!(
                self.mime.as_str(),
                "application/json"
                    | "application/xml"
                    | "application/javascript"
                    | "application/toml"
                    | "application/x-sh"
                    | "application/x-python"
            )
    }
}

/// Digest algorithms offered by the properties view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 3] = [HashAlgorithm::Md5, HashAlgorithm::Sha1, HashAlgorithm::Sha256];

    pub fn label(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha256 => "SHA-256",
        }
    }
}

/// Returns the attributes of `path`, or the sentinel when it cannot be read.
pub fn describe(path: &Path) -> FileAttributes {
    match try_describe(path) {
        Ok(attrs) => attrs,
        Err(err) => {
            tracing::debug!(error = %err, "falling back to unknown attributes");
            FileAttributes::unknown()
        }
    }
}

pub fn try_describe(path: &Path) -> Result<FileAttributes, MetadataError> {
    let meta = fs::metadata(path).map_err(|source| MetadataError::Stat {
        path: path.to_path_buf(),
        source,
    })?;
    let modified = meta
        .modified()
        .map_err(|_| MetadataError::NoModifiedTime(path.to_path_buf()))?;

    let raw_ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = if raw_ext.is_empty() {
        String::new()
    } else {
        format!(".{}", raw_ext.to_lowercase())
    };

    Ok(FileAttributes {
        size: meta.len(),
        modified,
        mime: mime_category(path, &meta),
        icon: file_icon(&raw_ext),
        extension,
    })
}

fn mime_category(path: &Path, meta: &Metadata) -> String {
    match mime_guess::from_path(path).first_raw() {
        Some(mime) => mime.to_string(),
        None if is_executable(path, meta) => EXECUTABLE_MIME.to_string(),
        None => BINARY_MIME.to_string(),
    }
}

/// Whether the current user could execute the file.
pub fn is_executable(path: &Path, meta: &Metadata) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = path;
        meta.is_file() && meta.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        meta.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| {
                    matches!(
                        ext.to_ascii_lowercase().as_str(),
                        "exe" | "bat" | "cmd" | "com" | "ps1"
                    )
                })
    }
}

/// Hex digest of `path`, or a placeholder when hashing is not possible.
pub fn hash(path: &Path, algorithm: HashAlgorithm) -> String {
    try_hash(path, algorithm).unwrap_or_else(|err| {
        tracing::debug!(path = %path.display(), error = %err, "hash unavailable");
        err.placeholder().to_string()
    })
}

pub fn try_hash(path: &Path, algorithm: HashAlgorithm) -> Result<String, HashError> {
    let size = fs::metadata(path)?.len();
    if size > MAX_HASH_BYTES {
        return Err(HashError::TooLarge { size });
    }
    let reader = File::open(path)?.take(MAX_HASH_BYTES);
    match algorithm {
        HashAlgorithm::Md5 => digest_reader::<Md5>(reader),
        HashAlgorithm::Sha1 => digest_reader::<Sha1>(reader),
        HashAlgorithm::Sha256 => digest_reader::<Sha256>(reader),
    }
}

fn digest_reader<D: Digest>(mut reader: impl Read) -> Result<String, HashError> {
    let mut hasher = D::new();
    let mut buf = [0u8; HASH_CHUNK];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Everything the properties screen shows about one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    path: PathBuf,
    attributes: FileAttributes,
    created: Option<SystemTime>,
    accessed: Option<SystemTime>,
    permissions: String,
    mode: Option<String>,
    executable: bool,
    digests: Vec<(HashAlgorithm, String)>,
}

impl FileReport {
    /// Gathers the report. Digests are only computed below [MAX_HASH_BYTES].
    pub fn collect(path: &Path) -> Result<Self, MetadataError> {
        let meta = fs::metadata(path).map_err(|source| MetadataError::Stat {
            path: path.to_path_buf(),
            source,
        })?;
        let attributes = try_describe(path)?;
        let digests = if meta.len() <= MAX_HASH_BYTES {
            HashAlgorithm::ALL
                .into_iter()
                .map(|algo| (algo, hash(path, algo)))
                .collect()
        } else {
            Vec::new()
        };

        Ok(FileReport {
            path: path.to_path_buf(),
            attributes,
            created: meta.created().ok(),
            accessed: meta.accessed().ok(),
            permissions: format_attributes(&meta),
            mode: format_mode_octal(&meta),
            executable: is_executable(path, &meta),
            digests,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn attributes(&self) -> &FileAttributes {
        &self.attributes
    }

    pub fn created(&self) -> Option<SystemTime> {
        self.created
    }

    pub fn accessed(&self) -> Option<SystemTime> {
        self.accessed
    }

    pub fn permissions(&self) -> &str {
        &self.permissions
    }

    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    pub fn executable(&self) -> bool {
        self.executable
    }

    /// Empty when the file was over the hashing cap.
    pub fn digests(&self) -> &[(HashAlgorithm, String)] {
        &self.digests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn describe_reads_size_mime_and_icon() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("Notes.MD");
        fs::write(&path, b"# hello\n")?;

        let attrs = describe(&path);
        assert_eq!(attrs.size(), 8);
        assert_eq!(attrs.mime(), "text/markdown");
        assert_eq!(attrs.icon(), "📝");
        assert_eq!(attrs.extension(), ".md");
        assert!(attrs.is_text());
        Ok(())
    }

    #[test]
    fn describe_missing_file_returns_sentinel() {
        let attrs = describe(Path::new("/definitely/not/here.txt"));
        assert_eq!(attrs.size(), 0);
        assert_eq!(attrs.mime(), UNKNOWN_MIME);
        assert_eq!(attrs.icon(), UNKNOWN_ICON);
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("blob.zzzq");
        fs::write(&path, [0u8, 1, 2])?;
        assert_eq!(describe(&path).mime(), "application/octet-stream");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn executable_without_extension() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir()?;
        let path = dir.path().join("runme");
        fs::write(&path, b"#!/bin/sh\n")?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        assert_eq!(describe(&path).mime(), "application/x-executable");
        Ok(())
    }

    #[test]
    fn known_digests() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("abc.txt");
        let mut f = File::create(&path)?;
        f.write_all(b"abc")?;
        drop(f);

        assert_eq!(hash(&path, HashAlgorithm::Md5), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            hash(&path, HashAlgorithm::Sha1),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            hash(&path, HashAlgorithm::Sha256),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        Ok(())
    }

    #[test]
    fn hash_of_missing_file_is_placeholder() {
        assert_eq!(
            hash(Path::new("/no/such/file"), HashAlgorithm::Md5),
            "Unable to compute hash"
        );
    }

    #[test]
    fn report_includes_all_digests() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("data.bin");
        fs::write(&path, [1u8; 64])?;
        let report = FileReport::collect(&path)?;
        assert_eq!(report.digests().len(), 3);
        assert_eq!(report.attributes().size(), 64);
        assert!(!report.permissions().is_empty());
        Ok(())
    }
}
