//! Aggregate statistics for a directory tree.
//!
//! The walk is bounded by depth and file count so it stays responsive on large trees.
//! When the file cap is hit the result is marked as truncated.

use crate::core::fm::is_hidden_name;

use walkdir::WalkDir;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

const LARGEST_KEPT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsOptions {
    /// Levels below the root that are still descended into.
    pub max_depth: usize,
    pub max_files: usize,
    pub show_hidden: bool,
}

impl Default for StatsOptions {
    fn default() -> Self {
        StatsOptions {
            max_depth: 5,
            max_files: 1000,
            show_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtStats {
    pub count: usize,
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirStats {
    pub total_files: usize,
    pub total_dirs: usize,
    pub total_size: u64,
    /// Keyed by lowercase extension with its dot; files without one use "".
    pub extensions: HashMap<String, ExtStats>,
    /// Up to ten largest files, biggest first.
    pub largest: Vec<(PathBuf, u64)>,
    pub truncated: bool,
}

impl DirStats {
    pub fn average_file_size(&self) -> u64 {
        if self.total_files == 0 {
            0
        } else {
            self.total_size / self.total_files as u64
        }
    }

    /// Extensions ordered by total size, largest first. Ties fall back to the name.
    pub fn top_extensions(&self, n: usize) -> Vec<(&str, ExtStats)> {
        let mut all: Vec<(&str, ExtStats)> = self
            .extensions
            .iter()
            .map(|(ext, stats)| (ext.as_str(), *stats))
            .collect();
        all.sort_by(|a, b| b.1.size.cmp(&a.1.size).then_with(|| a.0.cmp(b.0)));
        all.truncate(n);
        all
    }

    fn record_file(&mut self, path: PathBuf, size: u64) {
        self.total_size += size;

        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        let slot = self.extensions.entry(ext).or_default();
        slot.count += 1;
        slot.size += size;

        self.largest.push((path, size));
        self.largest
            .sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        self.largest.truncate(LARGEST_KEPT);
    }
}

pub fn collect(root: &Path, options: &StatsOptions) -> DirStats {
    let show_hidden = options.show_hidden;
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(options.max_depth + 1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || show_hidden || !is_hidden_name(e.file_name()));

    let mut stats = DirStats::default();
    for entry in walker.filter_map(Result::ok) {
        if entry.file_type().is_dir() {
            stats.total_dirs += 1;
            continue;
        }

        stats.total_files += 1;
        if stats.total_files > options.max_files {
            stats.total_files -= 1;
            stats.truncated = true;
            break;
        }
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        stats.record_file(entry.into_path(), size);
    }

    tracing::debug!(
        root = %root.display(),
        files = stats.total_files,
        dirs = stats.total_dirs,
        truncated = stats.truncated,
        "collected directory statistics"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn counts_sizes_and_extensions() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("src"))?;
        fs::write(dir.path().join("src/main.rs"), vec![b'a'; 300])?;
        fs::write(dir.path().join("src/lib.RS"), vec![b'a'; 100])?;
        fs::write(dir.path().join("README"), vec![b'a'; 50])?;
        fs::write(dir.path().join(".secret"), vec![b'a'; 999])?;

        let stats = collect(dir.path(), &StatsOptions::default());
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_dirs, 1);
        assert_eq!(stats.total_size, 450);
        assert_eq!(stats.average_file_size(), 150);
        assert_eq!(stats.extensions[".rs"], ExtStats { count: 2, size: 400 });
        assert_eq!(stats.extensions[""], ExtStats { count: 1, size: 50 });
        assert_eq!(stats.largest[0].1, 300);
        assert!(!stats.truncated);

        let top = stats.top_extensions(5);
        assert_eq!(top[0].0, ".rs");
        assert_eq!(top.len(), 2);
        Ok(())
    }

    #[test]
    fn depth_limit_is_respected() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let deep = dir.path().join("1/2/3");
        fs::create_dir_all(&deep)?;
        fs::write(dir.path().join("1/top.txt"), b"x")?;
        fs::write(deep.join("bottom.txt"), b"x")?;

        let opts = StatsOptions {
            max_depth: 1,
            ..StatsOptions::default()
        };
        let stats = collect(dir.path(), &opts);
        assert_eq!(stats.total_files, 1);
        assert_eq!(stats.total_dirs, 2);
        Ok(())
    }

    #[test]
    fn file_cap_marks_truncation() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for i in 0..25 {
            fs::write(dir.path().join(format!("f{i}.log")), vec![0u8; i])?;
        }
        let opts = StatsOptions {
            max_files: 10,
            ..StatsOptions::default()
        };
        let stats = collect(dir.path(), &opts);
        assert_eq!(stats.total_files, 10);
        assert!(stats.truncated);
        assert!(stats.largest.len() <= 10);
        Ok(())
    }

    #[test]
    fn empty_directory_has_zero_average() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let stats = collect(dir.path(), &StatsOptions::default());
        assert_eq!(stats.average_file_size(), 0);
        assert!(stats.top_extensions(5).is_empty());
        Ok(())
    }
}
