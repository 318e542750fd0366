//! Recursive name search below a directory.
//!
//! [search] walks the tree in name order and reports every entry whose name contains
//! the query, case-insensitively. Hidden directories are not descended unless
//! hidden entries are enabled.

use crate::core::fm::is_hidden_name;

use walkdir::{DirEntry, WalkDir};

use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_RESULTS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub max_results: usize,
    pub show_hidden: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            max_results: DEFAULT_MAX_RESULTS,
            show_hidden: false,
        }
    }
}

/// A single match, with its path relative to the search root for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    path: PathBuf,
    relative: String,
    is_dir: bool,
}

impl SearchHit {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn relative(&self) -> &str {
        &self.relative
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Line shown in the result picker.
    pub fn label(&self) -> String {
        let icon = if self.is_dir { "📁" } else { "📄" };
        format!("{} {}", icon, self.relative)
    }
}

pub fn search(root: &Path, query: &str, options: &SearchOptions) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || options.max_results == 0 {
        return Vec::new();
    }

    let show_hidden = options.show_hidden;
    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || show_hidden || !is_hidden_name(e.file_name()));

    let mut hits = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable search entry");
                continue;
            }
        };
        if !matches(&entry, &needle) {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        hits.push(SearchHit {
            relative: normalize_relative_path(rel),
            is_dir: entry.file_type().is_dir(),
            path: entry.into_path(),
        });
        if hits.len() >= options.max_results {
            break;
        }
    }

    tracing::debug!(root = %root.display(), query, hits = hits.len(), "search finished");
    hits
}

fn matches(entry: &DirEntry, needle: &str) -> bool {
    entry
        .file_name()
        .to_string_lossy()
        .to_lowercase()
        .contains(needle)
}

/// Relative path with `/` separators on every platform.
pub fn normalize_relative_path(path: &Path) -> String {
    let rel = path.to_string_lossy().into_owned();
    if cfg!(windows) {
        rel.replace('\\', "/")
    } else {
        rel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn finds_nested_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("a/deep"))?;
        File::create(dir.path().join("a/deep/Report.TXT"))?;
        File::create(dir.path().join("other.md"))?;

        let hits = search(dir.path(), "report", &SearchOptions::default());
        assert_eq!(hits.len(), 1, "{:?}", hits);
        assert_eq!(hits[0].relative(), "a/deep/Report.TXT");
        assert!(!hits[0].is_dir());
        assert_eq!(hits[0].path(), dir.path().join("a/deep/Report.TXT"));
        Ok(())
    }

    #[test]
    fn hidden_dirs_are_pruned() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join(".cache"))?;
        File::create(dir.path().join(".cache/match.log"))?;
        File::create(dir.path().join("match.txt"))?;

        let hits = search(dir.path(), "match", &SearchOptions::default());
        assert_eq!(hits.len(), 1);

        let opts = SearchOptions {
            show_hidden: true,
            ..SearchOptions::default()
        };
        let hits = search(dir.path(), "match", &opts);
        assert_eq!(hits.len(), 2);
        Ok(())
    }

    #[test]
    fn results_are_capped_and_ordered() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for i in (0..20).rev() {
            File::create(dir.path().join(format!("item{:02}.txt", i)))?;
        }
        let opts = SearchOptions {
            max_results: 5,
            show_hidden: false,
        };
        let hits = search(dir.path(), "ITEM", &opts);
        let rels: Vec<_> = hits.iter().map(|h| h.relative()).collect();
        assert_eq!(rels, ["item00.txt", "item01.txt", "item02.txt", "item03.txt", "item04.txt"]);
        Ok(())
    }

    #[test]
    fn empty_query_returns_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("something.txt"))?;
        assert!(search(dir.path(), "", &SearchOptions::default()).is_empty());
        assert!(search(dir.path(), "   ", &SearchOptions::default()).is_empty());
        Ok(())
    }

    #[test]
    fn directories_match_too() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("crab_dir"))?;
        let hits = search(dir.path(), "crab", &SearchOptions::default());
        assert_eq!(hits.len(), 1);
        assert!(hits[0].is_dir());
        assert_eq!(hits[0].label(), "📁 crab_dir");
        Ok(())
    }
}
