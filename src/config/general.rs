//! The general configuration settings for superfile.
//!
//! [General] is deserialized from the `[general]` table and converted into
//! [InternalGeneral], which holds validated values.

use crate::app::nav::{DEFAULT_PAGE_SIZE, MIN_PAGE_SIZE};
use crate::core::find::DEFAULT_MAX_RESULTS;
use crate::core::fm::{ListingConfig, SortKey};

use serde::Deserialize;

const MAX_PAGE_SIZE: usize = 500;
const MAX_SEARCH_RESULTS_LIMIT: usize = 10_000;
const DEFAULT_PREVIEW_LINES: usize = 500;

/// Which key decoder to use.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Terminal events through crossterm.
    #[default]
    Events,
    /// Raw bytes from stdin.
    Bytes,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    show_hidden: bool,
    sort_by: SortKey,
    reverse_sort: bool,
    page_size: usize,
    max_search_results: usize,
    preview_lines: usize,
    input: InputMode,
}

impl Default for General {
    fn default() -> Self {
        General {
            show_hidden: false,
            sort_by: SortKey::Name,
            reverse_sort: false,
            page_size: DEFAULT_PAGE_SIZE,
            max_search_results: DEFAULT_MAX_RESULTS,
            preview_lines: DEFAULT_PREVIEW_LINES,
            input: InputMode::Events,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InternalGeneral {
    listing: ListingConfig,
    page_size: usize,
    max_search_results: usize,
    preview_lines: usize,
    input: InputMode,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        Self {
            listing: ListingConfig {
                show_hidden: g.show_hidden,
                sort_key: g.sort_by,
                reverse: g.reverse_sort,
            },
            page_size: clamp_setting("page_size", g.page_size, MIN_PAGE_SIZE, MAX_PAGE_SIZE),
            max_search_results: clamp_setting(
                "max_search_results",
                g.max_search_results,
                1,
                MAX_SEARCH_RESULTS_LIMIT,
            ),
            preview_lines: g.preview_lines.max(1),
            input: g.input,
        }
    }
}

impl InternalGeneral {
    /// Listing options the session starts with.
    #[inline]
    pub fn listing(&self) -> ListingConfig {
        self.listing
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn max_search_results(&self) -> usize {
        self.max_search_results
    }

    #[inline]
    pub fn preview_lines(&self) -> usize {
        self.preview_lines
    }

    #[inline]
    pub fn input(&self) -> InputMode {
        self.input
    }
}

fn clamp_setting(name: &str, value: usize, min: usize, max: usize) -> usize {
    let clamped = value.clamp(min, max);
    if clamped != value {
        eprintln!(
            "[Warning] {}={} out of range ({}..={}), clamped to {}",
            name, value, min, max, clamped
        );
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_values_are_clamped() {
        let raw: General = toml::from_str("page_size = 0\nmax_search_results = 999999").unwrap();
        let general = InternalGeneral::from(raw);
        assert_eq!(general.page_size(), MIN_PAGE_SIZE);
        assert_eq!(general.max_search_results(), MAX_SEARCH_RESULTS_LIMIT);
    }

    #[test]
    fn single_row_pages_are_raised() {
        let raw: General = toml::from_str("page_size = 1").unwrap();
        assert_eq!(InternalGeneral::from(raw).page_size(), 2);

        let raw: General = toml::from_str("page_size = 2").unwrap();
        assert_eq!(InternalGeneral::from(raw).page_size(), 2);
    }

    #[test]
    fn listing_fields_map_through() {
        let raw: General =
            toml::from_str("show_hidden = true\nsort_by = \"size\"\nreverse_sort = true\ninput = \"bytes\"")
                .unwrap();
        let general = InternalGeneral::from(raw);
        assert_eq!(
            general.listing(),
            ListingConfig {
                show_hidden: true,
                sort_key: SortKey::Size,
                reverse: true
            }
        );
        assert_eq!(general.input(), InputMode::Bytes);
        assert_eq!(general.page_size(), DEFAULT_PAGE_SIZE);
    }
}
