//! Display formatting for sizes, timestamps, permissions and fixed-width cells.
//!
//! Everything here is pure and used by both the listing table and the detail screens.

use chrono::{DateTime, Local};
use humansize::{WINDOWS, format_size as humansize_format};
use unicode_width::UnicodeWidthChar;

use std::fs::Metadata;
use std::time::SystemTime;

/// Formats a byte count with 1024-based units ("1.50 KB").
pub fn format_size(bytes: u64) -> String {
    humansize_format(bytes, WINDOWS)
}

/// Size column for the listing table. Directories show their child count instead.
pub fn format_listing_size(size: Option<u64>, children: Option<Option<usize>>) -> String {
    match (children, size) {
        (Some(Some(count)), _) => format!("{} items", count),
        (Some(None), _) => "Inaccessible".to_string(),
        (None, Some(bytes)) => format_size(bytes),
        (None, None) => "-".to_string(),
    }
}

/// Short timestamp used in the listing table.
pub fn format_short_time(time: SystemTime) -> String {
    let dt: DateTime<Local> = DateTime::from(time);
    dt.format("%d/%m/%Y %H:%M").to_string()
}

/// Full timestamp used on the detail screens, "-" when unknown.
pub fn format_file_time(time: Option<SystemTime>) -> String {
    time.map(|t| {
        let dt: DateTime<Local> = DateTime::from(t);
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    })
    .unwrap_or_else(|| "-".to_string())
}

/// Symbolic permission string such as `-rwxr-xr-x`.
pub fn format_attributes(meta: &Metadata) -> String {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let file_type = meta.file_type();
        let first = if file_type.is_dir() {
            'd'
        } else if file_type.is_symlink() {
            'l'
        } else {
            '-'
        };
        let mode = meta.permissions().mode();
        let mut chars = [first, '-', '-', '-', '-', '-', '-', '-', '-', '-'];
        for (i, shift) in [6u32, 3, 0].into_iter().enumerate() {
            let base = 1 + i * 3;
            if (mode >> (shift + 2)) & 1 != 0 {
                chars[base] = 'r';
            }
            if (mode >> (shift + 1)) & 1 != 0 {
                chars[base + 1] = 'w';
            }
            if (mode >> shift) & 1 != 0 {
                chars[base + 2] = 'x';
            }
        }
        chars.iter().collect()
    }
    #[cfg(not(unix))]
    {
        let kind = if meta.is_dir() { 'd' } else { '-' };
        let write = if meta.permissions().readonly() { '-' } else { 'w' };
        format!("{kind}r{write}")
    }
}

/// Permission bits in octal ("755"). Not available outside unix.
pub fn format_mode_octal(meta: &Metadata) -> Option<String> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(format!("{:03o}", meta.permissions().mode() & 0o777))
    }
    #[cfg(not(unix))]
    {
        let _ = meta;
        None
    }
}

/// Cleans `line` and fits it into exactly `width` terminal cells.
///
/// Control characters are dropped, tabs expand to the next multiple of 4, and the result
/// is truncated or right-padded with spaces.
pub fn sanitize_to_exact_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut current_w = 0;

    for ch in line.chars() {
        if ch == '\t' {
            let space_count = 4 - (current_w % 4);
            if current_w + space_count > width {
                break;
            }
            out.push_str(&" ".repeat(space_count));
            current_w += space_count;
            continue;
        }
        if ch.is_control() {
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if current_w + w > width {
            break;
        }
        out.push(ch);
        current_w += w;
    }

    if current_w < width {
        out.push_str(&" ".repeat(width - current_w));
    }
    out
}

/// Truncates `text` to at most `width` cells, ending in `…` when cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_use_binary_steps() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert!(format_size(1536).ends_with("KB"), "{}", format_size(1536));
        assert!(format_size(5 * 1024 * 1024).ends_with("MB"));
    }

    #[test]
    fn listing_size_column() {
        assert_eq!(format_listing_size(None, Some(Some(3))), "3 items");
        assert_eq!(format_listing_size(None, Some(None)), "Inaccessible");
        assert_eq!(format_listing_size(Some(10), None), "10 B");
    }

    #[test]
    fn exact_width_pads_and_truncates() {
        assert_eq!(sanitize_to_exact_width("ab", 4), "ab  ");
        assert_eq!(sanitize_to_exact_width("abcdef", 3), "abc");
        assert_eq!(sanitize_to_exact_width("\tx", 6), "    x ");
        assert_eq!(sanitize_to_exact_width("a\u{7}b", 2), "ab");
    }

    #[test]
    fn truncation_marks_cut_text() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
