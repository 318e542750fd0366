//! Helpers for superfile.
//!
//! - Color parsing from names or hex codes
//! - Home directory lookup and `~` shortening for display
//! - Resolving the start directory from the command line

use ratatui::style::Color;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Parses a string (color name or hex) into a [Color].
///
/// Supports standard names (red, green, etc.) as well as hex values (#RRGGBB or #RGB).
/// Anything else resolves to [Color::Reset].
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        _ => s.strip_prefix('#').and_then(parse_hex).unwrap_or(Color::Reset),
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let expanded = match hex.len() {
        6 => hex.to_string(),
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        _ => return None,
    };
    let rgb = u32::from_str_radix(&expanded, 16).ok()?;
    Some(Color::Rgb(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    ))
}

pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Shortens the home directory prefix to `~` for display.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        let mut short = stripped.display().to_string();
        if short.starts_with(MAIN_SEPARATOR) {
            short.remove(0);
        }
        return format!("~{}{}", MAIN_SEPARATOR, short);
    }
    path.display().to_string()
}

/// Expands a leading `~` to the home directory.
pub fn expand_home_path(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = get_home()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// Turns the command-line path into an absolute directory path.
///
/// `None` means the current directory. Relative paths are resolved against it and
/// symlinks are resolved so parent navigation follows the real tree.
pub fn resolve_initial_dir(arg: Option<&Path>) -> std::io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let target = match arg {
        Some(p) => {
            let expanded = expand_home_path(p);
            if expanded.is_absolute() {
                expanded
            } else {
                cwd.join(expanded)
            }
        }
        None => cwd,
    };
    let canonical = target.canonicalize()?;
    Ok(strip_verbatim_prefix(canonical))
}

/// Removes the `\\?\` prefix `canonicalize` adds on Windows.
fn strip_verbatim_prefix(path: PathBuf) -> PathBuf {
    #[cfg(windows)]
    {
        let display = path.display().to_string();
        if let Some(stripped) = display.strip_prefix(r"\\?\") {
            return PathBuf::from(stripped);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn colors_by_name_and_hex() {
        assert_eq!(parse_color("Cyan"), Color::Cyan);
        assert_eq!(parse_color("#ff8000"), Color::Rgb(255, 128, 0));
        assert_eq!(parse_color("#0f0"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("#12"), Color::Reset);
        assert_eq!(parse_color("chartreuse"), Color::Reset);
    }

    #[test]
    fn initial_dir_resolves_absolute() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let resolved = resolve_initial_dir(Some(dir.path()))?;
        assert!(resolved.is_absolute());
        assert!(resolved.is_dir());
        Ok(())
    }

    #[test]
    fn initial_dir_rejects_missing() {
        assert!(resolve_initial_dir(Some(Path::new("/no/such/dir/at/all"))).is_err());
    }

    #[test]
    fn home_is_shortened() {
        if let Some(home) = get_home() {
            assert_eq!(shorten_home_path(&home), "~");
            let nested = home.join("docs");
            assert_eq!(
                shorten_home_path(&nested),
                format!("~{}docs", MAIN_SEPARATOR)
            );
        }
    }
}
