//! The main config loading module for superfile.
//!
//! Reads `superfile.toml` into [RawConfig] and converts it into the [Config]
//! used at runtime. Also writes the default configuration for `sf --init`.

use crate::config::{Display, General, InternalGeneral, Keys, Theme};
use crate::utils::get_home;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Configuration exactly as read from the toml file.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    display: Display,
    theme: Theme,
    keys: Keys,
}

/// Processed configuration used by superfile.
#[derive(Debug, Clone)]
pub struct Config {
    general: InternalGeneral,
    display: Display,
    theme: Theme,
    /// The `[theme]` table as written, kept to re-resolve against another preset.
    user_theme: Theme,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            display: raw.display,
            theme: raw.theme.clone().with_overrides(),
            user_theme: raw.theme,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Loads the configuration from [Config::default_path].
    /// A missing or invalid file yields the internal defaults.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[superfile] Error parsing config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.display
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Switches to a preset theme, keeping the file's color overrides.
    pub fn set_theme(&mut self, name: &str) {
        self.theme = self.user_theme.clone().with_preset(name);
    }

    /// Determine the default configuration file path.
    /// Checks the SUPERFILE_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME, then defaults to ~/.config/superfile/superfile.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("SUPERFILE_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("superfile/superfile.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/superfile/superfile.toml");
        }
        PathBuf::from("superfile.toml")
    }

    /// Writes the default configuration to `path`. Fails if the file exists.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

const DEFAULT_TOML: &str = r##"# superfile.toml - default configuration for superfile

# Note:
# Commented values are the internal defaults.
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan").

[general]
# show_hidden = false
# sort_by = "name"          # "name", "type", "size" or "date"
# reverse_sort = false
# page_size = 20
# max_search_results = 100
# preview_lines = 500
# input = "events"          # "events" or "bytes"

[display]
# icons = true
# help_line = true
# borders = true
# border_shape = "rounded"  # "square", "rounded", "double" or "thick"
# show_size = true
# show_modified = true

[theme]
name = "monokai"            # "monokai", "dracula", "github-dark", "solarized-dark", "solarized-light"
# selection_icon = "→"

# [theme.accent]
# fg = "default"
# bg = "default"

# [theme.selection]
# fg = "default"
# bg = "default"

# [theme.directory]
# fg = "default"

# [theme.entry]
# fg = "default"

# [theme.path]
# fg = "default"

# [theme.status_line]
# fg = "default"
# bg = "default"

# [theme.muted]
# fg = "default"

# [theme.error]
# fg = "default"

# [keys]
# up = ["Up", "k"]
# down = ["Down", "j"]
# left = ["Left"]
# right = ["Right", "space"]
# enter = ["Enter"]
# tab = ["Tab"]
# search = ["/"]
# toggle_hidden = ["h"]
# sort = ["s"]
# refresh = ["r"]
# favorite = ["f"]
# quit = ["q"]
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_file_gives_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::parse("")?;
        assert_eq!(config.general().page_size(), 20);
        assert!(config.display().icons());
        assert!(config.theme().name().is_none());
        Ok(())
    }

    #[test]
    fn generated_default_parses() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/superfile.toml");
        Config::generate_default(&path)?;
        let config = Config::from_file(&path)?;
        assert_eq!(config.theme().name(), Some("monokai"));
        assert_eq!(config.keys().quit(), ["q"]);

        let again = Config::generate_default(&path);
        assert_eq!(again.map_err(|e| e.kind()), Err(io::ErrorKind::AlreadyExists));
        Ok(())
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::parse("[general\npage_size = ").is_err());
    }

    #[test]
    fn set_theme_overrides_file_preset() -> Result<(), Box<dyn std::error::Error>> {
        let mut config =
            Config::parse("[theme]\nname = \"monokai\"\n[theme.path]\nfg = \"yellow\"")?;
        config.set_theme("solarized-light");
        assert_eq!(config.theme().name(), Some("solarized-light"));
        assert_eq!(
            config.theme().selection_style().bg,
            Some(ratatui::style::Color::Rgb(238, 232, 213))
        );
        assert_eq!(
            config.theme().path_style().fg,
            Some(ratatui::style::Color::Yellow)
        );
        Ok(())
    }
}
