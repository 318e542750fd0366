//! Theme configuration options for superfile
//!
//! Defines the `[theme]` table of superfile.toml, the internal preset palettes and
//! the logic to apply user overrides on top of a preset.

use crate::config::presets::*;
use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use std::sync::LazyLock;

/// Theme configuration options
/// # Examples
/// ```toml
/// [theme]
/// name = "dracula"
/// [theme.directory]
/// fg = "cyan"
/// [theme.selection]
/// bg = "#303030"
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Theme {
    name: Option<String>,
    accent: ColorPair,
    selection: ColorPair,
    directory: ColorPair,
    entry: ColorPair,
    path: ColorPair,
    status_line: ColorPair,
    muted: ColorPair,
    error: ColorPair,
    selection_icon: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            name: None,
            accent: ColorPair {
                fg: Color::Cyan,
                ..ColorPair::default()
            },
            selection: ColorPair {
                bg: Color::Indexed(236),
                ..ColorPair::default()
            },
            directory: ColorPair {
                fg: Color::Blue,
                ..ColorPair::default()
            },
            entry: ColorPair::default(),
            path: ColorPair {
                fg: Color::Magenta,
                ..ColorPair::default()
            },
            status_line: ColorPair::default(),
            muted: ColorPair {
                fg: Color::DarkGray,
                ..ColorPair::default()
            },
            error: ColorPair {
                fg: Color::Red,
                ..ColorPair::default()
            },
            selection_icon: "→".into(),
        }
    }
}

/// Overrides a field in the target theme if the user changed it from the default.
macro_rules! override_if_changed {
    ($target:ident, $user:ident, $default:ident, $field:ident) => {
        if $user.$field != $default.$field {
            $target.$field = $user.$field.clone();
        }
    };
}

impl Theme {
    /// Shared default theme used as the fallback for Reset colors.
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn accent_style(&self) -> Style {
        self.accent.style_or(&Theme::internal_defaults().accent)
    }

    pub fn selection_style(&self) -> Style {
        self.selection
            .style_or(&Theme::internal_defaults().selection)
            .add_modifier(Modifier::BOLD)
    }

    pub fn directory_style(&self) -> Style {
        self.directory
            .style_or(&Theme::internal_defaults().directory)
    }

    pub fn entry_style(&self) -> Style {
        self.entry.style_or(&Theme::internal_defaults().entry)
    }

    pub fn path_style(&self) -> Style {
        self.path.style_or(&Theme::internal_defaults().path)
    }

    pub fn status_line_style(&self) -> Style {
        self.status_line
            .style_or(&Theme::internal_defaults().status_line)
    }

    pub fn muted_style(&self) -> Style {
        self.muted.style_or(&Theme::internal_defaults().muted)
    }

    pub fn error_style(&self) -> Style {
        self.error.style_or(&Theme::internal_defaults().error)
    }

    pub fn selection_icon(&self) -> &str {
        &self.selection_icon
    }

    /// Applies the user's fields on top of the named preset.
    /// Unknown or missing names leave the theme as it is.
    pub fn with_overrides(self) -> Self {
        match self.name.as_deref().and_then(preset) {
            Some(mut base) => {
                base.apply_user_overrides(self);
                base
            }
            None => self,
        }
    }

    /// Switches to the preset `name`, keeping the user's overrides.
    pub fn with_preset(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self.with_overrides()
    }

    fn apply_user_overrides(&mut self, user: Theme) {
        let defaults = Theme::default();

        override_if_changed!(self, user, defaults, accent);
        override_if_changed!(self, user, defaults, selection);
        override_if_changed!(self, user, defaults, directory);
        override_if_changed!(self, user, defaults, entry);
        override_if_changed!(self, user, defaults, path);
        override_if_changed!(self, user, defaults, status_line);
        override_if_changed!(self, user, defaults, muted);
        override_if_changed!(self, user, defaults, error);
        override_if_changed!(self, user, defaults, selection_icon);

        if user.name.is_some() {
            self.name = user.name.clone();
        }
    }
}

/// Foreground and background pair used by every themed element.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    /// Replaces Reset colors with those from `other`.
    pub fn resolve(&self, other: &ColorPair) -> Self {
        Self {
            fg: if self.fg == Color::Reset {
                other.fg
            } else {
                self.fg
            },
            bg: if self.bg == Color::Reset {
                other.bg
            } else {
                self.bg
            },
        }
    }

    pub fn style_or(&self, fallback: &ColorPair) -> Style {
        let resolved = self.resolve(fallback);
        Style::default().fg(resolved.fg).bg(resolved.bg)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}

fn rgb(c: (u8, u8, u8)) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// Palette from which every preset theme is derived by [make_theme].
pub struct Palette {
    pub base: (u8, u8, u8),
    pub surface: (u8, u8, u8),
    pub overlay: (u8, u8, u8),
    pub primary: (u8, u8, u8),
    pub secondary: (u8, u8, u8),
    pub directory: (u8, u8, u8),
}

pub fn make_theme(name: &str, palette: Palette, icon: &str) -> Theme {
    let primary = rgb(palette.primary);
    let secondary = rgb(palette.secondary);
    let muted = rgb(palette.overlay);
    let surface = rgb(palette.surface);
    let base_bg = rgb(palette.base);

    Theme {
        name: Some(name.to_string()),
        accent: ColorPair {
            fg: primary,
            ..ColorPair::default()
        },
        selection: ColorPair {
            bg: surface,
            ..ColorPair::default()
        },
        directory: ColorPair {
            fg: rgb(palette.directory),
            ..ColorPair::default()
        },
        entry: ColorPair::default(),
        path: ColorPair {
            fg: secondary,
            ..ColorPair::default()
        },
        status_line: ColorPair {
            fg: Color::Reset,
            bg: base_bg,
        },
        muted: ColorPair {
            fg: muted,
            ..ColorPair::default()
        },
        selection_icon: icon.to_string(),
        ..Theme::default()
    }
}
