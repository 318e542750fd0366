//! Preset themes for superfile
//!
//! Each preset is built from a [Palette] by [make_theme]. The names match the
//! `--theme` choices of the command line.

use crate::config::Theme;
use crate::config::theme::{Palette, make_theme};

pub const PRESET_NAMES: [&str; 5] = [
    "monokai",
    "dracula",
    "github-dark",
    "solarized-dark",
    "solarized-light",
];

const MONOKAI: Palette = Palette {
    base: (39, 40, 34),
    surface: (49, 51, 43),
    overlay: (117, 113, 94),
    primary: (249, 38, 114),
    secondary: (166, 226, 46),
    directory: (102, 217, 239),
};

const DRACULA: Palette = Palette {
    base: (40, 42, 54),
    surface: (68, 71, 90),
    overlay: (139, 233, 253),
    primary: (255, 121, 198),
    secondary: (80, 250, 123),
    directory: (189, 147, 249),
};

const GITHUB_DARK: Palette = Palette {
    base: (13, 17, 23),
    surface: (33, 38, 45),
    overlay: (139, 148, 158),
    primary: (255, 123, 114),
    secondary: (126, 231, 135),
    directory: (88, 166, 255),
};

const SOLARIZED_DARK: Palette = Palette {
    base: (0, 43, 54),
    surface: (7, 54, 66),
    overlay: (101, 123, 131),
    primary: (38, 139, 210),
    secondary: (211, 54, 130),
    directory: (42, 161, 152),
};

const SOLARIZED_LIGHT: Palette = Palette {
    base: (253, 246, 227),
    surface: (238, 232, 213),
    overlay: (101, 123, 131),
    primary: (38, 139, 210),
    secondary: (211, 54, 130),
    directory: (42, 161, 152),
};

pub(crate) fn monokai() -> Theme {
    make_theme("monokai", MONOKAI, "→")
}

pub(crate) fn dracula() -> Theme {
    make_theme("dracula", DRACULA, "→")
}

pub(crate) fn github_dark() -> Theme {
    make_theme("github-dark", GITHUB_DARK, "▶")
}

pub(crate) fn solarized_dark() -> Theme {
    make_theme("solarized-dark", SOLARIZED_DARK, "→")
}

pub(crate) fn solarized_light() -> Theme {
    make_theme("solarized-light", SOLARIZED_LIGHT, "→")
}

/// Looks up a preset by name.
pub(crate) fn preset(name: &str) -> Option<Theme> {
    match name {
        "monokai" => Some(monokai()),
        "dracula" => Some(dracula()),
        "github-dark" => Some(github_dark()),
        "solarized-dark" => Some(solarized_dark()),
        "solarized-light" => Some(solarized_light()),
        _ => None,
    }
}
