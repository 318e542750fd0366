//! Display configuration options for superfile
//!
//! Read from the `[display]` table of superfile.toml.

use ratatui::widgets::BorderType;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Display {
    icons: bool,
    help_line: bool,
    borders: bool,
    border_shape: BorderShape,
    show_size: bool,
    show_modified: bool,
}

impl Display {
    #[inline]
    pub fn icons(&self) -> bool {
        self.icons
    }

    #[inline]
    pub fn help_line(&self) -> bool {
        self.help_line
    }

    #[inline]
    pub fn borders(&self) -> bool {
        self.borders
    }

    #[inline]
    pub fn border_type(&self) -> BorderType {
        self.border_shape.as_border_type()
    }

    #[inline]
    pub fn show_size(&self) -> bool {
        self.show_size
    }

    #[inline]
    pub fn show_modified(&self) -> bool {
        self.show_modified
    }
}

impl Default for Display {
    fn default() -> Self {
        Display {
            icons: true,
            help_line: true,
            borders: true,
            border_shape: BorderShape::Rounded,
            show_size: true,
            show_modified: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BorderShape {
    Square,
    #[default]
    Rounded,
    Double,
    Thick,
}

impl BorderShape {
    pub fn as_border_type(self) -> BorderType {
        match self {
            BorderShape::Square => BorderType::Plain,
            BorderShape::Rounded => BorderType::Rounded,
            BorderShape::Double => BorderType::Double,
            BorderShape::Thick => BorderType::Thick,
        }
    }
}
