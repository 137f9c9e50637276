//! Light and dark palettes and the global style sheet they are written to.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Names of the style variables every palette assigns.
pub const STYLE_VARIABLES: [&str; 11] = [
    "menu-background",
    "menu-text",
    "menu-border",
    "menu-hover",
    "dropdown-background",
    "dropdown-border",
    "dropdown-hover",
    "dropdown-text",
    "background-color",
    "text-color",
    "secondary-text-color",
];

const LIGHT_PALETTE: [Color; 11] = [
    rgb(0xffffff),
    rgb(0x333333),
    rgb(0xe0e0e0),
    rgb(0xf5f5f5),
    rgb(0xffffff),
    rgb(0xe0e0e0),
    rgb(0xf5f5f5),
    rgb(0x333333),
    rgb(0xfafafa),
    rgb(0x333333),
    rgb(0x666666),
];

const DARK_PALETTE: [Color; 11] = [
    rgb(0x2d3748),
    rgb(0xe2e8f0),
    rgb(0x4a5568),
    rgb(0x4a5568),
    rgb(0x2d3748),
    rgb(0x4a5568),
    rgb(0x4a5568),
    rgb(0xe2e8f0),
    rgb(0x1a202c),
    rgb(0xe2e8f0),
    rgb(0xa0aec0),
];

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown theme '{0}' (expected 'light' or 'dark')")]
pub struct ParseThemeError(String);

/// Visual theme of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Variable assignments for this theme, in `STYLE_VARIABLES` order.
    pub fn palette(self) -> impl Iterator<Item = (&'static str, Color)> {
        let colors = match self {
            Theme::Light => LIGHT_PALETTE,
            Theme::Dark => DARK_PALETTE,
        };
        STYLE_VARIABLES.into_iter().zip(colors)
    }

    /// Capitalized name used on the theme switch control.
    pub fn title(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

/// Process-wide table of named colors.
///
/// Every widget reads its colors from here, so writing a palette into the
/// sheet re-themes the whole screen on the next frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    properties: Vec<(&'static str, Color)>,
}

impl StyleSheet {
    /// Assign a variable, replacing any previous value.
    pub fn set_property(&mut self, name: &'static str, color: Color) {
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = color,
            None => self.properties.push((name, color)),
        }
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<Color> {
        self.properties
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
    }

    /// Look up a variable, falling back to the terminal default.
    pub fn color(&self, name: &str) -> Color {
        self.get(name).unwrap_or(Color::Reset)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_theme_toggled() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("DARK".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_theme_serde_lowercase() {
        let json = serde_json::to_string(&Theme::Light).unwrap();
        assert_eq!(json, "\"light\"");
        let theme: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(theme, Theme::Dark);
    }

    #[test]
    fn test_palette_covers_every_variable() {
        let names: Vec<&str> = Theme::Light.palette().map(|(n, _)| n).collect();
        assert_eq!(names, STYLE_VARIABLES);
        assert_eq!(Theme::Dark.palette().count(), 11);
    }

    #[test]
    fn test_palette_values() {
        let dark: Vec<Color> = Theme::Dark.palette().map(|(_, c)| c).collect();
        assert_eq!(dark[0], Color::Rgb(0x2d, 0x37, 0x48));
        assert_eq!(dark[8], Color::Rgb(0x1a, 0x20, 0x2c));

        let light: Vec<Color> = Theme::Light.palette().map(|(_, c)| c).collect();
        assert_eq!(light[10], Color::Rgb(0x66, 0x66, 0x66));
    }

    #[test]
    fn test_style_sheet_set_replaces() {
        let mut sheet = StyleSheet::default();
        sheet.set_property("text-color", Color::Red);
        sheet.set_property("text-color", Color::Blue);

        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get("text-color"), Some(Color::Blue));
        assert_eq!(sheet.color("missing"), Color::Reset);
    }
}
