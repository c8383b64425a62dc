//! Color theme for the dashboard.
//!
//! A theme is a palette of named colors plus an optional table width. It is
//! loaded once and passed down to the renderers explicitly.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

/// Panel titles.
pub const TITLE: &str = "orange";
/// Panel borders.
pub const BORDER: &str = "purple";
/// Row labels.
pub const LABEL: &str = "pink";
/// Highlighted values.
pub const VALUE: &str = "cyan";
/// Positive modifiers and set marks.
pub const GOOD: &str = "green";
/// Negative modifiers and failures.
pub const BAD: &str = "red";
/// Inactive entries.
pub const MUTED: &str = "dark gray";
/// Secondary text.
pub const DIM: &str = "light gray";

const FALLBACK: Rgb = Rgb(0xF8, 0xF8, 0xF2);

const DEFAULT_PALETTE: [(&str, Rgb); 11] = [
    ("black", Rgb(0x28, 0x2A, 0x36)),
    ("dark gray", Rgb(0x44, 0x47, 0x5A)),
    ("white", Rgb(0xF8, 0xF8, 0xF2)),
    ("light gray", Rgb(0x62, 0x72, 0xA4)),
    ("cyan", Rgb(0x8B, 0xE9, 0xFD)),
    ("green", Rgb(0x50, 0xFA, 0x7B)),
    ("orange", Rgb(0xFF, 0xB8, 0x6C)),
    ("pink", Rgb(0xFF, 0x79, 0xC6)),
    ("purple", Rgb(0xBD, 0x93, 0xF9)),
    ("red", Rgb(0xFF, 0x55, 0x55)),
    ("yellow", Rgb(0xF1, 0xFA, 0x8C)),
];

/// A 24-bit color parsed from `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| format!("invalid color \"{value}\": expected #RRGGBB"))?;
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| format!("invalid color \"{value}\": expected #RRGGBB"))
        };
        Ok(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl From<Rgb> for colored::Color {
    fn from(c: Rgb) -> Self {
        colored::Color::TrueColor {
            r: c.0,
            g: c.1,
            b: c.2,
        }
    }
}

impl From<Rgb> for comfy_table::Color {
    fn from(c: Rgb) -> Self {
        comfy_table::Color::Rgb {
            r: c.0,
            g: c.1,
            b: c.2,
        }
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(c: Rgb) -> Self {
        ratatui::style::Color::Rgb(c.0, c.1, c.2)
    }
}

/// On-disk shape of a theme file.
#[derive(Debug, Default, Deserialize)]
struct ThemeFile {
    #[serde(default)]
    theme: BTreeMap<String, Rgb>,
    #[serde(default)]
    width: Option<u16>,
}

/// Named colors and layout settings for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    palette: BTreeMap<String, Rgb>,
    /// Fixed table width for `show`; `None` fits the terminal.
    pub width: Option<u16>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE
                .iter()
                .map(|(name, rgb)| (name.to_string(), *rgb))
                .collect(),
            width: None,
        }
    }
}

impl Theme {
    /// Parse a theme from JSON. Colors not named in the file keep their
    /// default values.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let file: ThemeFile =
            serde_json::from_str(text).map_err(|e| format!("invalid theme: {e}"))?;
        let mut theme = Self::default();
        theme.palette.extend(file.theme);
        theme.width = file.width;
        Ok(theme)
    }

    /// Load a theme file, or the default theme when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read theme {}: {e}", path.display()))?;
        let theme = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), colors = theme.palette.len(), "loaded theme");
        Ok(theme)
    }

    /// Look up a color by name; unknown names render as white.
    pub fn color(&self, name: &str) -> Rgb {
        self.palette.get(name).copied().unwrap_or(FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_dashboard_roles() {
        let theme = Theme::default();
        for role in [TITLE, BORDER, LABEL, VALUE, GOOD, BAD, MUTED, DIM] {
            assert_ne!(theme.color(role), FALLBACK, "{role}");
        }
    }

    #[test]
    fn parses_hex() {
        assert_eq!(Rgb::try_from("#FF79C6".to_string()).unwrap(), Rgb(255, 121, 198));
        assert!(Rgb::try_from("FF79C6".to_string()).is_err());
        assert!(Rgb::try_from("#GG0000".to_string()).is_err());
        assert!(Rgb::try_from("#FFF".to_string()).is_err());
    }

    #[test]
    fn file_overrides_merge_with_defaults() {
        let theme =
            Theme::from_json(r##"{ "theme": { "pink": "#000000" }, "width": 120 }"##).unwrap();
        assert_eq!(theme.color("pink"), Rgb(0, 0, 0));
        assert_eq!(theme.color("cyan"), Rgb(0x8B, 0xE9, 0xFD));
        assert_eq!(theme.width, Some(120));
    }

    #[test]
    fn bad_color_is_an_error() {
        let err = Theme::from_json(r#"{ "theme": { "pink": "hotpink" } }"#).unwrap_err();
        assert!(err.contains("invalid theme"));
    }

    #[test]
    fn unknown_color_falls_back() {
        assert_eq!(Theme::default().color("chartreuse"), FALLBACK);
    }
}
