use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_PRIMARY_COLOR: &str = "#007bff";
pub const DEFAULT_PRIMARY_DARK: &str = "#0056b3";
const DARKEN_PERCENT: u32 = 20;

/// Cosmetic preferences of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSettings {
    pub dark_mode: bool,
    pub primary_color: String,
    pub primary_dark: String,
    #[serde(default)]
    pub page_background: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            primary_dark: DEFAULT_PRIMARY_DARK.to_string(),
            page_background: None,
            profile_photo: None,
        }
    }
}

impl ThemeSettings {
    /// Sets dark mode to `value`, or flips it when `None`. Returns the new state.
    pub fn toggle_dark_mode(&mut self, value: Option<bool>) -> bool {
        self.dark_mode = value.unwrap_or(!self.dark_mode);
        self.dark_mode
    }

    pub fn set_primary_color(&mut self, color: &str) -> Result<()> {
        let color = color.trim();
        if color.is_empty() {
            return Err(Error::InvalidInput("A colour is required".to_string()));
        }
        self.primary_color = color.to_string();
        self.primary_dark = darken_color(color, DARKEN_PERCENT);
        Ok(())
    }

    pub fn set_page_background(&mut self, color: Option<&str>) {
        self.page_background = color.map(str::to_string);
    }

    pub fn set_profile_photo(&mut self, url: Option<&str>) {
        self.profile_photo = url.map(str::to_string);
    }
}

/// Darkens a `#rrggbb` colour by `percent`. Anything else yields the default
/// dark primary.
pub fn darken_color(hex: &str, percent: u32) -> String {
    let digits = match hex.strip_prefix('#') {
        Some(d) if d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()) => d,
        _ => return DEFAULT_PRIMARY_DARK.to_string(),
    };
    let factor = 100 - percent.min(100);
    let channel = |range: std::ops::Range<usize>| {
        let value = u32::from_str_radix(&digits[range], 16).unwrap_or(0);
        value * factor / 100
    };
    format!("#{:02x}{:02x}{:02x}", channel(0..2), channel(2..4), channel(4..6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darkens_each_channel() {
        assert_eq!(darken_color("#007bff", 20), "#0062cc");
        assert_eq!(darken_color("#ffffff", 0), "#ffffff");
        assert_eq!(darken_color("#ffffff", 100), "#000000");
    }

    #[test]
    fn bad_colours_use_default() {
        assert_eq!(darken_color("red", 20), DEFAULT_PRIMARY_DARK);
        assert_eq!(darken_color("#fff", 20), DEFAULT_PRIMARY_DARK);
        assert_eq!(darken_color("#gggggg", 20), DEFAULT_PRIMARY_DARK);
    }

    #[test]
    fn toggle_flips_or_sets() {
        let mut theme = ThemeSettings::default();
        assert!(theme.toggle_dark_mode(None));
        assert!(!theme.toggle_dark_mode(None));
        assert!(theme.toggle_dark_mode(Some(true)));
        assert!(theme.toggle_dark_mode(Some(true)));
    }

    #[test]
    fn primary_colour_updates_dark_variant() {
        let mut theme = ThemeSettings::default();
        theme.set_primary_color("#28a745").unwrap();
        assert_eq!(theme.primary_color, "#28a745");
        assert_eq!(theme.primary_dark, "#208537");
        assert!(theme.set_primary_color(" ").is_err());
    }
}
