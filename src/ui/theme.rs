use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub muted: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub selection_bg: String,
    pub selection_fg: String,
    pub done: String,
    pub pending: String,
    pub easy: String,
    pub medium: String,
    pub hard: String,
    pub banner_bg: String,
    pub banner_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes override bundled ones
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("dsatrack")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                if let Ok(theme) = toml::from_str::<Theme>(content) {
                    return Some(theme);
                }
            }
        }

        None
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("catppuccin-mocha").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            muted: "#585b70".to_string(),
            accent: "#89b4fa".to_string(),
            accent_dim: "#45475a".to_string(),
            border: "#45475a".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            selection_bg: "#45475a".to_string(),
            selection_fg: "#f5e0dc".to_string(),
            done: "#a6e3a1".to_string(),
            pending: "#bac2de".to_string(),
            easy: "#a6e3a1".to_string(),
            medium: "#f9e2af".to_string(),
            hard: "#f38ba8".to_string(),
            banner_bg: "#313244".to_string(),
            banner_fg: "#b4befe".to_string(),
            bar_filled: "#89b4fa".to_string(),
            bar_empty: "#313244".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn selection_bg(&self) -> Color { Self::parse_color(&self.selection_bg) }
    pub fn selection_fg(&self) -> Color { Self::parse_color(&self.selection_fg) }
    pub fn done(&self) -> Color { Self::parse_color(&self.done) }
    pub fn pending(&self) -> Color { Self::parse_color(&self.pending) }
    pub fn easy(&self) -> Color { Self::parse_color(&self.easy) }
    pub fn medium(&self) -> Color { Self::parse_color(&self.medium) }
    pub fn hard(&self) -> Color { Self::parse_color(&self.hard) }
    pub fn banner_bg(&self) -> Color { Self::parse_color(&self.banner_bg) }
    pub fn banner_fg(&self) -> Color { Self::parse_color(&self.banner_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_themes_parse() {
        for name in Theme::available_themes() {
            let theme = Theme::load(&name).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn parse_color_handles_malformed_hex() {
        assert_eq!(ThemeColors::parse_color("#a6e3a1"), Color::Rgb(0xa6, 0xe3, 0xa1));
        assert_eq!(ThemeColors::parse_color("nonsense"), Color::White);
        assert_eq!(ThemeColors::parse_color("#fff"), Color::White);
    }
}
