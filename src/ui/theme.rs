use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use rust_embed::Embed;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

pub const DEFAULT_THEME: &str = "terminal-default";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// A theme color as written in theme files: `#rrggbb` or `reset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HexColor(pub Color);

impl HexColor {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("reset") {
            return Some(Self(Color::Reset));
        }
        let hex = value.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            _ => f.write_str("reset"),
        }
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        HexColor::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid color {raw:?}, expected #rrggbb")))
    }
}

macro_rules! theme_colors {
    ($($field:ident),+ $(,)?) => {
        #[derive(Clone, Debug, Serialize, Deserialize)]
        pub struct ThemeColors {
            $(pub $field: HexColor,)+
        }

        impl ThemeColors {
            $(
                pub fn $field(&self) -> Color {
                    self.$field.0
                }
            )+
        }
    };
}

theme_colors!(
    bg,
    fg,
    text_correct,
    text_incorrect,
    text_incorrect_bg,
    text_pending,
    text_cursor_bg,
    text_cursor_fg,
    accent,
    border,
    header_bg,
    header_fg,
    error,
    warning,
    success,
);

fn user_theme_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("keyrush").join("themes"))
}

impl Theme {
    /// Look up a theme by name. A file in the user theme directory wins over
    /// the bundled theme of the same name.
    pub fn load(name: &str) -> Option<Self> {
        Self::load_with_user_dir(name, user_theme_dir().as_deref())
    }

    /// A user theme that fails to parse rejects the name outright; it does not
    /// fall through to the bundled theme it shadows.
    pub fn load_with_user_dir(name: &str, user_dir: Option<&Path>) -> Option<Self> {
        let file_name = format!("{name}.toml");

        if let Some(path) = user_dir.map(|dir| dir.join(&file_name))
            && let Ok(content) = fs::read_to_string(&path)
        {
            return match toml::from_str::<Theme>(&content) {
                Ok(theme) => Some(theme),
                Err(e) => {
                    log::warn!("Rejecting user theme {}: {e}", path.display());
                    None
                }
            };
        }

        let asset = ThemeAssets::get(&file_name)?;
        let content = std::str::from_utf8(asset.data.as_ref()).ok()?;
        match toml::from_str::<Theme>(content) {
            Ok(theme) => Some(theme),
            Err(e) => {
                log::error!("Bundled theme {name} is invalid: {e}");
                None
            }
        }
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(str::to_string))
            .collect();
        names.sort();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    /// Terminal colors for text, fixed accents for state.
    fn default() -> Self {
        let rgb = |r, g, b| HexColor(Color::Rgb(r, g, b));
        let reset = HexColor(Color::Reset);
        Self {
            bg: reset,
            fg: reset,
            text_correct: rgb(0x5f, 0xd7, 0x87),
            text_incorrect: rgb(0xff, 0x5f, 0x5f),
            text_incorrect_bg: rgb(0x3a, 0x1c, 0x1c),
            text_pending: rgb(0x80, 0x80, 0x80),
            text_cursor_bg: rgb(0x5f, 0xaf, 0xff),
            text_cursor_fg: rgb(0x00, 0x00, 0x00),
            accent: rgb(0x5f, 0xaf, 0xff),
            border: rgb(0x4e, 0x4e, 0x4e),
            header_bg: reset,
            header_fg: reset,
            error: rgb(0xff, 0x5f, 0x5f),
            warning: rgb(0xff, 0xd7, 0x5f),
            success: rgb(0x5f, 0xd7, 0x87),
        }
    }
}
