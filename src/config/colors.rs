//! Color configuration for the TUI.

use std::collections::HashMap;

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

/// Badge colors for the known categories, as `#RRGGBB`.
const CATEGORY_DEFAULTS: [(&str, &str); 18] = [
    ("normal", "#94a3b8"),
    ("fire", "#f97316"),
    ("water", "#38bdf8"),
    ("electric", "#fde047"),
    ("grass", "#22c55e"),
    ("ice", "#67e8f9"),
    ("fighting", "#ea580c"),
    ("poison", "#a78bfa"),
    ("ground", "#eab308"),
    ("flying", "#60a5fa"),
    ("psychic", "#fb7185"),
    ("bug", "#84cc16"),
    ("rock", "#a16207"),
    ("ghost", "#8b5cf6"),
    ("dragon", "#0ea5e9"),
    ("dark", "#334155"),
    ("steel", "#9ca3af"),
    ("fairy", "#f9a8d4"),
];

/// Configuration for all TUI colors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub active_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub inactive_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub favorite: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub muted: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub stat_bar: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
    /// Overrides merged over the built-in category palette.
    #[serde(deserialize_with = "deserialize_color_map")]
    pub categories: HashMap<String, Color>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            active_border: Color::Rgb(249, 115, 22),
            inactive_border: Color::DarkGray,
            selection_bg: Color::Rgb(34, 197, 94),
            selection_fg: Color::Black,
            favorite: Color::Yellow,
            muted: Color::DarkGray,
            stat_bar: Color::Rgb(249, 115, 22),
            error: Color::LightRed,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
            categories: HashMap::new(),
        }
    }
}

impl ColorConfig {
    /// Badge color for `category`: user override, then built-in palette, then gray.
    pub fn category(&self, category: &str) -> Color {
        if let Some(color) = self.categories.get(category) {
            return *color;
        }
        CATEGORY_DEFAULTS
            .iter()
            .find(|(name, _)| *name == category)
            .and_then(|(_, hex)| parse_hex_color(hex).ok())
            .unwrap_or(Color::Gray)
    }
}

/// Custom deserializer for Color that supports named colors and hex codes.
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

fn deserialize_color_map<'de, D>(deserializer: D) -> Result<HashMap<String, Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, String>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(name, value)| {
            parse_color_string(&value)
                .map(|color| (name.to_lowercase(), color))
                .map_err(de::Error::custom)
        })
        .collect()
}

/// Parse a color string into a ratatui Color.
///
/// Supports:
/// - Named colors: "Black", "Red", "Green", "Yellow", "Blue", "Magenta", "Cyan", "Gray",
///   "DarkGray", "LightRed", "LightGreen", "LightYellow", "LightBlue", "LightMagenta",
///   "LightCyan", "White", "Reset"
/// - Hex colors: "#RRGGBB" or "#RGB"
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

/// Parse "#RRGGBB" or "#RGB" into a ratatui Color.
fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(|| format!("Invalid hex color: {}", s))
    };

    match hex.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(format!("Invalid hex color format: {}", s)),
    }
}
