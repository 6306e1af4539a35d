//! Configuration management for dexterm.
//!
//! Configuration is read from `~/.config/dexterm/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::catalog::paginator::{DEFAULT_PAGE_SIZE, PAGE_SIZE_CHOICES};
use crate::fetcher::http_fetcher::DEFAULT_TIMEOUT_SECS;
use crate::fetcher::loader::{DEFAULT_BASE_URL, DEFAULT_BATCH_SIZE, DEFAULT_LIMIT, DEFAULT_RESOURCE};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Where the catalog comes from and how it is fetched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub resource: String,
    /// Number of items requested from the index.
    pub limit: usize,
    /// Detail requests issued together before waiting.
    pub batch_size: usize,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
            limit: DEFAULT_LIMIT,
            batch_size: DEFAULT_BATCH_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub page_size: usize,
    pub page_size_choices: Vec<usize>,
    /// Quiet period after the last keystroke before a search runs.
    pub search_debounce_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_choices: PAGE_SIZE_CHOICES.to_vec(),
            search_debounce_ms: 300,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/dexterm/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("dexterm").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!("Wrote default config to {}", path.display());
        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# dexterm configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1", "/"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[api]
base_url = "https://pokeapi.co/api/v2"
resource = "pokemon"
# How many entries to load at startup
limit = 200
# Detail requests sent together; the next batch starts when all have settled
batch_size = 20
timeout_secs = 10

[display]
page_size = 12
page_size_choices = [6, 12, 24, 48]
search_debounce_ms = 300

[colors]
active_border = "#f97316"
inactive_border = "DarkGray"
selection_bg = "#22c55e"
selection_fg = "Black"
favorite = "Yellow"
muted = "DarkGray"
stat_bar = "#f97316"
error = "LightRed"
status_fg = "White"
status_bg = "DarkGray"

# Override individual category badge colors
[colors.categories]
# fire = "#f97316"

[keybindings]
quit = ["q", "Ctrl+c"]
close = ["Esc"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "Right", "PageDown"]
prev_page = ["p", "Left", "PageUp"]
first_page = ["Home"]
last_page = ["End"]
select = ["Enter"]
search = ["/"]
categories = ["c"]
cycle_generation = ["g"]
cycle_sort = ["s"]
cycle_page_size = ["z"]
toggle_favorite = ["f", "Space"]
toggle_favorites_only = ["F"]
reset_filters = ["x"]
open_image = ["o"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
