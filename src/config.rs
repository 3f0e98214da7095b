use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::Grid;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";
const LOG_FILE_NAME: &str = "grid-snake.log";

/// Terminal window title.
pub const WINDOW_TITLE: &str = "Snake game";

/// Cell edge length in pixels.
pub const DEFAULT_CELL_SIZE: u16 = 40;

/// Board width in pixels.
pub const DEFAULT_BOARD_WIDTH: u32 = 1000;

/// Board height in pixels.
pub const DEFAULT_BOARD_HEIGHT: u32 = 800;

/// Delay between simulation ticks in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Column and row of the snake's first segment.
pub const START_CELL: (i32, i32) = (5, 5);

pub const BACKGROUND_COLOR: Color = Color::Rgb(110, 110, 5);

pub const SCORE_TEXT_COLOR: Color = Color::Rgb(200, 200, 200);

pub const GAME_OVER_TEXT_COLOR: Color = Color::Rgb(255, 255, 255);

/// Asset names resolved at startup.
pub mod asset_names {
    pub const BACKGROUND: &str = "background";
    pub const SEGMENT: &str = "segment";
    pub const FOOD: &str = "food";
    pub const MUSIC: &str = "background_music";
    pub const CUE_FOOD: &str = "ding";
    pub const CUE_CRASH: &str = "crash";
}

/// Runtime settings, layered as defaults, then config file, then CLI flags.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cell_size: u16,
    pub board_width: u32,
    pub board_height: u32,
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
    pub muted: bool,
    pub assets: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
            muted: false,
            assets: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from `explicit`, or from the default location.
    ///
    /// A missing file at the default location yields defaults. A missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => load_from_path(path, true),
            None => match default_config_path() {
                Some(path) => load_from_path(&path, false),
                None => Ok(Self::default()),
            },
        }
    }

    /// Builds the board geometry, validating the dimensions.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.cell_size, self.board_width, self.board_height)
    }

    pub fn tick_interval(&self) -> Result<Duration, ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(Duration::from_millis(self.tick_interval_ms))
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Returns the platform-correct log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

fn load_from_path(path: &Path, required: bool) -> Result<GameConfig, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
            return Ok(GameConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
