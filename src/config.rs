//! Tunables, loaded from an optional TOML file.
//!
//! Every field carries a default, so a file only needs the keys it changes:
//!
//! ```toml
//! [gameplay]
//! starting_lives = 5
//! boss_kill_threshold = 20
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Env var consulted when no path is given on the command line.
pub const CONFIG_ENV: &str = "BALLOON_BLASTER_CONFIG";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub gameplay: GameplayConfig,
    pub runtime: RuntimeConfig,
}

/// Logical playfield size, in the same units as entity sizes and speeds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Rules of the game. Speeds are per frame, durations in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub player_speed: f32,
    pub player_size: f32,
    pub bullet_speed: f32,
    pub bullet_size: f32,
    pub starting_lives: u32,
    pub spawn_interval_ms: f64,
    /// Multiplied into the spawn interval after every spawn.
    pub spawn_decay: f64,
    /// Balloons never spawn closer than this to the player.
    pub min_spawn_distance: f32,
    pub boss_kill_threshold: u32,
    pub boss_health: u32,
    pub boss_size: f32,
    pub boss_y: f32,
    pub boss_warning_ms: u64,
    pub power_up_interval_ms: u64,
    /// Clicks closer together than this count toward the cheat limit.
    pub click_window_ms: u64,
    pub click_limit: u32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            player_size: 20.0,
            bullet_speed: 10.0,
            bullet_size: 5.0,
            starting_lives: 3,
            spawn_interval_ms: 2000.0,
            spawn_decay: 0.99,
            min_spawn_distance: 100.0,
            boss_kill_threshold: 50,
            boss_health: 50,
            boss_size: 60.0,
            boss_y: 100.0,
            boss_warning_ms: 3000,
            power_up_interval_ms: 10_000,
            click_window_ms: 100,
            click_limit: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Simulated time per frame; also the render pacing.
    pub frame_ms: u64,
    pub log_file: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            log_file: PathBuf::from("balloon_blaster.log"),
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| GameError::ConfigParse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents, &path.display().to_string())
    }

    /// Resolve the config: explicit path, then `BALLOON_BLASTER_CONFIG`,
    /// then built-in defaults.
    pub fn resolve(cli_path: Option<PathBuf>) -> Result<Self> {
        let path = cli_path.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(p) => Self::load_from_file(&p),
            None => Ok(Self::default()),
        }
    }
}
