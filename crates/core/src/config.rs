//! Tunable generation and play parameters, loadable from TOML.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::MAX_DIMENSION;

/// Beyond this the sight circle is larger than any allowed grid.
pub const MAX_SIGHT_RADIUS: f64 = MAX_DIMENSION as f64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub width: usize,
    pub height: usize,
    pub room_count: usize,
    pub room_attempts: usize,
    pub corridors_to_leave: usize,
    pub walls_to_remove: usize,
    pub straight_bias_percent: u32,
    pub corridor_door_divisor: usize,
    pub room_door_divisor: usize,
    pub sight_radius: f64,
    pub ticks_for_door_to_close: u64,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 55,
            height: 55,
            room_count: 25,
            room_attempts: 300,
            corridors_to_leave: 550,
            walls_to_remove: 90,
            straight_bias_percent: 75,
            corridor_door_divisor: 6,
            room_door_divisor: 10,
            sight_radius: 5.5,
            ticks_for_door_to_close: 5,
        }
    }
}

impl DungeonConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    /// Rejects values the core cannot work with. Sizes that are merely too small for rooms
    /// are accepted and produce sparser dungeons.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value > MAX_DIMENSION {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be at most {MAX_DIMENSION}, got {value}"),
                });
            }
        }
        if !self.sight_radius.is_finite()
            || self.sight_radius < 0.0
            || self.sight_radius > MAX_SIGHT_RADIUS
        {
            return Err(ConfigError::InvalidValue {
                field: "sight_radius",
                reason: format!(
                    "expected a number within 0..={MAX_SIGHT_RADIUS}, got {}",
                    self.sight_radius
                ),
            });
        }
        if self.corridor_door_divisor == 0 {
            return Err(ConfigError::InvalidValue {
                field: "corridor_door_divisor",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.room_door_divisor == 0 {
            return Err(ConfigError::InvalidValue {
                field: "room_door_divisor",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.straight_bias_percent > 100 {
            return Err(ConfigError::InvalidValue {
                field: "straight_bias_percent",
                reason: format!("must be within 0..=100, got {}", self.straight_bias_percent),
            });
        }
        Ok(())
    }
}
