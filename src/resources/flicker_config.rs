//! Flicker sequence configuration.
//!
//! A [`FlickerConfig`] describes one flicker sequence: the random duration
//! ranges for each phase, how many cycles to run, and what state to leave the
//! light in afterwards. Configs are validated up front so the state machine
//! never has to deal with inverted or negative ranges at runtime.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "flicker.json";

/// Errors raised while building or loading a [`FlickerConfig`].
#[derive(Error, Debug)]
pub enum FlickerConfigError {
    #[error("{name}: minimum {min} is greater than maximum {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{name}: duration {value} must be a non-negative number of seconds that fits a Duration")]
    InvalidDuration { name: &'static str, value: f32 },
    #[error("Failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parameters for one flicker sequence. All durations are in seconds.
#[derive(Resource, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct FlickerConfig {
    /// Minimum time the light holds its state during a flicker.
    pub min_flicker_duration: f32,
    /// Maximum time the light holds its state during a flicker.
    pub max_flicker_duration: f32,
    /// Minimum gap between flickers.
    pub min_off_duration: f32,
    /// Maximum gap between flickers.
    pub max_off_duration: f32,
    /// Number of flicker cycles before the sequence completes.
    /// Zero runs a single cycle, same as one.
    pub repeat_count: u32,
    /// Final light state once the sequence completes or is stopped.
    pub stay_on_after_complete: bool,
    /// Start flickering as soon as the component is added to an entity.
    pub start_on_spawn: bool,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            min_flicker_duration: 0.5,
            max_flicker_duration: 1.5,
            min_off_duration: 0.1,
            max_off_duration: 0.2,
            repeat_count: 10,
            stay_on_after_complete: false,
            start_on_spawn: true,
        }
    }
}

impl FlickerConfig {
    /// Builds a config from explicit ranges, rejecting invalid bounds.
    pub fn new(
        flicker: RangeInclusive<f32>,
        off: RangeInclusive<f32>,
        repeat_count: u32,
        stay_on_after_complete: bool,
    ) -> Result<Self, FlickerConfigError> {
        let config = Self {
            min_flicker_duration: *flicker.start(),
            max_flicker_duration: *flicker.end(),
            min_off_duration: *off.start(),
            max_off_duration: *off.end(),
            repeat_count,
            stay_on_after_complete,
            ..default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with `start_on_spawn` set.
    pub fn with_start_on_spawn(mut self, start_on_spawn: bool) -> Self {
        self.start_on_spawn = start_on_spawn;
        self
    }

    /// Checks that both ranges are ordered and hold finite, non-negative values.
    pub fn validate(&self) -> Result<(), FlickerConfigError> {
        check_range(
            "flicker duration",
            self.min_flicker_duration,
            self.max_flicker_duration,
        )?;
        check_range("off duration", self.min_off_duration, self.max_off_duration)
    }

    pub fn flicker_range(&self) -> RangeInclusive<f32> {
        self.min_flicker_duration..=self.max_flicker_duration
    }

    pub fn off_range(&self) -> RangeInclusive<f32> {
        self.min_off_duration..=self.max_off_duration
    }

    /// Reads and validates a JSON config file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, FlickerConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| FlickerConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|source| FlickerConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        info!("Loaded flicker config from {:?}", path);
        Ok(config)
    }

    /// Loads from `path` if given, else from the default location, falling back
    /// to [`FlickerConfig::default`] when no file exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, FlickerConfigError> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        let Some(path) = Self::default_path() else {
            warn!("Could not determine config directory, using default flicker config");
            return Ok(Self::default());
        };

        if !path.exists() {
            info!("No flicker config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        Self::load_from_file(&path)
    }

    /// Platform-specific location of the config file.
    ///
    /// - macOS: ~/Library/Application Support/light_flicker/
    /// - Linux: ~/.config/light_flicker/
    /// - Windows: %APPDATA%/light_flicker/
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("light_flicker");
            path.push(CONFIG_FILE_NAME);
            path
        })
    }
}

fn check_range(name: &'static str, min: f32, max: f32) -> Result<(), FlickerConfigError> {
    for value in [min, max] {
        if value < 0.0 || Duration::try_from_secs_f32(value).is_err() {
            return Err(FlickerConfigError::InvalidDuration { name, value });
        }
    }
    if min > max {
        return Err(FlickerConfigError::InvertedRange { name, min, max });
    }
    Ok(())
}
