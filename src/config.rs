//! Runtime configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

pub const DATA_PATH_VAR: &str = "LAUNCH_DASH_DATA";
pub const SLIDER_STEP_VAR: &str = "LAUNCH_DASH_SLIDER_STEP";

pub const DEFAULT_DATA_PATH: &str = "spacex_launch_dash.csv";
pub const DEFAULT_SLIDER_STEP: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Launch table to load at startup (`.csv`, `.json` or `.parquet`).
    pub data_path: PathBuf,
    /// Payload slider step in kg.
    pub slider_step: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            slider_step: DEFAULT_SLIDER_STEP,
        }
    }
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `LAUNCH_DASH_DATA` (optional, default: `spacex_launch_dash.csv`)
    /// - `LAUNCH_DASH_SLIDER_STEP` (optional, default: 1000): positive, in kg
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = match lookup(DATA_PATH_VAR) {
            Some(v) if v.trim().is_empty() => {
                return Err(ConfigError::EmptyValue { key: DATA_PATH_VAR })
            }
            Some(v) => PathBuf::from(v),
            None => PathBuf::from(DEFAULT_DATA_PATH),
        };

        let slider_step = match lookup(SLIDER_STEP_VAR) {
            Some(v) => v
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|s| s.is_finite() && *s > 0.0)
                .ok_or(ConfigError::InvalidNumber {
                    key: SLIDER_STEP_VAR,
                    value: v,
                })?,
            None => DEFAULT_SLIDER_STEP,
        };

        Ok(Self {
            data_path,
            slider_step,
        })
    }
}
