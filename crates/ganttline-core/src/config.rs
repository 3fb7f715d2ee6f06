//! TOML-based layout and interaction configuration.
//!
//! Stores the tunables of the timeline engine:
//! - Day-width geometry (base width, minimum, fill-to-viewport threshold)
//! - Zoom bounds and step
//! - Interaction defaults (gap search bound, new item duration, throttle)
//!
//! Configuration is stored at `~/.config/ganttline/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, CoreError, Result};

const MAX_DATE_PADDING_DAYS: i64 = 3650;

/// Day-width and lane geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_base_day_width")]
    pub base_day_width: f64,
    #[serde(default = "default_min_day_width")]
    pub min_day_width: f64,
    /// Below this zoom the timeline stretches to fill the container.
    #[serde(default = "default_fill_zoom_threshold")]
    pub fill_zoom_threshold: f64,
    /// Horizontal pixels reserved when stretching to fill the container.
    #[serde(default = "default_fill_padding")]
    pub fill_padding: f64,
    /// Days added before the earliest start and after the latest end.
    #[serde(default = "default_date_padding_days")]
    pub date_padding_days: i64,
    #[serde(default = "default_lane_height")]
    pub lane_height: f64,
    #[serde(default)]
    pub lane_gap: f64,
}

/// Zoom bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    #[serde(default = "default_zoom_min")]
    pub min: f64,
    #[serde(default = "default_zoom_max")]
    pub max: f64,
    #[serde(default = "default_zoom_step")]
    pub step: f64,
    #[serde(default = "default_zoom_initial")]
    pub initial: f64,
}

/// Interaction defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Maximum forward shift (days) probed when resolving a lane move.
    #[serde(default = "default_gap_search_days")]
    pub gap_search_days: u32,
    #[serde(default = "default_duration_days")]
    pub default_duration_days: i64,
    #[serde(default = "default_resize_throttle_ms")]
    pub resize_throttle_ms: u64,
    #[serde(default = "default_item_name")]
    pub default_item_name: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/ganttline/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
}

// Default functions
fn default_base_day_width() -> f64 {
    40.0
}
fn default_min_day_width() -> f64 {
    5.0
}
fn default_fill_zoom_threshold() -> f64 {
    0.5
}
fn default_fill_padding() -> f64 {
    20.0
}
fn default_date_padding_days() -> i64 {
    5
}
fn default_lane_height() -> f64 {
    60.0
}
fn default_zoom_min() -> f64 {
    0.125
}
fn default_zoom_max() -> f64 {
    3.0
}
fn default_zoom_step() -> f64 {
    0.2
}
fn default_zoom_initial() -> f64 {
    1.0
}
fn default_gap_search_days() -> u32 {
    30
}
fn default_duration_days() -> i64 {
    7
}
fn default_resize_throttle_ms() -> u64 {
    50
}
fn default_item_name() -> String {
    "New Event".into()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_day_width: default_base_day_width(),
            min_day_width: default_min_day_width(),
            fill_zoom_threshold: default_fill_zoom_threshold(),
            fill_padding: default_fill_padding(),
            date_padding_days: default_date_padding_days(),
            lane_height: default_lane_height(),
            lane_gap: 0.0,
        }
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: default_zoom_min(),
            max: default_zoom_max(),
            step: default_zoom_step(),
            initial: default_zoom_initial(),
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            gap_search_days: default_gap_search_days(),
            default_duration_days: default_duration_days(),
            resize_throttle_ms: default_resize_throttle_ms(),
            default_item_name: default_item_name(),
        }
    }
}

impl InteractionConfig {
    pub fn resize_throttle(&self) -> Duration {
        Duration::from_millis(self.resize_throttle_ms)
    }
}

/// Returns `~/.config/ganttline[-dev]/` based on GANTTLINE_ENV.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("GANTTLINE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("ganttline-dev")
    } else {
        base_dir.join("ganttline")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirectoryUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<i64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        let n = value
                            .parse::<f64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    }
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default on-disk location.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(error = %e, "falling back to default configuration");
                Self::default()
            }
        }
    }

    /// Reject values the geometry cannot work with.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };

        // NaN slips through every ordered comparison below.
        let floats = [
            ("layout.base_day_width", self.layout.base_day_width),
            ("layout.min_day_width", self.layout.min_day_width),
            ("layout.fill_zoom_threshold", self.layout.fill_zoom_threshold),
            ("layout.fill_padding", self.layout.fill_padding),
            ("layout.lane_height", self.layout.lane_height),
            ("layout.lane_gap", self.layout.lane_gap),
            ("zoom.min", self.zoom.min),
            ("zoom.max", self.zoom.max),
            ("zoom.step", self.zoom.step),
            ("zoom.initial", self.zoom.initial),
        ];
        if let Some((key, _)) = floats.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(key, "must be a finite number"));
        }

        if self.layout.min_day_width <= 0.0 {
            return Err(invalid("layout.min_day_width", "must be positive"));
        }
        if self.zoom.min <= 0.0 || self.zoom.min > self.zoom.max {
            return Err(invalid("zoom.min", "must be positive and not exceed zoom.max"));
        }
        if self.layout.lane_height <= 0.0 {
            return Err(invalid("layout.lane_height", "must be positive"));
        }
        if !(0..=MAX_DATE_PADDING_DAYS).contains(&self.layout.date_padding_days) {
            return Err(invalid("layout.date_padding_days", "must be between 0 and 3650"));
        }
        if self.interaction.default_duration_days < 1 {
            return Err(invalid("interaction.default_duration_days", "must be at least 1"));
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into the existing field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| {
            CoreError::Config(ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
