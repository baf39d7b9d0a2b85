//! Configuration file support for touchscriber.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/touchscriber/config.toml`. Settings include drawing defaults,
//! the touch source, loop timing and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeyBindingError, KeybindingsConfig};
pub use types::{DrawingConfig, PerformanceConfig, TouchConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_mode = "polyline-only"
/// default_width = 4
/// background = [20, 20, 20]
///
/// [touch]
/// backend = "sdk"
/// sdk_endpoint = "/run/user/1000/gesture.sock"
/// sdk_extent = [1920.0, 1080.0]
///
/// [performance]
/// idle_sleep_ms = 10
///
/// [keybindings]
/// quit = ["Escape", "Ctrl+Q"]
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing defaults (mode, width, palette, background)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Touch source selection
    #[serde(default)]
    pub touch: TouchConfig,

    /// Performance tuning options
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Keybindings for session actions
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_width`: 1 - 200
    /// - `palette_size`: 1 - 256
    /// - `sdk_extent`: each component finite and > 0, otherwise 1.0
    /// - `idle_sleep_ms`: 1 - 100
    /// - `buffer_count`: 2 - 4
    fn validate_and_clamp(&mut self) {
        // Width: 1 - 200
        if !(1..=200).contains(&self.drawing.default_width) {
            warn!(
                "Invalid default_width {}, clamping to 1-200 range",
                self.drawing.default_width
            );
            self.drawing.default_width = self.drawing.default_width.clamp(1, 200);
        }

        // Palette: 1 - 256 colors
        if !(1..=256).contains(&self.drawing.palette_size) {
            warn!(
                "Invalid palette_size {}, clamping to 1-256 range",
                self.drawing.palette_size
            );
            self.drawing.palette_size = self.drawing.palette_size.clamp(1, 256);
        }

        for (i, extent) in self.touch.sdk_extent.iter_mut().enumerate() {
            if !extent.is_finite() || *extent <= 0.0 {
                warn!("Invalid sdk_extent[{}] = {}, using 1.0", i, extent);
                *extent = 1.0;
            }
        }

        // Idle sleep: 1 - 100 ms
        if !(1..=100).contains(&self.performance.idle_sleep_ms) {
            warn!(
                "Invalid idle_sleep_ms {}, clamping to 1-100 range",
                self.performance.idle_sleep_ms
            );
            self.performance.idle_sleep_ms = self.performance.idle_sleep_ms.clamp(1, 100);
        }

        // Buffer count: 2 - 4
        if !(2..=4).contains(&self.performance.buffer_count) {
            warn!(
                "Invalid buffer_count {}, clamping to 2-4 range",
                self.performance.buffer_count
            );
            self.performance.buffer_count = self.performance.buffer_count.clamp(2, 4);
        }

        if self.touch.sdk_endpoint.trim().is_empty() {
            warn!("Empty sdk_endpoint, falling back to stdin");
            self.touch.sdk_endpoint = crate::touch::sdk::STDIN_ENDPOINT.to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/touchscriber/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("touchscriber");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error here.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    fn from_toml(config_str: &str) -> Result<Self> {
        Ok(toml::from_str(config_str)?)
    }

    /// JSON schema describing `config.toml`.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
