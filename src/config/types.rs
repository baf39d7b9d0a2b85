//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::color::DEFAULT_PALETTE_SIZE;
use crate::input::DrawingMode;
use crate::touch::TouchBackend;
use crate::touch::sdk::STDIN_ENDPOINT;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls how the session starts. Mode and width can be changed at runtime
/// using keybindings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial drawing mode: "free-draw", "polyline-only" or "dot-only"
    #[serde(default)]
    pub default_mode: DrawingMode,

    /// Initial line width / dot diameter in pixels (valid range: 1 - 200)
    #[serde(default = "default_width")]
    pub default_width: u32,

    /// Number of distinct per-contact colors (valid range: 1 - 256)
    #[serde(default = "default_palette_size")]
    pub palette_size: usize,

    /// Color the surface is cleared to, named or `[r, g, b]`
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_mode: DrawingMode::default(),
            default_width: default_width(),
            palette_size: default_palette_size(),
            background: default_background(),
        }
    }
}

/// Touch source settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TouchConfig {
    /// Where touches come from: "native" (compositor multi-touch) or "sdk"
    #[serde(default)]
    pub backend: TouchBackend,

    /// SDK gesture server endpoint: a Unix socket path, or "-" for stdin
    #[serde(default = "default_sdk_endpoint")]
    pub sdk_endpoint: String,

    /// Coordinate range `[width, height]` the SDK server reports in.
    /// Incoming x/y are divided by it before clamping into [0, 1].
    #[serde(default = "default_sdk_extent")]
    pub sdk_extent: [f64; 2],
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            backend: TouchBackend::default(),
            sdk_endpoint: default_sdk_endpoint(),
            sdk_extent: default_sdk_extent(),
        }
    }
}

/// Performance tuning options.
///
/// Most users won't need to change these from their defaults.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceConfig {
    /// How long the loop sleeps per iteration while no finger is down,
    /// in milliseconds (valid range: 1 - 100)
    #[serde(default = "default_idle_sleep_ms")]
    pub idle_sleep_ms: u64,

    /// Number of SHM buffers (valid range: 2 - 4)
    #[serde(default = "default_buffer_count")]
    pub buffer_count: u32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            idle_sleep_ms: default_idle_sleep_ms(),
            buffer_count: default_buffer_count(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_width() -> u32 {
    3
}

fn default_palette_size() -> usize {
    DEFAULT_PALETTE_SIZE
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_sdk_endpoint() -> String {
    STDIN_ENDPOINT.to_string()
}

fn default_sdk_extent() -> [f64; 2] {
    [1.0, 1.0]
}

fn default_idle_sleep_ms() -> u64 {
    10
}

fn default_buffer_count() -> u32 {
    2
}
