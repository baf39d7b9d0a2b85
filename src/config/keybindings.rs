//! Keybinding configuration types and parsing.
//!
//! Every session action is bound to one or more keys, configurable from
//! `config.toml`. Bindings are parsed once at startup into a lookup map.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Leave the session
    Exit,
    /// Drop every stroke and blank the surface
    ClearCanvas,

    // Drawing modes
    FreeDrawMode,
    PolylineMode,
    DotMode,

    // Stroke width
    IncreaseWidth,
    DecreaseWidth,
}

/// Errors produced while parsing keybinding strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyBindingError {
    #[error("Empty keybinding string")]
    Empty,

    #[error("No key specified in: {0}")]
    MissingKey(String),

    #[error("Duplicate keybinding '{binding}' assigned to both {first:?} and {second:?}")]
    Duplicate {
        binding: String,
        first: Action,
        second: Action,
    },
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Q", "Space" or "d".
    /// Modifiers can appear in any order and spaces around '+' are ignored.
    pub fn parse(s: &str) -> Result<Self, KeyBindingError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyBindingError::Empty);
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(KeyBindingError::MissingKey(s.to_string()));
        }

        // "Ctrl++" splits into trailing empty parts; the key is '+'
        let key = key_parts.join("+");
        let key = if key.is_empty() { "+".to_string() } else { key };

        Ok(Self {
            key: key.to_lowercase(),
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// quit = ["Escape", "Ctrl+Q"]
/// clear = ["Space"]
/// grow = ["h", "+"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    /// Switch to free-draw mode
    #[serde(default = "default_draw_mode")]
    pub draw_mode: Vec<String>,

    /// Switch to polyline-only mode
    #[serde(default = "default_line_mode")]
    pub line_mode: Vec<String>,

    /// Switch to dot-only mode
    #[serde(default = "default_dot_mode")]
    pub dot_mode: Vec<String>,

    /// Increase stroke width by one pixel
    #[serde(default = "default_grow")]
    pub grow: Vec<String>,

    /// Decrease stroke width by one pixel (never below 1)
    #[serde(default = "default_shrink")]
    pub shrink: Vec<String>,

    /// Clear every stroke
    #[serde(default = "default_clear")]
    pub clear: Vec<String>,

    /// Exit the session
    #[serde(default = "default_quit")]
    pub quit: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            draw_mode: default_draw_mode(),
            line_mode: default_line_mode(),
            dot_mode: default_dot_mode(),
            grow: default_grow(),
            shrink: default_shrink(),
            clear: default_clear(),
            quit: default_quit(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, KeyBindingError> {
        let mut map = HashMap::new();

        let groups: [(&[String], Action); 7] = [
            (&self.draw_mode, Action::FreeDrawMode),
            (&self.line_mode, Action::PolylineMode),
            (&self.dot_mode, Action::DotMode),
            (&self.grow, Action::IncreaseWidth),
            (&self.shrink, Action::DecreaseWidth),
            (&self.clear, Action::ClearCanvas),
            (&self.quit, Action::Exit),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing) = map.insert(binding, action) {
                    return Err(KeyBindingError::Duplicate {
                        binding: binding_str.clone(),
                        first: existing,
                        second: action,
                    });
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_draw_mode() -> Vec<String> {
    vec!["d".to_string()]
}

fn default_line_mode() -> Vec<String> {
    vec!["l".to_string()]
}

fn default_dot_mode() -> Vec<String> {
    vec!["p".to_string()]
}

fn default_grow() -> Vec<String> {
    vec!["h".to_string()]
}

fn default_shrink() -> Vec<String> {
    vec!["t".to_string()]
}

fn default_clear() -> Vec<String> {
    vec!["Space".to_string()]
}

fn default_quit() -> Vec<String> {
    vec!["Escape".to_string(), "Ctrl+Q".to_string()]
}
