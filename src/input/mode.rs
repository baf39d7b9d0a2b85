//! Drawing mode selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How strokes are drawn and whether they accumulate.
///
/// Free-draw keeps every finished stroke until the canvas is cleared. The two
/// other modes show only the current gesture: the first finger down of a new
/// gesture wipes whatever the previous one left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DrawingMode {
    /// Connected lines, strokes accumulate (default)
    #[default]
    FreeDraw,
    /// Connected lines, only the current gesture is shown
    PolylineOnly,
    /// One filled dot per sample, only the current gesture is shown
    DotOnly,
}

impl DrawingMode {
    /// Whether finished strokes survive the start of the next gesture.
    pub fn accumulates(&self) -> bool {
        matches!(self, Self::FreeDraw)
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FreeDraw => "draw",
            Self::PolylineOnly => "line",
            Self::DotOnly => "dot",
        }
    }
}

impl std::str::FromStr for DrawingMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draw" | "free-draw" | "freedraw" => Ok(Self::FreeDraw),
            "line" | "polyline" | "polyline-only" => Ok(Self::PolylineOnly),
            "dot" | "dots" | "dot-only" => Ok(Self::DotOnly),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_mode_is_free_draw() {
        assert_eq!(DrawingMode::default(), DrawingMode::FreeDraw);
        assert!(DrawingMode::default().accumulates());
        assert!(!DrawingMode::DotOnly.accumulates());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(DrawingMode::from_str("draw").unwrap(), DrawingMode::FreeDraw);
        assert_eq!(DrawingMode::from_str("Line").unwrap(), DrawingMode::PolylineOnly);
        assert_eq!(DrawingMode::from_str("DOT-ONLY").unwrap(), DrawingMode::DotOnly);
        assert!(DrawingMode::from_str("spray").is_err());
    }

    #[test]
    fn test_labels_round_trip() {
        for mode in [DrawingMode::FreeDraw, DrawingMode::PolylineOnly, DrawingMode::DotOnly] {
            assert_eq!(DrawingMode::from_str(mode.label()).unwrap(), mode);
        }
    }
}
