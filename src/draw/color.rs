//! RGBA color type, named constants and the per-contact palette.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use touchscriber::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let semi_transparent_blue = Color { r: 0.0, g: 0.0, b: 1.0, a: 0.5 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque color from hue, saturation and value, all in `[0, 1]`.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let h = h.rem_euclid(1.0) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::new(r, g, b, 1.0)
    }

    /// Looks up one of the predefined colors by (case-insensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "red" => Some(RED),
            "green" => Some(GREEN),
            "blue" => Some(BLUE),
            "yellow" => Some(YELLOW),
            "white" => Some(WHITE),
            "black" => Some(BLACK),
            "transparent" => Some(TRANSPARENT),
            _ => None,
        }
    }
}

/// Predefined red color (R=1.0, G=0.0, B=0.0)
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Predefined green color (R=0.0, G=1.0, B=0.0)
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);

/// Predefined blue color (R=0.0, G=0.0, B=1.0)
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

/// Predefined yellow color (R=1.0, G=1.0, B=0.0)
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);

/// Predefined white color (R=1.0, G=1.0, B=1.0)
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Fully transparent color
pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

/// Default number of palette entries.
pub const DEFAULT_PALETTE_SIZE: usize = 32;

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

/// Fixed set of ink colors, one picked per contact id.
///
/// Hues are spread around the color wheel by the golden ratio so neighbouring
/// ids stay easy to tell apart, and the sequence is the same on every run.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Generates `size` colors; a size of zero is bumped to one.
    pub fn generate(size: usize) -> Self {
        let colors = (0..size.max(1))
            .map(|i| Color::from_hsv(i as f64 * GOLDEN_RATIO_CONJUGATE, 0.75, 0.9))
            .collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for a contact id, `contact_id % len`.
    pub fn color_for(&self, contact_id: u32) -> Color {
        self.colors[contact_id as usize % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::generate(DEFAULT_PALETTE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_primary_hues() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), RED);
        assert_eq!(Color::from_hsv(1.0 / 3.0, 1.0, 1.0).g, 1.0);
        assert_eq!(Color::from_hsv(2.0 / 3.0, 1.0, 1.0).b, 1.0);
    }

    #[test]
    fn palette_wraps_by_modulo() {
        let palette = Palette::generate(4);
        assert_eq!(palette.len(), 4);
        assert_eq!(palette.color_for(1), palette.color_for(5));
        assert_ne!(palette.color_for(1), palette.color_for(2));
    }

    #[test]
    fn palette_is_deterministic() {
        assert_eq!(Palette::generate(32), Palette::default());
    }

    #[test]
    fn zero_sized_palette_still_has_a_color() {
        let palette = Palette::generate(0);
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.color_for(7), palette.color_for(0));
    }

    #[test]
    fn named_colors_resolve() {
        assert_eq!(Color::from_name("White"), Some(WHITE));
        assert_eq!(Color::from_name("mauve"), None);
    }
}
