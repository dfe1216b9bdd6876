//! Subset color representation

use std::fmt;

/// RGBA color of a subset, each component in `[0, 1]`
///
/// UGX stores it as the `color="r g b a"` attribute of a `<subset>` element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Create a color from four components
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    /// Build a color from 3 (opaque) or 4 components.
    pub fn from_components(c: &[f64]) -> Option<Self> {
        match *c {
            [r, g, b] => Some(Color::rgb(r, g, b)),
            [r, g, b, a] => Some(Color::new(r, g, b, a)),
            _ => None,
        }
    }

    /// Components in r, g, b, a order
    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Whether every component lies in `[0, 1]`
    pub fn is_normalized(&self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// Color of the subset created when a grid gets its first subset
    pub const DEFAULT_SUBSET: Color = Color::rgb(1.0, 0.0, 0.0);

    /// Placeholder color of the mark subset handler entries
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
