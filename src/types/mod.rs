use serde::{Deserialize, Serialize};

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

/// An RGBA colour with floating point channels, nominally in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorF {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl ColorF {
    pub const WHITE: ColorF = ColorF::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque colour.
    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

impl Default for ColorF {
    fn default() -> Self {
        Self::WHITE
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::fmt::Display for ColorF {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_sets_full_alpha() {
        let red = ColorF::opaque(1.0, 0.0, 0.0);
        assert_eq!(red.a, 1.0);
        assert_eq!(red, ColorF::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vec2::new(3.0, 4.5).to_string(), "(3, 4.5)");
        assert_eq!(ColorF::WHITE.to_string(), "rgba(1, 1, 1, 1)");
    }
}
