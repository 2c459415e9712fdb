//! Serializable color representation.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// Opacity in the `0.0..=1.0` range.
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// CSS hex notation without alpha, e.g. `#000000`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(SerializableColor::black().to_hex(), "#000000");
        assert_eq!(SerializableColor::new(255, 16, 1, 255).to_hex(), "#ff1001");
    }

    #[test]
    fn test_peniko_conversion() {
        let color = SerializableColor::new(10, 20, 30, 255);
        let peniko: Color = color.into();
        assert_eq!(SerializableColor::from(peniko), color);
    }

    #[test]
    fn test_opacity() {
        assert!((SerializableColor::black().opacity() - 1.0).abs() < f64::EPSILON);
        assert!(SerializableColor::new(0, 0, 0, 0).opacity().abs() < f64::EPSILON);
    }
}
