//! Visual configuration for point sets.
//!
//! A [`PointMaterial`] describes how one point set is drawn: point size,
//! tint and opacity. Every material is alpha blended. Colors are written as sRGB hex in configs and
//! converted to linear RGB before they reach the GPU.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An RGB color stored in sRGB space.
///
/// Serializes as a `"#rrggbb"` string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    rgb: [u8; 3],
}

impl Color {
    pub const WHITE: Color = Color::from_hex(0xffffff);

    /// Build a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            rgb: [
                ((hex >> 16) & 0xff) as u8,
                ((hex >> 8) & 0xff) as u8,
                (hex & 0xff) as u8,
            ],
        }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }

    /// Channels in linear space, ready for an sRGB render target.
    pub fn to_linear(self) -> Vec3 {
        Vec3::new(
            srgb_to_linear(self.rgb[0]),
            srgb_to_linear(self.rgb[1]),
            srgb_to_linear(self.rgb[2]),
        )
    }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value).ok_or_else(|| format!("expected a #rrggbb color, got {value:?}"))
    }
}

/// How a point set is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMaterial {
    /// Point size. World units when `size_attenuation` is on, pixels otherwise.
    pub size: f32,
    /// Shrink points with distance from the camera.
    pub size_attenuation: bool,
    /// Base tint, multiplied with per-point colors when `vertex_colors` is set.
    pub color: Color,
    /// Use the point set's own colors.
    pub vertex_colors: bool,
    pub opacity: f32,
}

impl PointMaterial {
    /// A translucent white material with size attenuation, the look every
    /// object in the scene starts from.
    pub fn new(size: f32, opacity: f32) -> Self {
        Self {
            size,
            size_attenuation: true,
            color: Color::WHITE,
            vertex_colors: false,
            opacity,
        }
    }

    pub fn with_vertex_colors(mut self) -> Self {
        self.vertex_colors = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_roundtrip() {
        let color = Color::from_hex(0x151414);
        assert_eq!(color.to_string(), "#151414");
        assert_eq!(Color::parse("#151414"), Some(color));
        assert_eq!(Color::parse("151414"), Some(color));
    }

    #[test]
    fn test_color_parse_rejects_garbage() {
        assert_eq!(Color::parse("#fff"), None);
        assert_eq!(Color::parse("#gggggg"), None);
    }

    #[test]
    fn test_linear_conversion_endpoints() {
        assert!((Color::WHITE.to_linear() - Vec3::ONE).abs().max_element() < 1e-6);
        assert_eq!(Color::from_hex(0x000000).to_linear(), Vec3::ZERO);

        // Mid grey is darker in linear space.
        let grey = Color::from_hex(0x808080).to_linear();
        assert!((grey.x - 0.2159).abs() < 1e-3);
    }

    #[test]
    fn test_color_serde_as_string() {
        let json = serde_json::to_string(&Color::from_hex(0xff8000)).unwrap();
        assert_eq!(json, "\"#ff8000\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::from_hex(0xff8000));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }

    #[test]
    fn test_material_fields() {
        // Alpha blending is fixed, so a material carries no blend setting.
        let json = serde_json::to_value(PointMaterial::new(0.003, 0.7)).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["color", "opacity", "size", "size_attenuation", "vertex_colors"]
        );
    }

    #[test]
    fn test_material_builders() {
        let material = PointMaterial::new(0.01, 0.9).with_vertex_colors();
        assert!(material.vertex_colors);
        assert!(material.size_attenuation);
        assert_eq!(material.opacity, 0.9);
        assert_eq!(material.color, Color::WHITE);
    }
}
