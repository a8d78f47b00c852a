//! Colors

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// RGBA color with components in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional)
    pub fn parse_hex(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidColor(s.to_string());
        let digits = s.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            3 => {
                let v = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                // #abc -> #aabbcc
                let expand = |n: u32| (n & 0xF) * 0x11;
                Ok(Self::from_hex(
                    (expand(v >> 8) << 16) | (expand(v >> 4) << 8) | expand(v),
                ))
            }
            6 => {
                let v = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                Ok(Self::from_hex(v))
            }
            8 => {
                let v = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                Ok(Self::from_hex(v >> 8).with_alpha((v & 0xFF) as f32 / 255.0))
            }
            _ => Err(invalid()),
        }
    }

    /// Build a color from hue (`0..1`, wraps), saturation and lightness
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::rgb(l, l, l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self::rgb(
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Component-wise linear blend; `t` is not clamped
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        Color::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Color, b: Color) -> bool {
        a.to_array()
            .iter()
            .zip(b.to_array())
            .all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn parses_all_hex_forms() {
        assert_eq!(Color::parse_hex("#3B82F6").unwrap(), Color::from_hex(0x3B82F6));
        assert_eq!(Color::parse_hex("fff").unwrap(), Color::WHITE);
        let translucent = Color::parse_hex("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(
            Color::parse_hex("#12345"),
            Err(CoreError::InvalidColor("#12345".to_string()))
        );
        assert!(Color::parse_hex("#gggggg").is_err());
        assert!(Color::parse_hex("").is_err());
    }

    #[test]
    fn hsl_primaries() {
        assert!(approx(Color::from_hsl(0.0, 1.0, 0.5), Color::rgb(1.0, 0.0, 0.0)));
        assert!(approx(Color::from_hsl(1.0 / 3.0, 1.0, 0.5), Color::rgb(0.0, 1.0, 0.0)));
        assert!(approx(Color::from_hsl(2.0 / 3.0, 1.0, 0.5), Color::rgb(0.0, 0.0, 1.0)));
        // hue wraps
        assert!(approx(Color::from_hsl(1.0, 1.0, 0.5), Color::from_hsl(0.0, 1.0, 0.5)));
        assert!(approx(Color::from_hsl(0.3, 0.0, 0.25), Color::rgb(0.25, 0.25, 0.25)));
    }

    #[test]
    fn lerp_blends_alpha_too() {
        let c = Color::TRANSPARENT.lerp(&Color::WHITE, 0.5);
        assert_eq!(c, Color::rgba(0.5, 0.5, 0.5, 0.5));
    }
}
