//! 8-bit RGB color and the rainbow colormap used when voxels carry no color

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 8-bit RGB color - exactly 3 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    /// Returned by [`rainbow_color_map`] for NaN or infinite input
    pub const INVALID: Color = Color::new(255, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized RGBA with full opacity
    pub fn to_rgba(self) -> ColorRgba {
        ColorRgba {
            r: self.r as f32 / 255.0,
            g: self.g as f32 / 255.0,
            b: self.b as f32 / 255.0,
            a: 1.0,
        }
    }
}

/// RGBA color with values in [0, 1], the form marker consumers expect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Map a scalar to a fully saturated hue.
///
/// The fractional part of `h` selects the hue, so the map has period 1:
/// - [0, 1/6): red -> yellow
/// - [1/6, 2/6): yellow -> green
/// - [2/6, 3/6): green -> cyan
/// - [3/6, 4/6): cyan -> blue
/// - [4/6, 5/6): blue -> magenta
/// - [5/6, 1): magenta -> red
///
/// Channels are scaled by 255 and truncated. Non-finite input yields
/// [`Color::INVALID`].
pub fn rainbow_color_map(h: f32) -> Color {
    if !h.is_finite() {
        return Color::INVALID;
    }

    let h = (h - h.floor()) * 6.0;
    // h can round up to exactly 6.0 for inputs just below an integer
    let sector = (h.floor() as u32) % 6;
    let mut f = h - h.floor();
    if sector % 2 == 0 {
        f = 1.0 - f;
    }
    let n = channel(1.0 - f);

    match sector {
        0 => Color::new(255, n, 0),
        1 => Color::new(n, 255, 0),
        2 => Color::new(0, 255, n),
        3 => Color::new(0, n, 255),
        4 => Color::new(n, 0, 255),
        _ => Color::new(255, 0, n),
    }
}

#[inline]
fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_size() {
        assert_eq!(std::mem::size_of::<Color>(), 3);
    }

    #[test]
    fn test_sector_boundaries() {
        assert_eq!(rainbow_color_map(0.0), Color::RED);
        assert_eq!(rainbow_color_map(1.0 / 3.0), Color::GREEN);
        assert_eq!(rainbow_color_map(0.5), Color::new(0, 255, 255));
        assert_eq!(rainbow_color_map(2.0 / 3.0), Color::BLUE);
    }

    #[test]
    fn test_deterministic() {
        for h in [-3.7_f32, -0.25, 0.0, 0.1, 0.42, 0.999, 12.5] {
            assert_eq!(rainbow_color_map(h), rainbow_color_map(h));
        }
    }

    #[test]
    fn test_periodic() {
        assert_eq!(rainbow_color_map(0.25), rainbow_color_map(1.25));
        assert_eq!(rainbow_color_map(0.75), rainbow_color_map(-0.25));
    }

    #[test]
    fn test_increasing_scan_never_repeats() {
        let mut seen = HashSet::new();
        for k in 0..64 {
            let color = rainbow_color_map(k as f32 / 64.0);
            assert!(seen.insert(color), "color repeated at step {}: {:?}", k, color);
        }
    }

    #[test]
    fn test_continuity() {
        // Neighbouring samples differ by at most a small step per channel
        let steps = 600;
        let mut prev = rainbow_color_map(0.0);
        for k in 1..steps {
            let c = rainbow_color_map(k as f32 / steps as f32);
            for (a, b) in [(prev.r, c.r), (prev.g, c.g), (prev.b, c.b)] {
                assert!((a as i32 - b as i32).abs() <= 4, "jump at step {}", k);
            }
            prev = c;
        }
    }

    #[test]
    fn test_non_finite_input() {
        assert_eq!(rainbow_color_map(f32::NAN), Color::INVALID);
        assert_eq!(rainbow_color_map(f32::INFINITY), Color::INVALID);
    }

    #[test]
    fn test_to_rgba() {
        let rgba = Color::new(255, 0, 51).to_rgba();
        assert_eq!(rgba.r, 1.0);
        assert_eq!(rgba.g, 0.0);
        assert!((rgba.b - 0.2).abs() < 1e-6);
        assert_eq!(rgba.a, 1.0);
    }
}
