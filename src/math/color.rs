use serde::{Deserialize, Serialize};

/// Linear RGB color in [0, 1] per channel
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed 0xRRGGBB value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Rotate hue by `shift` (fraction of a full turn, may be negative)
    pub fn shift_hue(&self, shift: f32) -> Self {
        let (h, s, v) = rgb_to_hsv(*self);
        hsv_to_rgb((h + shift).rem_euclid(1.0), s, v)
    }
}

/// HSV to RGB conversion (h, s, v all in [0, 1])
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Color {
    let h = h.rem_euclid(1.0) * 6.0;
    let i = h.floor() as i32;
    let f = h - h.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    match i % 6 {
        0 => Color::new(v, t, p),
        1 => Color::new(q, v, p),
        2 => Color::new(p, v, t),
        3 => Color::new(p, q, v),
        4 => Color::new(t, p, v),
        _ => Color::new(v, p, q),
    }
}

/// RGB to HSV conversion, returning (h, s, v) in [0, 1]
pub fn rgb_to_hsv(c: Color) -> (f32, f32, f32) {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let delta = max - min;

    let h = if delta < 1e-6 {
        0.0
    } else if max == c.r {
        (((c.g - c.b) / delta).rem_euclid(6.0)) / 6.0
    } else if max == c.g {
        ((c.b - c.r) / delta + 2.0) / 6.0
    } else {
        ((c.r - c.g) / delta + 4.0) / 6.0
    };

    let s = if max < 1e-6 { 0.0 } else { delta / max };
    (h, s, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let gold = Color::from_hex(0xFFD700);
        assert!((gold.r - 1.0).abs() < 0.01);
        assert!((gold.g - 0.843).abs() < 0.01);
        assert!(gold.b < 0.01);
    }

    #[test]
    fn test_hsv_primaries() {
        let red = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((red.r - 1.0).abs() < 0.01 && red.g < 0.01 && red.b < 0.01);

        let green = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
        assert!(green.r < 0.01 && (green.g - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_hsv_round_trip() {
        let original = Color::from_hex(0x4CAF50);
        let (h, s, v) = rgb_to_hsv(original);
        let back = hsv_to_rgb(h, s, v);
        assert!((back.r - original.r).abs() < 0.01);
        assert!((back.g - original.g).abs() < 0.01);
        assert!((back.b - original.b).abs() < 0.01);
    }

    #[test]
    fn test_hue_shift_wraps() {
        let c = Color::from_hex(0xFF0000);
        let shifted = c.shift_hue(1.0);
        assert!((shifted.r - c.r).abs() < 0.01);
    }

    #[test]
    fn test_hue_shift_changes_channel_balance() {
        let c = Color::from_hex(0xFF0000);
        let shifted = c.shift_hue(1.0 / 3.0);
        // Red rotated a third of a turn lands on green
        assert!(shifted.g > shifted.r);
    }

    #[test]
    fn test_gray_has_zero_saturation() {
        let (_, s, v) = rgb_to_hsv(Color::new(0.5, 0.5, 0.5));
        assert!(s.abs() < 0.001);
        assert!((v - 0.5).abs() < 0.001);
    }
}
