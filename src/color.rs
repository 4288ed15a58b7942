use std::str::FromStr;

use palette::Srgb;
use thiserror::Error;

/// Errors raised while reading seed colors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex color '{input}': {reason}")]
    InvalidColorFormat { input: String, reason: String },
}

impl ColorError {
    fn invalid(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidColorFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// A 24-bit sRGB color, the exchange format at every boundary of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color in HSV with every component normalized to [0, 1].
///
/// The hue is a fraction of the full turn, so `0.5` is cyan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Same hue, with saturation and value clamped into [0, 1].
    pub fn clamped(self) -> Self {
        Self {
            h: self.h,
            s: self.s.clamp(0.0, 1.0),
            v: self.v.clamp(0.0, 1.0),
        }
    }

    pub fn to_rgb(self) -> Srgb<f64> {
        hsv_to_rgb(self)
    }

    /// Quantize to a hex color. Saturation and value are clamped first.
    pub fn to_color(self) -> Color {
        Color::from_rgb(hsv_to_rgb(self.clamped()))
    }

    /// Lab lightness of this color.
    pub fn lstar(self) -> f64 {
        rgb_to_lstar(hsv_to_rgb(self))
    }
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800`, `#FF8800` or `ff8800`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(ColorError::invalid(
                hex,
                format!("expected 6 hex digits, got {}", digits.len()),
            ));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::invalid(hex, "non-hex character"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| ColorError::invalid(hex, e.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Lowercase hex without the leading `#`.
    pub fn to_hex_stripped(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Normalized channels in [0, 1].
    pub fn to_rgb(self) -> Srgb<f64> {
        let channel = |c: u8| f64::from(c) / 255.0;
        Srgb::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Quantize normalized channels to the nearest of 256 levels, ties to even.
    ///
    /// Channels are clamped so a stray out-of-gamut value cannot wrap.
    pub fn from_rgb(rgb: Srgb<f64>) -> Self {
        let quantize = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round_ties_even() as u8;
        Self {
            r: quantize(rgb.red),
            g: quantize(rgb.green),
            b: quantize(rgb.blue),
        }
    }

    pub fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self.to_rgb())
    }

    pub fn lstar(self) -> f64 {
        rgb_to_lstar(self.to_rgb())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse a hex string into normalized RGB.
pub fn hex_to_rgb(hex: &str) -> Result<Srgb<f64>, ColorError> {
    Color::from_hex(hex).map(Color::to_rgb)
}

/// Format normalized RGB as `#rrggbb`. Callers clamp to [0, 1] beforehand.
pub fn rgb_to_hex(rgb: Srgb<f64>) -> String {
    Color::from_rgb(rgb).to_hex()
}

/// HSV of an sRGB color, hue as a fraction of a turn.
///
/// Arithmetic order is fixed: derived channels often land exactly on a .5
/// step, and a one-ulp drift changes how they quantize.
pub fn rgb_to_hsv(rgb: Srgb<f64>) -> Hsv {
    let (r, g, b) = (rgb.red, rgb.green, rgb.blue);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let range = max - min;
    if range == 0.0 {
        return Hsv::new(0.0, 0.0, max);
    }

    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;
    let sextant = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    let mut h = (sextant / 6.0).rem_euclid(1.0);
    // rem_euclid of a tiny negative rounds up to exactly 1.0
    if h >= 1.0 {
        h = 0.0;
    }
    Hsv::new(h, range / max, max)
}

/// Inverse of [`rgb_to_hsv`], using the p/q/t sextant form.
pub fn hsv_to_rgb(hsv: Hsv) -> Srgb<f64> {
    let Hsv { h, s, v } = hsv;
    if s == 0.0 {
        return Srgb::new(v, v, v);
    }

    let scaled = h * 6.0;
    let i = scaled.trunc();
    let f = scaled - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (red, green, blue) = match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Srgb::new(red, green, blue)
}

/// Inverse sRGB transfer function.
pub fn linearize(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB to CIE XYZ under D65.
pub fn rgb_to_xyz(rgb: Srgb<f64>) -> (f64, f64, f64) {
    let r = linearize(rgb.red);
    let g = linearize(rgb.green);
    let b = linearize(rgb.blue);
    let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
    let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
    let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;
    (x, y, z)
}

/// CIE XYZ to Lab `(L*, a*, b*)` relative to the D65 white point.
pub fn xyz_to_lab((x, y, z): (f64, f64, f64)) -> (f64, f64, f64) {
    const XN: f64 = 0.95047;
    const YN: f64 = 1.0;
    const ZN: f64 = 1.08883;

    fn f(t: f64) -> f64 {
        if t > 0.008856 {
            t.cbrt()
        } else {
            7.787 * t + 16.0 / 116.0
        }
    }

    let fx = f(x / XN);
    let fy = f(y / YN);
    let fz = f(z / ZN);
    (116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Lab lightness of an sRGB color, the contrast proxy used by the search.
pub fn rgb_to_lstar(rgb: Srgb<f64>) -> f64 {
    xyz_to_lab(rgb_to_xyz(rgb)).0
}

/// Contrast between two lightness values.
pub fn delta_l(l1: f64, l2: f64) -> f64 {
    (l1 - l2).abs()
}
