use bytemuck::{Pod, Zeroable};

use crate::error::ConfigError;

/// Maps secondary aggregate values to colors.
///
/// Implementations must be pure and return one color per input value, with
/// every channel (alpha included) in `[0, 1]`.
pub trait ColorMap {
    fn map(&self, values: &[f64]) -> Vec<[f32; 4]>;
}

/// 8-bit RGBA color, laid out for direct upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Darker shade for cell borders. `percent` > 100 darkens: 130 divides
    /// each color channel by 1.3. Alpha is kept.
    pub fn darker(self, percent: u32) -> Self {
        if percent <= 100 {
            return self;
        }
        let scale = |c: u8| ((c as u32 * 100) / percent) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }
}

/// Scale unit-range colors to 8 bits. The factor applies to every channel of
/// every color, alpha included.
pub fn to_rgba8(colors: &[[f32; 4]]) -> Vec<Rgba8> {
    let scale = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    colors
        .iter()
        .map(|&[r, g, b, a]| Rgba8::new(scale(r), scale(g), scale(b), scale(a)))
        .collect()
}

/// ColorBrewer RdBu, 11 classes, from the low (red) end to the high (blue) end.
const RD_BU: [[u8; 3]; 11] = [
    [0x67, 0x00, 0x1f],
    [0xb2, 0x18, 0x2b],
    [0xd6, 0x60, 0x4d],
    [0xf4, 0xa5, 0x82],
    [0xfd, 0xdb, 0xc7],
    [0xf7, 0xf7, 0xf7],
    [0xd1, 0xe5, 0xf0],
    [0x92, 0xc5, 0xde],
    [0x43, 0x93, 0xc3],
    [0x21, 0x66, 0xac],
    [0x05, 0x30, 0x61],
];

/// Red-white-blue diverging ramp over a fixed value range.
///
/// Values below `low` or above `high` clamp to the ends; NaN maps to the
/// neutral midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergingColorMap {
    low: f64,
    high: f64,
}

impl DivergingColorMap {
    pub fn new(low: f64, high: f64) -> Result<Self, ConfigError> {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(ConfigError::InvalidColorRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn range(&self) -> (f64, f64) {
        (self.low, self.high)
    }

    fn map_one(&self, value: f64) -> [f32; 4] {
        let t = if value.is_nan() {
            0.5
        } else {
            ((value - self.low) / (self.high - self.low)).clamp(0.0, 1.0)
        };
        let pos = t * (RD_BU.len() - 1) as f64;
        let lo = (pos.floor() as usize).min(RD_BU.len() - 2);
        let frac = (pos - lo as f64) as f32;
        let (a, b) = (RD_BU[lo], RD_BU[lo + 1]);
        let lerp = |i: usize| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * frac) / 255.0;
        [lerp(0), lerp(1), lerp(2), 1.0]
    }
}

impl Default for DivergingColorMap {
    fn default() -> Self {
        Self {
            low: -0.1,
            high: 0.1,
        }
    }
}

impl ColorMap for DivergingColorMap {
    fn map(&self, values: &[f64]) -> Vec<[f32; 4]> {
        values.iter().map(|&v| self.map_one(v)).collect()
    }
}
