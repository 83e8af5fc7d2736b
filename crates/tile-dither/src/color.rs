//! Linear RGB color type and sRGB transfer functions.
//!
//! sRGB bytes are decoded through a 256-entry table built on first use.
//! Nothing is encoded back: output pixels are always palette bytes.

use std::sync::OnceLock;

/// A color in linear RGB space.
///
/// Values are nominally in `0.0..=1.0` but may leave that range while
/// accumulated diffusion error is added to a pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearRgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decode the RGB channels of an sRGB byte quadruple. Alpha is ignored.
    #[inline]
    pub fn from_rgba(rgba: [u8; 4]) -> Self {
        let lut = decode_table();
        Self {
            r: lut[rgba[0] as usize],
            g: lut[rgba[1] as usize],
            b: lut[rgba[2] as usize],
        }
    }

    /// Squared Euclidean distance to another linear color.
    #[inline]
    pub fn distance_sq(self, other: LinearRgb) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }
}

fn decode_table() -> &'static [f32; 256] {
    static TABLE: OnceLock<[f32; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0.0f32; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let srgb = i as f64 / 255.0;
            let linear = if srgb <= 0.04045 {
                srgb / 12.92
            } else {
                ((srgb + 0.055) / 1.055).powf(2.4)
            };
            *entry = linear as f32;
        }
        table
    })
}
