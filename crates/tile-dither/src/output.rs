//! Quantized output image.

use crate::palette::{Palette, Rgba};

/// The result of a dithering pass: one palette index per pixel, row-major,
/// plus the palette the indices refer to.
///
/// ```
/// use tile_dither::{DitheredImage, Palette};
///
/// let palette = Palette::new(&[[0, 0, 0, 255], [255, 255, 255, 255]]).unwrap();
/// let image = DitheredImage::new(vec![0, 1, 1, 0], 2, 2, palette);
///
/// assert_eq!(image.to_rgba()[1], [255, 255, 255, 255]);
/// ```
#[derive(Debug, Clone)]
pub struct DitheredImage {
    indices: Vec<usize>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl DitheredImage {
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<usize>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{})",
            indices.len(),
            width,
            height,
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// One palette color per pixel, row-major.
    pub fn to_rgba(&self) -> Vec<Rgba> {
        self.indices.iter().map(|&i| self.palette.color(i)).collect()
    }
}
