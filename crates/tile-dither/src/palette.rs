//! Quantization palette with precomputed linear colors.

use std::collections::HashSet;
use std::fmt;

use crate::color::LinearRgb;

/// An 8-bit RGBA color as stored in images and tile catalogs.
pub type Rgba = [u8; 4];

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// No colors provided in palette
    EmptyPalette,
    /// Duplicate color found at the specified index
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::EmptyPalette => write!(f, "palette cannot be empty"),
            PaletteError::DuplicateColor { index } => {
                write!(f, "duplicate color found at index {}", index)
            }
        }
    }
}

impl std::error::Error for PaletteError {}

/// A fixed set of output colors.
///
/// Colors are stored as given (the exact bytes written to the output image)
/// alongside their linear RGB form, which is what matching and error
/// arithmetic use.
///
/// ```
/// use tile_dither::Palette;
///
/// let palette = Palette::new(&[[51, 112, 204, 255], [247, 232, 152, 255]]).unwrap();
/// assert_eq!(palette.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Rgba>,
    linear: Vec<LinearRgb>,
}

impl Palette {
    /// Create a palette from distinct colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::DuplicateColor`] if a color repeats (compared on all
    ///   four channels)
    pub fn new(colors: &[Rgba]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }

        let mut seen = HashSet::new();
        for (index, color) in colors.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(PaletteError::DuplicateColor { index });
            }
        }

        let linear = colors.iter().map(|&c| LinearRgb::from_rgba(c)).collect();

        Ok(Self {
            colors: colors.to_vec(),
            linear,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The output color at `index`.
    #[inline]
    pub fn color(&self, index: usize) -> Rgba {
        self.colors[index]
    }

    /// The linear form of the color at `index`.
    #[inline]
    pub fn linear(&self, index: usize) -> LinearRgb {
        self.linear[index]
    }

    /// Find the palette entry closest to `pixel`.
    ///
    /// Distance is squared Euclidean in linear RGB. Ties resolve to the
    /// lower index, so palette order is significant.
    ///
    /// Returns `(index, squared_distance)`.
    pub fn find_nearest(&self, pixel: LinearRgb) -> (usize, f32) {
        let mut best_index = 0;
        let mut best_distance = f32::INFINITY;
        for (i, &candidate) in self.linear.iter().enumerate() {
            let distance = pixel.distance_sq(candidate);
            if distance < best_distance {
                best_distance = distance;
                best_index = i;
            }
        }
        (best_index, best_distance)
    }

    /// Index of the entry whose RGB bytes equal `rgba`, if any.
    pub fn find_exact(&self, rgba: Rgba) -> Option<usize> {
        self.colors
            .iter()
            .position(|c| c[0] == rgba[0] && c[1] == rgba[1] && c[2] == rgba[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ocean_sand() -> Palette {
        Palette::new(&[[51, 112, 204, 255], [247, 232, 152, 255]]).unwrap()
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(Palette::new(&[]).unwrap_err(), PaletteError::EmptyPalette);
    }

    #[test]
    fn test_duplicate_color_rejected() {
        let err = Palette::new(&[[1, 2, 3, 255], [4, 5, 6, 255], [1, 2, 3, 255]]).unwrap_err();
        assert_eq!(err, PaletteError::DuplicateColor { index: 2 });
        assert_eq!(err.to_string(), "duplicate color found at index 2");
    }

    #[test]
    fn test_find_nearest_exact_color() {
        let palette = ocean_sand();
        let (idx, dist) = palette.find_nearest(LinearRgb::from_rgba([247, 232, 152, 255]));
        assert_eq!(idx, 1);
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn test_find_nearest_picks_closer_entry() {
        let palette = ocean_sand();
        let (idx, _) = palette.find_nearest(LinearRgb::from_rgba([40, 100, 220, 255]));
        assert_eq!(idx, 0);
        let (idx, _) = palette.find_nearest(LinearRgb::from_rgba([255, 240, 160, 255]));
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_find_exact_ignores_alpha() {
        let palette = ocean_sand();
        assert_eq!(palette.find_exact([51, 112, 204, 0]), Some(0));
        assert_eq!(palette.find_exact([51, 112, 205, 255]), None);
    }
}
