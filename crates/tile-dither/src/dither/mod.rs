//! Error diffusion dithering.
//!
//! All algorithms share one diffusion loop ([`ErrorDiffusion`]) and differ
//! only in their [`Kernel`]. The [`Dither`] trait is the seam callers program
//! against, so another quantization strategy can be dropped in without
//! touching them.

mod kernel;
mod options;

use std::fmt;
use std::str::FromStr;

pub use kernel::*;
pub use options::DitherOptions;

use crate::color::LinearRgb;
use crate::output::DitheredImage;
use crate::palette::{Palette, Rgba};

/// Accumulated error is clamped so a pixel never drifts further than this
/// outside the `0.0..=1.0` channel range.
const MAX_CHANNEL_OVERSHOOT: f32 = 1.0;

/// Strategy for mapping an image onto a palette.
pub trait Dither {
    /// Quantize `pixels` (row-major, `width * height` entries) onto
    /// `palette`.
    fn dither(&self, pixels: &[Rgba], width: usize, height: usize, palette: &Palette)
        -> DitheredImage;
}

/// Error diffusion algorithm selection.
///
/// Parsed from the names used in configuration files:
///
/// ```
/// use tile_dither::DitherAlgorithm;
///
/// let algo: DitherAlgorithm = "Sierra2".parse().unwrap();
/// assert_eq!(algo, DitherAlgorithm::Sierra2);
/// assert!("Bayer".parse::<DitherAlgorithm>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherAlgorithm {
    FloydSteinberg,
    FalseFloydSteinberg,
    Atkinson,
    Stucki,
    Burkes,
    JarvisJudiceNinke,
    Simple2D,
    StevenPigeon,
    Sierra,
    Sierra2,
    /// The fallback when a configured name is not recognized.
    #[default]
    SierraLite,
}

impl DitherAlgorithm {
    pub const ALL: [DitherAlgorithm; 11] = [
        DitherAlgorithm::FloydSteinberg,
        DitherAlgorithm::FalseFloydSteinberg,
        DitherAlgorithm::Atkinson,
        DitherAlgorithm::Stucki,
        DitherAlgorithm::Burkes,
        DitherAlgorithm::JarvisJudiceNinke,
        DitherAlgorithm::Simple2D,
        DitherAlgorithm::StevenPigeon,
        DitherAlgorithm::Sierra,
        DitherAlgorithm::Sierra2,
        DitherAlgorithm::SierraLite,
    ];

    /// Configuration name of the algorithm.
    pub fn name(self) -> &'static str {
        match self {
            DitherAlgorithm::FloydSteinberg => "FloydSteinberg",
            DitherAlgorithm::FalseFloydSteinberg => "FalseFloydSteinberg",
            DitherAlgorithm::Atkinson => "Atkinson",
            DitherAlgorithm::Stucki => "Stucki",
            DitherAlgorithm::Burkes => "Burkes",
            DitherAlgorithm::JarvisJudiceNinke => "JarvisJudiceNinke",
            DitherAlgorithm::Simple2D => "Simple2D",
            DitherAlgorithm::StevenPigeon => "StevenPigeon",
            DitherAlgorithm::Sierra => "Sierra",
            DitherAlgorithm::Sierra2 => "Sierra2",
            DitherAlgorithm::SierraLite => "SierraLite",
        }
    }

    pub fn kernel(self) -> &'static Kernel {
        match self {
            DitherAlgorithm::FloydSteinberg => &FLOYD_STEINBERG,
            DitherAlgorithm::FalseFloydSteinberg => &FALSE_FLOYD_STEINBERG,
            DitherAlgorithm::Atkinson => &ATKINSON,
            DitherAlgorithm::Stucki => &STUCKI,
            DitherAlgorithm::Burkes => &BURKES,
            DitherAlgorithm::JarvisJudiceNinke => &JARVIS_JUDICE_NINKE,
            DitherAlgorithm::Simple2D => &SIMPLE_2D,
            DitherAlgorithm::StevenPigeon => &STEVEN_PIGEON,
            DitherAlgorithm::Sierra => &SIERRA,
            DitherAlgorithm::Sierra2 => &SIERRA_TWO_ROW,
            DitherAlgorithm::SierraLite => &SIERRA_LITE,
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when an algorithm name is not recognized.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown dithering algorithm: {:?}", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for DitherAlgorithm {
    type Err = UnknownAlgorithm;

    /// Names match exactly (case-sensitive), as written in config files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DitherAlgorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Sliding window of error rows.
///
/// Only the rows the kernel can reach are kept: `rows[0]` is the current
/// row, `rows[1]` the next, and so on.
#[derive(Debug)]
pub struct ErrorBuffer {
    rows: Vec<Vec<[f32; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    #[inline]
    pub fn get_accumulated(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Add error to a pixel `row_offset` rows below the current one.
    /// Out-of-bounds targets are ignored.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: [f32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            for c in 0..3 {
                self.rows[row_offset][x][c] += error[c];
            }
        }
    }

    /// Rotate the window down one row, zeroing the new last row.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}

/// Kernel-driven error diffusion.
///
/// ```
/// use tile_dither::{Dither, DitherAlgorithm, ErrorDiffusion, Palette};
///
/// let palette = Palette::new(&[[0, 0, 0, 255], [255, 255, 255, 255]]).unwrap();
/// let ditherer = ErrorDiffusion::new(DitherAlgorithm::Atkinson).strength(0.5);
/// let image = ditherer.dither(&[[30, 30, 30, 255]; 9], 3, 3, &palette);
/// assert!(image.indices().iter().all(|&i| i < 2));
/// ```
#[derive(Debug, Clone)]
pub struct ErrorDiffusion {
    algorithm: DitherAlgorithm,
    options: DitherOptions,
}

impl ErrorDiffusion {
    pub fn new(algorithm: DitherAlgorithm) -> Self {
        Self {
            algorithm,
            options: DitherOptions::default(),
        }
    }

    pub fn with_options(algorithm: DitherAlgorithm, options: DitherOptions) -> Self {
        Self { algorithm, options }
    }

    #[inline]
    pub fn strength(mut self, strength: f32) -> Self {
        self.options = self.options.strength(strength);
        self
    }

    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.options = self.options.serpentine(enabled);
        self
    }

    #[inline]
    pub fn preserve_exact_matches(mut self, enabled: bool) -> Self {
        self.options = self.options.preserve_exact_matches(enabled);
        self
    }
}

impl Dither for ErrorDiffusion {
    fn dither(
        &self,
        pixels: &[Rgba],
        width: usize,
        height: usize,
        palette: &Palette,
    ) -> DitheredImage {
        let indices = dither_with_kernel(
            pixels,
            width,
            height,
            palette,
            self.algorithm.kernel(),
            &self.options,
        );
        DitheredImage::new(indices, width, height, palette.clone())
    }
}

#[inline]
fn clamp_channel(value: f32) -> f32 {
    value.clamp(-MAX_CHANNEL_OVERSHOOT, 1.0 + MAX_CHANNEL_OVERSHOOT)
}

/// The diffusion loop shared by every algorithm.
///
/// Returns one palette index per pixel, row-major.
pub(crate) fn dither_with_kernel(
    pixels: &[Rgba],
    width: usize,
    height: usize,
    palette: &Palette,
    kernel: &Kernel,
    options: &DitherOptions,
) -> Vec<usize> {
    debug_assert_eq!(pixels.len(), width * height);

    let mut output = vec![0usize; width * height];
    let mut error_buf = ErrorBuffer::new(width, kernel.max_dy + 1);
    let scale = options.strength / kernel.divisor as f32;

    for y in 0..height {
        let reverse = options.serpentine && y % 2 == 1;
        let x_range: Box<dyn Iterator<Item = usize>> = if reverse {
            Box::new((0..width).rev())
        } else {
            Box::new(0..width)
        };

        for x in x_range {
            let idx = y * width + x;

            if options.preserve_exact_matches {
                if let Some(exact) = palette.find_exact(pixels[idx]) {
                    output[idx] = exact;
                    continue;
                }
            }

            let source = LinearRgb::from_rgba(pixels[idx]);
            let accumulated = error_buf.get_accumulated(x);
            let pixel = LinearRgb::new(
                clamp_channel(source.r + accumulated[0]),
                clamp_channel(source.g + accumulated[1]),
                clamp_channel(source.b + accumulated[2]),
            );

            let (nearest, _) = palette.find_nearest(pixel);
            output[idx] = nearest;

            if scale == 0.0 {
                continue;
            }

            let target = palette.linear(nearest);
            let error = [pixel.r - target.r, pixel.g - target.g, pixel.b - target.b];

            for &(dx, dy, weight) in kernel.entries {
                let effective_dx = if reverse { -dx } else { dx };
                let nx = x as i32 + effective_dx;
                if nx < 0 || nx as usize >= width || y + dy as usize >= height {
                    continue;
                }
                let share = weight as f32 * scale;
                error_buf.add_error(
                    nx as usize,
                    dy as usize,
                    [error[0] * share, error[1] * share, error[2] * share],
                );
            }
        }

        error_buf.advance_row();
    }

    output
}
