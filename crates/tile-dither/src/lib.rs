#![allow(clippy::needless_range_loop)]

//! tile-dither: error diffusion quantization onto fixed tile palettes
//!
//! Maps an RGBA image onto a small set of exact palette colors, diffusing
//! the quantization error to unprocessed neighbours so that gradients
//! survive as dither patterns instead of flat bands.
//!
//! # Quick Start
//!
//! ```
//! use tile_dither::{Dither, DitherAlgorithm, ErrorDiffusion, Palette};
//!
//! let palette = Palette::new(&[[0, 0, 0, 255], [255, 255, 255, 255]]).unwrap();
//! let ditherer = ErrorDiffusion::new(DitherAlgorithm::FloydSteinberg);
//!
//! let pixels = vec![[128, 128, 128, 255]; 4];
//! let result = ditherer.dither(&pixels, 2, 2, &palette);
//!
//! assert_eq!(result.width(), 2);
//! assert_eq!(result.to_rgba().len(), 4);
//! ```
//!
//! # Color Handling
//!
//! Pixels arrive as sRGB bytes. Matching and error arithmetic both happen in
//! linear RGB: a quantization error is a difference in light intensity, and
//! only linear values add up the way light does. Alpha is carried through
//! from the palette entry and never takes part in matching.
//!
//! # Algorithms
//!
//! Eleven diffusion kernels are available via [`DitherAlgorithm`], selected
//! by name with [`str::parse`]:
//!
//! | Name | Kernel |
//! |------|--------|
//! | `FloydSteinberg` | 4 neighbours, 16ths |
//! | `FalseFloydSteinberg` | 3 neighbours, 8ths |
//! | `Atkinson` | 6 neighbours, 75% propagation |
//! | `Stucki` | 12 neighbours, 42nds |
//! | `Burkes` | 7 neighbours, 32nds |
//! | `JarvisJudiceNinke` | 12 neighbours, 48ths |
//! | `Simple2D` | 2 neighbours, halves |
//! | `StevenPigeon` | 8 neighbours, 14ths |
//! | `Sierra` | 10 neighbours, 32nds |
//! | `Sierra2` | 7 neighbours, 16ths |
//! | `SierraLite` | 3 neighbours, quarters |
//!
//! Every kernel is scaled by a `strength` factor; a strength of zero turns
//! error diffusion off and leaves plain nearest-color mapping.

pub mod color;
pub mod dither;
pub mod output;
pub mod palette;

pub use color::LinearRgb;
pub use dither::{Dither, DitherAlgorithm, DitherOptions, ErrorDiffusion, Kernel, UnknownAlgorithm};
pub use output::DitheredImage;
pub use palette::{Palette, PaletteError, Rgba};
