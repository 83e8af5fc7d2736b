//! wboxer - turn a picture into a WorldBox map.
//!
//! An image is resampled to whole 64x64 chunks, dithered down to a chosen
//! set of terrain tiles, run-length encoded row by row and saved as a
//! zlib-compressed `.wbox` record, next to a PNG preview of the result.
//! This library exposes the pipeline stages for the CLI and for tests.

pub mod encoding;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
pub mod tiles;
