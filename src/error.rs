use std::path::PathBuf;
use thiserror::Error;

use crate::encoding::GridError;
use crate::models::ConfigError;
use crate::services::archive::ArchiveError;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Image too small: {width}x{height} (need at least 64x64)")]
    ImageTooSmall { width: u32, height: u32 },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Palette error: {0}")]
    Palette(#[from] tile_dither::PaletteError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Invalid tile grid: {0}")]
    Grid(#[from] GridError),
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}
