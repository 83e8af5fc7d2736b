//! Image loading and size normalization.
//!
//! Maps are made of 64x64 chunks, so both image dimensions are floored to
//! a multiple of 64 and the image is resampled to that size with Lanczos3.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, RgbaImage};

use crate::error::ConvertError;
use crate::models::TILE_PIXEL_SIZE;

/// Decode a PNG or JPEG file. The format is sniffed from the content, so
/// the extension does not have to match.
pub fn load_image(path: &Path) -> Result<DynamicImage, ConvertError> {
    let reader = ImageReader::open(path)
        .map_err(|e| ConvertError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| ConvertError::io(path, e))?;
    let image = reader.decode()?;

    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded image"
    );

    Ok(image)
}

/// Largest multiple-of-64 size that fits in `width` x `height`.
pub fn normalized_size(width: u32, height: u32) -> Result<(u32, u32), ConvertError> {
    let w = (width / TILE_PIXEL_SIZE) * TILE_PIXEL_SIZE;
    let h = (height / TILE_PIXEL_SIZE) * TILE_PIXEL_SIZE;
    if w == 0 || h == 0 {
        return Err(ConvertError::ImageTooSmall { width, height });
    }
    Ok((w, h))
}

/// Convert to RGBA8 at the normalized size. Images that already have a
/// valid size are not resampled.
pub fn normalize(image: &DynamicImage) -> Result<RgbaImage, ConvertError> {
    let (width, height) = normalized_size(image.width(), image.height())?;
    let rgba = image.to_rgba8();

    if (width, height) == rgba.dimensions() {
        return Ok(rgba);
    }

    tracing::debug!(
        from_width = rgba.width(),
        from_height = rgba.height(),
        to_width = width,
        to_height = height,
        "Resampling image"
    );

    Ok(imageops::resize(&rgba, width, height, FilterType::Lanczos3))
}
