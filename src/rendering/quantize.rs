use image::{Rgba, RgbaImage};
use tile_dither::{Dither, DitherAlgorithm, DitherOptions, ErrorDiffusion, Palette};

use crate::error::ConvertError;

/// Parse an algorithm name, falling back to Sierra Lite for names that are
/// not recognized.
pub fn select_algorithm(name: &str) -> DitherAlgorithm {
    match name.parse::<DitherAlgorithm>() {
        Ok(algorithm) => algorithm,
        Err(e) => {
            tracing::warn!(
                algorithm = %name,
                fallback = %DitherAlgorithm::default(),
                "{e}, switching to default"
            );
            DitherAlgorithm::default()
        }
    }
}

/// Reduce `image` to the colors in `palette` using error diffusion.
///
/// With an empty palette there is nothing to quantize to and the image is
/// returned unchanged.
pub fn quantize(
    image: &RgbaImage,
    palette: &[[u8; 4]],
    algorithm: DitherAlgorithm,
    options: DitherOptions,
) -> Result<RgbaImage, ConvertError> {
    if palette.is_empty() {
        tracing::debug!("Empty palette, skipping quantization");
        return Ok(image.clone());
    }

    let palette = Palette::new(palette)?;
    let (width, height) = image.dimensions();
    let pixels: Vec<[u8; 4]> = image.pixels().map(|p| p.0).collect();

    let start = std::time::Instant::now();
    let dithered = ErrorDiffusion::with_options(algorithm, options).dither(
        &pixels,
        width as usize,
        height as usize,
        &palette,
    );
    tracing::debug!(
        algorithm = %algorithm,
        colors = palette.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Quantized image"
    );

    let colors = dithered.to_rgba();
    Ok(RgbaImage::from_fn(width, height, |x, y| {
        Rgba(colors[y as usize * width as usize + x as usize])
    }))
}
