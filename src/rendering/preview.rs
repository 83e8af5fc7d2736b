use std::io::Cursor;

use image::RgbaImage;

use crate::error::ConvertError;

/// Encode the quantized image as an 8-bit RGBA PNG.
pub fn encode_preview_png(image: &RgbaImage) -> Result<Vec<u8>, ConvertError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ConvertError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(image.as_raw())
            .map_err(|e| ConvertError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_png_signature_and_header() {
        let img = RgbaImage::from_pixel(128, 64, Rgba([65, 69, 69, 255]));
        let png = encode_preview_png(&img).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        // IHDR: width, height, depth 8, color type 6 (RGBA)
        assert_eq!(&png[16..20], &128u32.to_be_bytes());
        assert_eq!(&png[20..24], &64u32.to_be_bytes());
        assert_eq!(png[24], 8);
        assert_eq!(png[25], 6);
    }

    #[test]
    fn test_decodes_to_same_pixels() {
        let img = RgbaImage::from_fn(64, 64, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([51, 112, 204, 255])
            } else {
                Rgba([247, 232, 152, 255])
            }
        });
        let png = encode_preview_png(&img).unwrap();
        let decoded = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded, img);
    }
}
