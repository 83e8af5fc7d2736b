//! Test images and configurations.

use image::{DynamicImage, Rgba, RgbaImage};
use wboxer::models::Configuration;

/// Catalog colors used throughout the tests
pub mod colors {
    pub const DEEP_OCEAN: [u8; 4] = [51, 112, 204, 255];
    pub const SAND: [u8; 4] = [247, 232, 152, 255];
    pub const GRASS_LOW: [u8; 4] = [126, 175, 70, 255];
    pub const MOUNTAINS: [u8; 4] = [65, 69, 69, 255];
    /// Not in the catalog
    pub const MAGENTA: [u8; 4] = [255, 0, 255, 255];
}

pub fn config(included: &[&str]) -> Configuration {
    Configuration {
        included: included.iter().map(|s| s.to_string()).collect(),
        ..Configuration::default()
    }
}

pub fn uniform(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Alternates `a` and `b` pixel by pixel, starting with `a` top left.
pub fn checkerboard(width: u32, height: u32, a: [u8; 4], b: [u8; 4]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba(a)
        } else {
            Rgba(b)
        }
    })
}

/// An island: ocean border, sand ring, grass interior and a mountain in
/// the middle.
pub fn island(width: u32, height: u32) -> RgbaImage {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let radius = cx.min(cy);
    RgbaImage::from_fn(width, height, |x, y| {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        let d = (dx * dx + dy * dy).sqrt() / radius;
        let color = if d > 0.8 {
            colors::DEEP_OCEAN
        } else if d > 0.65 {
            colors::SAND
        } else if d > 0.15 {
            colors::GRASS_LOW
        } else {
            colors::MOUNTAINS
        };
        Rgba(color)
    })
}

/// A smooth gradient with no catalog colors in it.
pub fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            96,
            255,
        ])
    })
}

pub fn dynamic(image: RgbaImage) -> DynamicImage {
    DynamicImage::ImageRgba8(image)
}
