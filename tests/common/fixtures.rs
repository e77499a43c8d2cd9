//! Test fixtures: pixel sets and in-memory PNG builders.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use kpalette::models::PipelineSettings;

/// Pixel sets used across scenarios
pub mod pixels {
    /// Two tight pairs of greys (2x2)
    pub const TWO_PAIRS: [[u8; 3]; 4] = [[10, 10, 10], [12, 12, 12], [200, 200, 200], [202, 202, 202]];

    /// Red, green, blue, white (2x2)
    pub const RGBW: [[u8; 3]; 4] = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]];

    /// A smooth diagonal gradient with many distinct colors
    pub fn gradient(width: usize, height: usize) -> Vec<[u8; 3]> {
        let wx = (width - 1).max(1);
        let hy = (height - 1).max(1);
        (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| {
                    [
                        (x * 255 / wx) as u8,
                        (y * 255 / hy) as u8,
                        ((x * hy + y * wx) * 127 / (wx * hy)) as u8,
                    ]
                })
            })
            .collect()
    }
}

/// Encode 8-bit RGB pixels as a PNG.
pub fn rgb_png(width: u32, height: u32, pixels: &[[u8; 3]]) -> Vec<u8> {
    let data: Vec<u8> = pixels.iter().flatten().copied().collect();
    encode(width, height, png::ColorType::Rgb, &data)
}

/// Encode 8-bit RGBA pixels as a PNG.
pub fn rgba_png(width: u32, height: u32, pixels: &[[u8; 4]]) -> Vec<u8> {
    let data: Vec<u8> = pixels.iter().flatten().copied().collect();
    encode(width, height, png::ColorType::Rgba, &data)
}

/// Encode 8-bit grayscale values as a PNG.
pub fn gray_png(width: u32, height: u32, values: &[u8]) -> Vec<u8> {
    encode(width, height, png::ColorType::Grayscale, values)
}

fn encode(width: u32, height: u32, color_type: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("Failed to write PNG header");
        writer
            .write_image_data(data)
            .expect("Failed to write PNG data");
    }
    buf.into_inner()
}

/// Encode 8-bit RGB pixels as a baseline JPEG.
pub fn rgb_jpeg(width: u32, height: u32, pixels: &[[u8; 3]]) -> Vec<u8> {
    let data: Vec<u8> = pixels.iter().flatten().copied().collect();
    let image = image::RgbImage::from_raw(width, height, data).expect("Pixel count does not match size");
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut buf, image::ImageFormat::Jpeg)
        .expect("Failed to encode JPEG");
    buf.into_inner()
}

/// Write bytes to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("Failed to write fixture file");
    path
}

/// Pipeline settings for `k` colors with a fixed seed.
pub fn seeded_settings(k: usize, seed: u64) -> PipelineSettings {
    let mut settings = PipelineSettings::new(k);
    settings.options = settings.options.seed(seed);
    settings
}
