use kmeans_quant::PixelGrid;

use super::png_codec::{composite_over_white, decode_png};
use crate::error::ImageError;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Decode any supported input image into an RGB pixel grid.
///
/// PNG goes through [`decode_png`]. JPEG, GIF (first frame), BMP and TIFF
/// are decoded by the `image` crate; alpha is composited against white the
/// same way.
pub fn decode_image(bytes: &[u8]) -> Result<PixelGrid, ImageError> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        return decode_png(bytes);
    }

    let format = image::guess_format(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;
    let rgba = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::Decode(e.to_string()))?
        .to_rgba8();

    let (width, height) = rgba.dimensions();
    let pixels: Vec<[u8; 3]> = rgba
        .pixels()
        .map(|p| composite_over_white([p[0], p[1], p[2]], p[3]))
        .collect();

    tracing::debug!(width, height, format = ?format, "Decoded image");

    Ok(PixelGrid::new(width as usize, height as usize, pixels)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    /// Left half black, right half white
    fn halves(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn test_decode_jpeg() {
        let jpeg = encode(DynamicImage::ImageRgb8(halves(16, 8)), ImageFormat::Jpeg);
        let grid = decode_image(&jpeg).unwrap();

        assert_eq!(grid.width(), 16);
        assert_eq!(grid.height(), 8);
        // lossy, so only check well away from the edge
        let left = grid.get(1, 4).unwrap();
        let right = grid.get(14, 4).unwrap();
        assert!(left.iter().all(|&c| c < 40), "left {left:?}");
        assert!(right.iter().all(|&c| c > 215), "right {right:?}");
    }

    #[test]
    fn test_decode_bmp_is_exact() {
        let bmp = encode(DynamicImage::ImageRgb8(halves(4, 2)), ImageFormat::Bmp);
        let grid = decode_image(&bmp).unwrap();
        assert_eq!(&grid.pixels()[..4], &[[0, 0, 0], [0, 0, 0], [255, 255, 255], [255, 255, 255]]);
    }

    #[test]
    fn test_decode_tiff_composites_alpha() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        rgba.put_pixel(1, 0, Rgba([10, 20, 30, 0]));
        let tiff = encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Tiff);

        let grid = decode_image(&tiff).unwrap();
        assert_eq!(grid.pixels(), &[[10, 20, 30], [255, 255, 255]]);
    }

    #[test]
    fn test_png_uses_png_decoder() {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 2, 1);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 200]).unwrap();
        }
        let grid = decode_image(&bytes).unwrap();
        assert_eq!(grid.pixels(), &[[0, 0, 0], [200, 200, 200]]);
    }

    #[test]
    fn test_unknown_format() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
    }
}
