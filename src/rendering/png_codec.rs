use std::io::Cursor;

use kmeans_quant::{PixelGrid, QuantizedImage};

use crate::error::ImageError;
use crate::models::OutputFormat;

/// Largest palette an indexed PNG can carry
pub const MAX_INDEXED_COLORS: usize = 256;

/// Decode a PNG into an RGB pixel grid.
///
/// Palette and low-bit-depth images are expanded, 16-bit channels are
/// stripped to 8, grayscale is widened to RGB and alpha is composited
/// against white.
pub fn decode_png(bytes: &[u8]) -> Result<PixelGrid, ImageError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ImageError::Decode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageError::Decode(e.to_string()))?;
    let data = &buf[..info.buffer_size()];

    let pixels: Vec<[u8; 3]> = match info.color_type {
        png::ColorType::Rgb => data.chunks_exact(3).map(|p| [p[0], p[1], p[2]]).collect(),
        png::ColorType::Rgba => data
            .chunks_exact(4)
            .map(|p| composite_over_white([p[0], p[1], p[2]], p[3]))
            .collect(),
        png::ColorType::Grayscale => data.iter().map(|&v| [v, v, v]).collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .map(|p| composite_over_white([p[0], p[0], p[0]], p[1]))
            .collect(),
        other => return Err(ImageError::UnsupportedColorType(format!("{other:?}"))),
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );

    Ok(PixelGrid::new(info.width as usize, info.height as usize, pixels)?)
}

/// Encode a quantized image as PNG.
///
/// Indexed output stores the palette in `PLTE` and picks the smallest bit
/// depth that holds every index (rows packed MSB-first). `Auto` falls back
/// to RGB8 when the palette exceeds [`MAX_INDEXED_COLORS`].
pub fn encode_png(image: &QuantizedImage, format: OutputFormat) -> Result<Vec<u8>, ImageError> {
    let palette = image.palette();
    let indexed = match format {
        OutputFormat::Indexed if palette.len() > MAX_INDEXED_COLORS => {
            return Err(ImageError::PaletteTooLarge { len: palette.len() });
        }
        OutputFormat::Indexed => true,
        OutputFormat::Auto => palette.len() <= MAX_INDEXED_COLORS,
        OutputFormat::Rgb => false,
    };

    if image.width() == 0 || image.height() == 0 {
        return Err(ImageError::Encode("image has no pixels".to_string()));
    }
    let width = u32::try_from(image.width())
        .map_err(|_| ImageError::Encode(format!("width {} out of range", image.width())))?;
    let height = u32::try_from(image.height())
        .map_err(|_| ImageError::Encode(format!("height {} out of range", image.height())))?;

    if indexed {
        let (depth, bits) = indexed_bit_depth(palette.len());
        let plte: Vec<u8> = palette.iter().flatten().copied().collect();
        let indices: Vec<u8> = image.indices().iter().map(|&i| i as u8).collect();
        let packed = if bits == 8 {
            indices
        } else {
            pack_nbits(&indices, image.width(), bits)
        };
        write_png(width, height, png::ColorType::Indexed, depth, Some(&plte), &packed)
    } else {
        write_png(
            width,
            height,
            png::ColorType::Rgb,
            png::BitDepth::Eight,
            None,
            &image.to_rgb_bytes(),
        )
    }
}

/// Re-compress a PNG with oxipng, keeping the input if that fails.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    let options = oxipng::Options {
        strip: oxipng::StripChunks::Safe,
        optimize_alpha: false,
        ..Default::default()
    };
    match oxipng::optimize_from_memory(&png_bytes, &options) {
        Ok(optimized) => {
            tracing::debug!(before = png_bytes.len(), after = optimized.len(), "Optimized PNG");
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping original");
            png_bytes
        }
    }
}

/// Bit depth for an indexed PNG with `colors` palette entries.
fn indexed_bit_depth(colors: usize) -> (png::BitDepth, u8) {
    match colors {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    }
}

fn write_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Default);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| ImageError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
///
/// Returns an empty buffer for a zero width or any other bit count.
pub fn pack_nbits(indices: &[u8], width: usize, bits: u8) -> Vec<u8> {
    if width == 0 || !matches!(bits, 1 | 2 | 4) {
        return Vec::new();
    }
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = width.div_ceil(pixels_per_byte);
    let height = indices.len() / width;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}

/// Alpha-composite a color against white.
pub(crate) fn composite_over_white(rgb: [u8; 3], a: u8) -> [u8; 3] {
    match a {
        255 => rgb,
        0 => [255, 255, 255],
        _ => {
            let af = a as u16;
            rgb.map(|c| ((c as u16 * af + 255 * (255 - af)) / 255) as u8)
        }
    }
}
