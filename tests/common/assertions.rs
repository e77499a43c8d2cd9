//! Assertion helpers for tests.

use kmeans_quant::PixelGrid;
use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert the PNG header has the expected color type
pub fn assert_color_type(bytes: &[u8], expected: png::ColorType) {
    let reader = png::Decoder::new(std::io::Cursor::new(bytes))
        .read_info()
        .expect("Failed to read PNG header");
    assert_eq!(reader.info().color_type, expected);
}

/// Assert every pixel of `grid` is one of `palette`, and return the number
/// of distinct colors used
pub fn assert_only_palette_colors(grid: &PixelGrid, palette: &[[u8; 3]]) -> usize {
    let mut used: Vec<[u8; 3]> = Vec::new();
    for px in grid.pixels() {
        assert!(
            palette.contains(px),
            "Pixel {:?} is not in palette {:?}",
            px,
            palette
        );
        if !used.contains(px) {
            used.push(*px);
        }
    }
    used.len()
}
