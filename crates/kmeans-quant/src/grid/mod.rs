//! Pixel grids at the input and output boundaries.

mod pixel_grid;

pub use pixel_grid::{GridError, PixelGrid};
