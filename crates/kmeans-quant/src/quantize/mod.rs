//! Quantization: recolor pixels to their nearest centroid.
//!
//! [`Quantizer`] consumes a [`ClusterModel`](crate::ClusterModel) and a
//! [`PixelGrid`](crate::PixelGrid) and produces a [`QuantizedImage`]:
//!
//! - **Indexed** ([`QuantizedImage::indices`]): one palette index per pixel
//! - **RGB** ([`QuantizedImage::to_rgb_bytes`], [`QuantizedImage::to_grid`]):
//!   the palette colors themselves

mod quantized_image;
mod quantizer;

pub use quantized_image::QuantizedImage;
pub use quantizer::{QuantizeError, Quantizer};
