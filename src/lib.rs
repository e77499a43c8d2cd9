//! kpalette - k-means color quantization
//!
//! PNG decoding/encoding, configuration and the quantize pipeline around
//! the `kmeans-quant` core. This library exposes modules for integration
//! testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
