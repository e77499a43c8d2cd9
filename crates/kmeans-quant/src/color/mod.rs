//! Color value types.
//!
//! [`ColorVector`] is the real-valued point used for distance computation.
//! Raw pixels travel as `[u8; 3]` triples or packed `0xAARRGGBB` integers;
//! [`unpack_rgb`] and [`pack_rgb`] convert between the two.

mod vector;

pub use vector::{pack_rgb, unpack_rgb, ColorVector};
