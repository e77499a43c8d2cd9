pub mod image_source;
pub mod png_codec;

pub use image_source::decode_image;
pub use png_codec::{decode_png, encode_png, optimize_png, pack_nbits, MAX_INDEXED_COLORS};
