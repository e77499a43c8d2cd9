//! Public API for the kmeans-quant crate.
//!
//! This module provides the high-level API: the [`ColorQuantizer`] builder
//! and the [`QuantError`] unified error type.

mod builder;
mod error;

pub use builder::{ColorQuantizer, QuantizeOutcome};
pub use error::QuantError;
