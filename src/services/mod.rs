pub mod quantize_pipeline;

pub use quantize_pipeline::{
    palette_entries, PaletteEntry, PaletteSummary, PipelineResult, QuantizePipeline,
};
