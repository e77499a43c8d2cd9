use std::path::Path;

use kmeans_quant::{ClusterReport, ColorQuantizer, ColorVector, PixelGrid, QuantizeOutcome, QuantizedImage};
use serde::Serialize;

use crate::error::PipelineError;
use crate::models::PipelineSettings;
use crate::rendering::{decode_image, encode_png, optimize_png};

/// Result from running the quantize pipeline
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Encoded output PNG
    pub png_bytes: Vec<u8>,
    pub width: usize,
    pub height: usize,
    /// Statistics of the clustering run
    pub report: ClusterReport,
    /// Palette with per-color pixel counts
    pub palette: Vec<PaletteEntry>,
}

/// Palette of an image without encoding an output
#[derive(Debug, Clone)]
pub struct PaletteSummary {
    pub width: usize,
    pub height: usize,
    pub report: ClusterReport,
    pub entries: Vec<PaletteEntry>,
}

/// One output color and how much of the image it covers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteEntry {
    pub index: usize,
    /// `#rrggbb`
    pub hex: String,
    pub rgb: [u8; 3],
    /// Pixels mapped to this color
    pub pixels: usize,
    /// Fraction of all pixels (0.0 - 1.0)
    pub share: f64,
}

/// Pipeline that orchestrates decode → cluster → quantize → encode
pub struct QuantizePipeline {
    settings: PipelineSettings,
}

impl QuantizePipeline {
    pub fn new(settings: PipelineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Quantize an encoded image (PNG, JPEG, GIF, BMP or TIFF) and encode
    /// the result as PNG.
    pub fn run(&self, bytes: &[u8]) -> Result<PipelineResult, PipelineError> {
        let (grid, outcome) = self.quantize(bytes)?;

        let mut encoded = encode_png(&outcome.image, self.settings.format)?;
        if self.settings.optimize {
            encoded = optimize_png(encoded);
        }

        tracing::info!(
            width = grid.width(),
            height = grid.height(),
            colors = outcome.image.palette().len(),
            bytes = encoded.len(),
            format = ?self.settings.format,
            "Encoded quantized image"
        );

        Ok(PipelineResult {
            png_bytes: encoded,
            width: grid.width(),
            height: grid.height(),
            palette: palette_entries(&outcome.image),
            report: outcome.report,
        })
    }

    /// Compute the palette of an encoded image without encoding an output.
    pub fn analyze(&self, bytes: &[u8]) -> Result<PaletteSummary, PipelineError> {
        let (grid, outcome) = self.quantize(bytes)?;

        Ok(PaletteSummary {
            width: grid.width(),
            height: grid.height(),
            entries: palette_entries(&outcome.image),
            report: outcome.report,
        })
    }

    /// Read `input`, quantize it and write the PNG to `output`.
    pub fn run_file(&self, input: &Path, output: &Path) -> Result<PipelineResult, PipelineError> {
        let bytes = std::fs::read(input).map_err(|source| PipelineError::Io {
            path: input.to_path_buf(),
            source,
        })?;

        let result = self.run(&bytes)?;

        std::fs::write(output, &result.png_bytes).map_err(|source| PipelineError::Io {
            path: output.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %output.display(), bytes = result.png_bytes.len(), "Wrote output");

        Ok(result)
    }

    fn quantize(&self, bytes: &[u8]) -> Result<(PixelGrid, QuantizeOutcome), PipelineError> {
        let grid = decode_image(bytes)?;
        tracing::info!(
            width = grid.width(),
            height = grid.height(),
            k = self.settings.options.k,
            "Clustering image colors"
        );

        let outcome = ColorQuantizer::with_options(self.settings.options.clone()).run(&grid)?;

        let report = &outcome.report;
        tracing::debug!(
            iterations = report.iterations,
            converged = report.converged,
            inertia = report.inertia,
            seed = report.seed,
            "Clustering finished"
        );
        if !report.converged {
            tracing::debug!(
                max_iterations = self.settings.options.max_iterations,
                "Stopped at iteration cap before assignments settled"
            );
        }

        Ok((grid, outcome))
    }
}

/// Palette entries in index order with pixel counts and shares.
pub fn palette_entries(image: &QuantizedImage) -> Vec<PaletteEntry> {
    let total = image.indices().len().max(1) as f64;
    image
        .palette()
        .iter()
        .zip(image.histogram())
        .enumerate()
        .map(|(index, (&rgb, pixels))| PaletteEntry {
            index,
            hex: ColorVector::from_bytes(rgb).to_hex(),
            rgb,
            pixels,
            share: pixels as f64 / total,
        })
        .collect()
}
