//! File-level I/O around a bound decoder/encoder pair.
//!
//! The handler opens input files and hands their streams to the decoder, and
//! hands aggregated results to the encoder before writing the bytes out. It
//! never filters or sums; that belongs to the aggregation driver.

use std::path::Path;

use sumetife_core::error::{MetricError, Result};
use sumetife_core::models::{AggregateResult, InputFormat, Metric, OutputFormat};
use tracing::debug;

use crate::decoder::{decoder_for, MetricDecoder};
use crate::encoder::{encoder_for, MetricEncoder};
use crate::fs::{FileSystem, LocalFileSystem};

// ── MetricHandler ─────────────────────────────────────────────────────────────

/// Binds one decoder, one encoder and one filesystem for the duration of a run.
pub struct MetricHandler<F = LocalFileSystem> {
    decoder: Box<dyn MetricDecoder>,
    encoder: Box<dyn MetricEncoder>,
    fs: F,
}

impl MetricHandler<LocalFileSystem> {
    /// Handler over the real filesystem.
    pub fn new(decoder: Box<dyn MetricDecoder>, encoder: Box<dyn MetricEncoder>) -> Self {
        Self::with_file_system(decoder, encoder, LocalFileSystem)
    }

    /// Handler over the real filesystem using the built-in strategies.
    pub fn for_formats(input: InputFormat, output: OutputFormat) -> Self {
        Self::new(decoder_for(input), encoder_for(output))
    }
}

impl<F: FileSystem> MetricHandler<F> {
    pub fn with_file_system(
        decoder: Box<dyn MetricDecoder>,
        encoder: Box<dyn MetricEncoder>,
        fs: F,
    ) -> Self {
        Self {
            decoder,
            encoder,
            fs,
        }
    }

    /// Open `path` and decode every metric in it.
    ///
    /// The file is closed before returning on every path, including decode
    /// failure. Open failures become [`MetricError::FileOpen`]; decoder
    /// failures are passed through unchanged inside [`MetricError::Decode`].
    pub fn get_metrics_from_file(&self, path: &Path) -> Result<Vec<Metric>> {
        let mut reader = self.fs.open(path).map_err(|source| MetricError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let metrics = self
            .decoder
            .decode(&mut *reader)
            .map_err(|source| MetricError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Decoded {} metrics from {}", metrics.len(), path.display());
        Ok(metrics)
    }

    /// Encode `results` and write them to `path`, creating or truncating it.
    ///
    /// Nothing is written when encoding fails.
    pub fn write_result_to_file(&self, path: &Path, results: &[AggregateResult]) -> Result<()> {
        let content = self
            .encoder
            .encode(results)
            .map_err(|source| MetricError::Encode {
                path: path.to_path_buf(),
                source,
            })?;

        self.fs
            .write(path, &content)
            .map_err(|source| MetricError::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            "Wrote {} results ({} bytes) to {}",
            results.len(),
            content.len(),
            path.display()
        );
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
