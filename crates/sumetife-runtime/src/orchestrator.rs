//! Aggregation driver.
//!
//! Runs one aggregate run end to end: discovers the input files, decodes each
//! one through the [`MetricHandler`], folds in-range metrics into an
//! [`Accumulator`], and writes the sorted totals to the output file. Files are
//! processed one at a time, in path order.

use std::path::PathBuf;

use sumetife_core::error::{MetricError, Result};
use sumetife_core::models::{AggregateResult, DecodeFailurePolicy};
use sumetife_core::settings::RunConfig;
use sumetife_data::aggregator::Accumulator;
use sumetife_data::fs::{FileSystem, LocalFileSystem};
use sumetife_data::handler::MetricHandler;
use sumetife_data::reader::find_metric_files;
use tracing::{debug, warn};

// ── Public types ──────────────────────────────────────────────────────────────

/// Outcome of a successful aggregate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Files decoded and folded into the totals.
    pub files_processed: usize,
    /// Files left out under [`DecodeFailurePolicy::Skip`].
    pub files_skipped: usize,
    /// Metrics decoded across all processed files.
    pub records_read: usize,
    /// Metrics that fell inside the time range.
    pub records_in_range: usize,
    /// Totals per category, sorted by category.
    pub results: Vec<AggregateResult>,
    /// Where the encoded results were written.
    pub output_path: PathBuf,
}

// ── AggregationDriver ─────────────────────────────────────────────────────────

/// Drives one aggregate run over a bound [`MetricHandler`].
pub struct AggregationDriver<F = LocalFileSystem> {
    handler: MetricHandler<F>,
}

impl AggregationDriver<LocalFileSystem> {
    /// Driver using the built-in decoder and encoder for `config`'s formats.
    pub fn for_config(config: &RunConfig) -> Self {
        Self::new(MetricHandler::for_formats(
            config.input_format,
            config.output_format,
        ))
    }
}

impl<F: FileSystem> AggregationDriver<F> {
    pub fn new(handler: MetricHandler<F>) -> Self {
        Self { handler }
    }

    /// Execute the run described by `config`.
    ///
    /// Under [`DecodeFailurePolicy::Abort`] the first file that cannot be
    /// opened or decoded ends the run with that error and no output is
    /// written. Under [`DecodeFailurePolicy::Skip`] such files are logged and
    /// left out. Overflow and output errors always end the run.
    pub fn run(&self, config: &RunConfig) -> Result<RunSummary> {
        let files = find_metric_files(&config.directory, config.input_format)?;
        if files.is_empty() {
            warn!(
                "No .{} files found in {}; writing an empty summary",
                config.input_format.extension(),
                config.directory.display()
            );
        }

        let mut accumulator = Accumulator::new();
        let mut files_processed = 0;
        let mut files_skipped = 0;
        let mut records_read = 0;
        let mut records_in_range = 0;

        for path in &files {
            let metrics = match self.handler.get_metrics_from_file(path) {
                Ok(metrics) => metrics,
                Err(err) if should_skip(&err, config.on_error) => {
                    warn!("Skipping {}: {}", path.display(), err);
                    files_skipped += 1;
                    continue;
                }
                Err(err) => return Err(err),
            };

            let in_range = accumulator.add_in_range(&metrics, &config.range)?;
            debug!(
                "File {}: {} read, {} in range",
                path.display(),
                metrics.len(),
                in_range
            );

            files_processed += 1;
            records_read += metrics.len();
            records_in_range += in_range;
        }

        if accumulator.is_empty() && records_read > 0 {
            debug!(
                "None of {} records fell inside [{}, {})",
                records_read,
                config.range.start().to_rfc3339(),
                config.range.end().to_rfc3339()
            );
        }
        let categories = accumulator.len();

        let results = accumulator.into_results();
        self.handler
            .write_result_to_file(&config.output_path, &results)?;

        debug!(
            "Processed {} files ({} skipped): {} of {} records in range, {} categories",
            files_processed, files_skipped, records_in_range, records_read, categories
        );

        Ok(RunSummary {
            files_processed,
            files_skipped,
            records_read,
            records_in_range,
            results,
            output_path: config.output_path.clone(),
        })
    }
}

/// Run `config` against the real filesystem.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    AggregationDriver::for_config(config).run(config)
}

/// Only per-file input failures are skippable.
fn should_skip(err: &MetricError, policy: DecodeFailurePolicy) -> bool {
    policy == DecodeFailurePolicy::Skip
        && matches!(
            err,
            MetricError::FileOpen { .. } | MetricError::Decode { .. }
        )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
