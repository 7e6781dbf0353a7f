use chrono::{DateTime, FixedOffset};
use clap::Parser;
use std::path::PathBuf;

use crate::error::{MetricError, Result};
use crate::models::{DecodeFailurePolicy, InputFormat, OutputFormat, TimeRange};
use crate::time_utils::parse_timestamp_arg;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Sum per-level metric values from a directory of CSV or JSON files
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sumetife",
    about = "Sum per-level metric values from a directory of CSV or JSON files",
    version
)]
pub struct Settings {
    /// The directory path; it holds files of a single type, csv or json
    #[arg(short = 'd', long)]
    pub directory: PathBuf,

    /// The type of the input files
    #[arg(short = 't', long = "type", value_enum)]
    pub input_type: InputFormat,

    /// The starting time to scan the data, RFC 3339, inclusive
    #[arg(long = "start-time", visible_alias = "startTime", value_parser = parse_timestamp_arg)]
    pub start_time: DateTime<FixedOffset>,

    /// The ending time to scan the data, RFC 3339, exclusive
    #[arg(long = "end-time", visible_alias = "endTime", value_parser = parse_timestamp_arg)]
    pub end_time: DateTime<FixedOffset>,

    /// The output type of the summary
    #[arg(
        long = "output-file-type",
        visible_alias = "outputFileType",
        value_enum,
        default_value_t = OutputFormat::Json
    )]
    pub output_file_type: OutputFormat,

    /// The output file name of the summary, without extension
    #[arg(
        long = "output-file-name",
        visible_alias = "outputFileName",
        default_value = "out"
    )]
    pub output_file_name: String,

    /// Directory the summary is written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// What to do when an input file cannot be read or decoded
    #[arg(long, value_enum, default_value_t = DecodeFailurePolicy::Abort)]
    pub on_error: DecodeFailurePolicy,

    /// Logging level or filter directive (e.g. `warn`, `sumetife_data=debug`)
    #[arg(long, env = "SUMETIFE_LOG", default_value = "info")]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── RunConfig ──────────────────────────────────────────────────────────────────

/// Validated inputs for one aggregate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub directory: PathBuf,
    pub input_format: InputFormat,
    pub range: TimeRange,
    pub output_format: OutputFormat,
    pub output_path: PathBuf,
    pub on_error: DecodeFailurePolicy,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Effective log level after applying `--debug`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.log_level
        }
    }

    /// Check the values clap cannot check on its own and build a [`RunConfig`].
    ///
    /// Runs before any file is touched; every failure is a
    /// [`MetricError::Argument`].
    pub fn run_config(&self) -> Result<RunConfig> {
        let name = self.output_file_name.trim();
        if name.is_empty() {
            return Err(MetricError::Argument(
                "'--output-file-name' must not be empty".to_string(),
            ));
        }
        if name.contains(['/', '\\']) {
            return Err(MetricError::Argument(format!(
                "'--output-file-name' must be a bare name, got {:?}; use '--output-dir' for the location",
                self.output_file_name
            )));
        }

        let range = TimeRange::new(&self.start_time, &self.end_time)?;
        let output_path = self.output_dir.join(format!(
            "{}.{}",
            name,
            self.output_file_type.extension()
        ));

        Ok(RunConfig {
            directory: self.directory.clone(),
            input_format: self.input_type,
            range,
            output_format: self.output_file_type,
            output_path,
            on_error: self.on_error,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
