use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::error::{MetricError, Result};

/// A single observation decoded from one CSV row or JSON element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    /// Grouping key the value is summed under (a game level name).
    pub category: String,
    /// Observed value; may be zero or negative.
    pub value: i64,
    /// When the observation was recorded, normalised to UTC.
    pub timestamp: DateTime<Utc>,
}

impl Metric {
    pub fn new(category: impl Into<String>, value: i64, timestamp: DateTime<Utc>) -> Self {
        Self {
            category: category.into(),
            value,
            timestamp,
        }
    }

    /// Returns `true` when `start <= timestamp < end`.
    ///
    /// Both bounds are converted to UTC first, so callers may pass instants in
    /// any offset. The upper bound is exclusive: a metric stamped exactly at
    /// `end` belongs to the next window.
    pub fn is_in_range<S: TimeZone, E: TimeZone>(
        &self,
        start: &DateTime<S>,
        end: &DateTime<E>,
    ) -> bool {
        let start = start.with_timezone(&Utc);
        let end = end.with_timezone(&Utc);
        start <= self.timestamp && self.timestamp < end
    }
}

/// The summed total for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    #[serde(rename = "level_name")]
    pub category: String,
    #[serde(rename = "total_value")]
    pub total: i64,
}

// ── TimeRange ─────────────────────────────────────────────────────────────────

/// Half-open `[start, end)` window of UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Build a range from two instants in any offset.
    ///
    /// Fails with [`MetricError::Argument`] unless `start` is strictly before
    /// `end`.
    pub fn new<S: TimeZone, E: TimeZone>(start: &DateTime<S>, end: &DateTime<E>) -> Result<Self> {
        let start = start.with_timezone(&Utc);
        let end = end.with_timezone(&Utc);
        if start >= end {
            return Err(MetricError::Argument(format!(
                "end time {} must be after start time {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, metric: &Metric) -> bool {
        metric.is_in_range(&self.start, &self.end)
    }
}

// ── Format selectors ──────────────────────────────────────────────────────────

/// Supported input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// File extension (without the dot) that input files must carry.
    pub fn extension(self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Supported output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// File extension (without the dot) of the generated summary.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// What an aggregate run does when one input file cannot be opened or decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DecodeFailurePolicy {
    /// Stop the run and report the error; no output is written.
    #[default]
    Abort,
    /// Log a warning, leave the file out of the totals, and keep going.
    Skip,
}

impl std::fmt::Display for DecodeFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeFailurePolicy::Abort => f.write_str("abort"),
            DecodeFailurePolicy::Skip => f.write_str("skip"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
