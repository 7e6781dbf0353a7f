//! Per-category summation of in-range metrics.

use std::collections::HashMap;

use sumetife_core::error::{MetricError, Result};
use sumetife_core::formatting::format_results;
use sumetife_core::models::{AggregateResult, Metric, TimeRange};

// ── Accumulator ───────────────────────────────────────────────────────────────

/// Running category → total mapping for one aggregate run.
///
/// Sums use checked `i64` arithmetic; a total that would overflow is an
/// error rather than a wrapped value.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    totals: HashMap<String, i64>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one metric's value to its category total.
    pub fn add(&mut self, metric: &Metric) -> Result<()> {
        match self.totals.get_mut(&metric.category) {
            Some(total) => {
                *total = total
                    .checked_add(metric.value)
                    .ok_or_else(|| MetricError::Overflow {
                        category: metric.category.clone(),
                    })?;
            }
            None => {
                self.totals.insert(metric.category.clone(), metric.value);
            }
        }
        Ok(())
    }

    /// Add every metric that falls inside `range`; returns how many did.
    pub fn add_in_range(&mut self, metrics: &[Metric], range: &TimeRange) -> Result<usize> {
        let mut added = 0;
        for metric in metrics.iter().filter(|m| range.contains(m)) {
            self.add(metric)?;
            added += 1;
        }
        Ok(added)
    }

    /// Number of distinct categories seen.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Consume the accumulator into results sorted by category.
    pub fn into_results(self) -> Vec<AggregateResult> {
        format_results(self.totals)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
