//! Shared domain types for sumetife.
//!
//! Holds the metric and aggregate-result models, the half-open time range,
//! input/output format selectors, the result formatter, error types and the
//! command-line settings consumed by the runtime and binary crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
