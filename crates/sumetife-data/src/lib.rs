//! Data layer for sumetife.
//!
//! Decoders for CSV and JSON metric files, encoders for JSON and YAML
//! summaries, the filesystem capability and handler that wrap them with file
//! I/O, input file discovery, and the per-category accumulator.

pub mod aggregator;
pub mod decoder;
pub mod encoder;
pub mod fs;
pub mod handler;
pub mod reader;

pub use sumetife_core as core;
