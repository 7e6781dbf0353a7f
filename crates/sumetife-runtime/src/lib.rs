//! Runtime layer for sumetife.
//!
//! Drives a complete aggregate run over the data layer: file discovery,
//! decoding, range filtering, summation and the final write.

pub mod orchestrator;

pub use sumetife_core as core;
pub use sumetife_data as data;
