//! Application-level configuration.
//!
//! - [`PipelineConfig`]: build loop control (file limits, initial progress)

pub mod pipeline;

pub use pipeline::{PhaseProgress, PipelineConfig};
