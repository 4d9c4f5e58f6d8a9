//! Infrastructure layer for buildcrew
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod generation;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileGenerationConfig, FileLoggingConfig,
    FileOutputConfig, FilePipelineConfig,
};
pub use generation::{FixtureError, FixtureGenerationService};
#[cfg(feature = "http")]
pub use generation::{HttpGenerationError, HttpGenerationService};
pub use logging::JsonlMessageLog;
