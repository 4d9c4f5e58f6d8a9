//! Configuration file loading for buildcrew
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `BUILDCREW_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./buildcrew.toml` or `./.buildcrew.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/buildcrew/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGenerationConfig, FileLoggingConfig,
    FileOutputConfig, FilePipelineConfig,
};
pub use loader::ConfigLoader;
