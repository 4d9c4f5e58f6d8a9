//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod generation;
mod logging;
mod output;
mod pipeline;

pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use pipeline::FilePipelineConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("generation.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("generation.model cannot be empty")]
    EmptyModelName,

    #[error("generation.endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("generation.temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("pipeline.initial_progress.{phase} must be at most 100, got {value}")]
    InvalidProgress { phase: &'static str, value: u8 },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Build loop limits and initial progress
    pub pipeline: FilePipelineConfig,
    /// Generation backend settings
    pub generation: FileGenerationConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Message transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.generation.validate()?;
        self.pipeline.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildcrew_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[pipeline]
max_component_files = 5
max_model_files = 1

[pipeline.initial_progress]
architecture = 30

[generation]
endpoint = "http://localhost:11434/v1"
model = "llama3.1"
api_key_env = "LOCAL_API_KEY"
timeout_seconds = 30
temperature = 0.2

[output]
format = "json"
color = false

[logging]
message_log = "logs/messages.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pipeline.max_component_files, 5);
        assert_eq!(config.pipeline.max_model_files, 1);
        assert_eq!(config.pipeline.initial_progress.architecture, 30);
        assert_eq!(config.pipeline.initial_progress.data_modeling, 20);
        assert_eq!(config.generation.model, "llama3.1");
        assert_eq!(config.generation.timeout_seconds, 30);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert_eq!(
            config.logging.message_log.as_deref(),
            Some(std::path::Path::new("logs/messages.jsonl"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[generation]
model = "gpt-4o"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generation.model, "gpt-4o");
        // Defaults should apply
        assert_eq!(config.generation.timeout_seconds, 120);
        assert_eq!(config.pipeline.max_component_files, 3);
        assert!(config.output.color);
        assert!(config.logging.message_log.is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(FileConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = FileConfig::default();
        config.generation.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_rejects_progress_over_100() {
        let mut config = FileConfig::default();
        config.pipeline.initial_progress.deployment_config = 120;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidProgress {
                phase: "deployment_config",
                value: 120
            })
        );
    }
}
