//! Pipeline configuration from TOML (`[pipeline]` section)

use super::ConfigValidationError;
use buildcrew_application::{PhaseProgress, PipelineConfig};
use serde::{Deserialize, Serialize};

/// Raw pipeline configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// Components turned into source files
    pub max_component_files: usize,
    /// Models turned into source files
    pub max_model_files: usize,
    /// Progress reported when each phase's call starts
    pub initial_progress: PhaseProgress,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        let pipeline = PipelineConfig::default();
        Self {
            max_component_files: pipeline.max_component_files,
            max_model_files: pipeline.max_model_files,
            initial_progress: pipeline.initial_progress,
        }
    }
}

impl FilePipelineConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigValidationError> {
        let progress = &self.initial_progress;
        for (phase, value) in [
            ("architecture", progress.architecture),
            ("frontend_design", progress.frontend_design),
            ("backend_design", progress.backend_design),
            ("data_modeling", progress.data_modeling),
            ("deployment_config", progress.deployment_config),
        ] {
            if value > 100 {
                return Err(ConfigValidationError::InvalidProgress { phase, value });
            }
        }
        Ok(())
    }

    /// Convert to the application layer's [`PipelineConfig`]
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_max_component_files(self.max_component_files)
            .with_max_model_files(self.max_model_files)
            .with_initial_progress(self.initial_progress.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_application_default() {
        assert_eq!(
            FilePipelineConfig::default().to_pipeline_config(),
            PipelineConfig::default()
        );
    }

    #[test]
    fn test_zero_limits_are_allowed() {
        let config = FilePipelineConfig {
            max_component_files: 0,
            max_model_files: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.to_pipeline_config().max_component_files, 0);
    }
}
