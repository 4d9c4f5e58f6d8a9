//! Pipeline parameters for the build loop.
//!
//! [`PipelineConfig`] groups the static parameters that control the build
//! sequence in [`Orchestrator`](crate::use_cases::run_build::Orchestrator).
//! These are application-layer concerns, not domain policy.

use buildcrew_domain::Phase;
use serde::{Deserialize, Serialize};

/// Progress an agent reports as soon as its generation call starts.
///
/// The implementation phase is not listed: its progress is derived from
/// the number of files written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseProgress {
    pub architecture: u8,
    pub frontend_design: u8,
    pub backend_design: u8,
    pub data_modeling: u8,
    pub deployment_config: u8,
}

impl Default for PhaseProgress {
    fn default() -> Self {
        Self {
            architecture: 20,
            frontend_design: 15,
            backend_design: 15,
            data_modeling: 20,
            deployment_config: 10,
        }
    }
}

impl PhaseProgress {
    pub fn for_phase(&self, phase: Phase) -> u8 {
        let value = match phase {
            Phase::Architecture => self.architecture,
            Phase::FrontendDesign => self.frontend_design,
            Phase::BackendDesign => self.backend_design,
            Phase::DataModeling => self.data_modeling,
            Phase::Implementation => 0,
            Phase::DeploymentConfig => self.deployment_config,
        };
        value.min(100)
    }
}

/// Build loop control parameters.
///
/// The implementation phase writes one file per selected frontend
/// component and per selected backend model; the limits bound how many of
/// each are selected, in the order the design phases listed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum number of component files to generate.
    pub max_component_files: usize,
    /// Maximum number of model files to generate.
    pub max_model_files: usize,
    /// Initial progress per phase.
    pub initial_progress: PhaseProgress,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_component_files: 3,
            max_model_files: 2,
            initial_progress: PhaseProgress::default(),
        }
    }
}

impl PipelineConfig {
    // ==================== Builder Methods ====================

    pub fn with_max_component_files(mut self, max: usize) -> Self {
        self.max_component_files = max;
        self
    }

    pub fn with_max_model_files(mut self, max: usize) -> Self {
        self.max_model_files = max;
        self
    }

    pub fn with_initial_progress(mut self, progress: PhaseProgress) -> Self {
        self.initial_progress = progress;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_component_files, 3);
        assert_eq!(config.max_model_files, 2);
        assert_eq!(config.initial_progress.for_phase(Phase::Architecture), 20);
        assert_eq!(config.initial_progress.for_phase(Phase::Implementation), 0);
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::default()
            .with_max_component_files(5)
            .with_max_model_files(0);

        assert_eq!(config.max_component_files, 5);
        assert_eq!(config.max_model_files, 0);
    }

    #[test]
    fn test_initial_progress_is_capped() {
        let progress = PhaseProgress {
            architecture: 250,
            ..PhaseProgress::default()
        };
        assert_eq!(progress.for_phase(Phase::Architecture), 100);
    }
}
