//! Orchestration domain entities

use crate::agent::role::AgentRole;
use crate::project::accumulator::ProjectField;
use serde::{Deserialize, Serialize};

/// One step of the fixed build sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Architect produces the overall plan
    Architecture,
    /// Frontend designer, runs alongside `BackendDesign`
    FrontendDesign,
    /// Backend designer, runs alongside `FrontendDesign`
    BackendDesign,
    /// Data modeler derives tables from the backend models
    DataModeling,
    /// Code generator writes one file per selected component or model
    Implementation,
    /// DevOps engineer writes deployment files
    DeploymentConfig,
}

impl Phase {
    /// All phases in execution order (the two design phases share a slot)
    pub const ALL: [Phase; 6] = [
        Phase::Architecture,
        Phase::FrontendDesign,
        Phase::BackendDesign,
        Phase::DataModeling,
        Phase::Implementation,
        Phase::DeploymentConfig,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Architecture => "architecture",
            Phase::FrontendDesign => "frontend_design",
            Phase::BackendDesign => "backend_design",
            Phase::DataModeling => "data_modeling",
            Phase::Implementation => "implementation",
            Phase::DeploymentConfig => "deployment_config",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Architecture => "Architecture",
            Phase::FrontendDesign => "Frontend Design",
            Phase::BackendDesign => "Backend Design",
            Phase::DataModeling => "Data Modeling",
            Phase::Implementation => "Implementation",
            Phase::DeploymentConfig => "Deployment Config",
        }
    }

    /// The agent that executes this phase
    pub fn agent(&self) -> AgentRole {
        match self {
            Phase::Architecture => AgentRole::Architect,
            Phase::FrontendDesign => AgentRole::Frontend,
            Phase::BackendDesign => AgentRole::Backend,
            Phase::DataModeling => AgentRole::Database,
            Phase::Implementation => AgentRole::CodeGenerator,
            Phase::DeploymentConfig => AgentRole::Devops,
        }
    }

    /// Phases whose output this phase reads
    pub fn depends_on(&self) -> &'static [Phase] {
        match self {
            Phase::Architecture => &[],
            Phase::FrontendDesign | Phase::BackendDesign => &[Phase::Architecture],
            Phase::DataModeling => &[Phase::BackendDesign],
            Phase::Implementation => &[Phase::FrontendDesign, Phase::BackendDesign],
            Phase::DeploymentConfig => &[Phase::Architecture],
        }
    }

    /// The project field this phase writes
    pub fn output(&self) -> ProjectField {
        match self {
            Phase::Architecture => ProjectField::Architecture,
            Phase::FrontendDesign => ProjectField::FrontendDesign,
            Phase::BackendDesign => ProjectField::BackendDesign,
            Phase::DataModeling => ProjectField::DatabaseDesign,
            Phase::Implementation => ProjectField::GeneratedFiles,
            Phase::DeploymentConfig => ProjectField::DeploymentConfig,
        }
    }

    /// Project fields this phase reads
    pub fn inputs(&self) -> Vec<ProjectField> {
        self.depends_on().iter().map(Phase::output).collect()
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State of the overall build run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Succeeded => "succeeded",
            RunState::Failed => "failed",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
