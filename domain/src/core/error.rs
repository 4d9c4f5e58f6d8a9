//! Domain error types

use crate::agent::entities::AgentStatus;
use crate::agent::role::AgentRole;
use crate::project::accumulator::ProjectField;
use thiserror::Error;

/// Domain-level errors
///
/// `InvalidTransition`, `DuplicateWrite` and `DependencyNotReady` are
/// invariant violations: they indicate a bug in the orchestration flow,
/// never a user mistake.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid requirement: {0}")]
    InvalidRequirement(String),

    #[error("Invalid transition for {role}: {from} -> {to} (progress {progress})")]
    InvalidTransition {
        role: AgentRole,
        from: AgentStatus,
        to: AgentStatus,
        progress: u8,
    },

    #[error("Field '{0}' was already written in this run")]
    DuplicateWrite(ProjectField),

    #[error("Field '{0}' is not available yet; its producing phase has not completed")]
    DependencyNotReady(ProjectField),
}

impl DomainError {
    /// Whether this error is an internal invariant violation rather than bad input
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(self, DomainError::InvalidRequirement(_))
    }
}
