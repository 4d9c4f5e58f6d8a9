//! Agent entity and its lifecycle state machine.
//!
//! # State Transitions
//!
//! ```text
//! Idle ──> Working ──> Completed
//!            │  ▲ └──> Error
//!            └──┘ (progress update, non-decreasing)
//! ```
//!
//! The only way back to `Idle` is a run-start reset.

use super::role::AgentRole;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an agent within one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Waiting for its phase
    #[default]
    Idle,
    /// Generation call in flight
    Working,
    /// Phase result accepted
    Completed,
    /// Phase failed
    Error,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Idle => "idle",
            AgentStatus::Working => "working",
            AgentStatus::Completed => "completed",
            AgentStatus::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentStatus::Completed | AgentStatus::Error)
    }

    /// Whether `next` is reachable from `self` without a reset.
    ///
    /// `Working -> Working` is the progress-update edge.
    pub fn can_transition_to(&self, next: AgentStatus) -> bool {
        matches!(
            (self, next),
            (AgentStatus::Idle, AgentStatus::Working)
                | (AgentStatus::Working, AgentStatus::Working)
                | (AgentStatus::Working, AgentStatus::Completed)
                | (AgentStatus::Working, AgentStatus::Error)
        )
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One member of the build crew (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub role: AgentRole,
    pub name: String,
    pub specialty: String,
    pub status: AgentStatus,
    /// Percentage in `0..=100`
    pub progress: u8,
}

impl Agent {
    pub fn new(role: AgentRole) -> Self {
        Self {
            role,
            name: role.display_name().to_string(),
            specialty: role.specialty().to_string(),
            status: AgentStatus::Idle,
            progress: 0,
        }
    }

    pub fn id(&self) -> &'static str {
        self.role.as_str()
    }

    pub fn is_working(&self) -> bool {
        self.status == AgentStatus::Working
    }

    /// Apply a transition, enforcing the lifecycle table and progress bounds.
    ///
    /// `Completed` is always recorded at 100. `Error` keeps the last progress
    /// so a failure report can show how far the agent got.
    pub fn apply(&mut self, next: AgentStatus, progress: u8) -> Result<(), DomainError> {
        let invalid = || DomainError::InvalidTransition {
            role: self.role,
            from: self.status,
            to: next,
            progress,
        };

        if progress > 100 || !self.status.can_transition_to(next) {
            return Err(invalid());
        }

        match next {
            AgentStatus::Working => {
                if self.status == AgentStatus::Working && progress < self.progress {
                    return Err(invalid());
                }
                self.progress = progress;
            }
            AgentStatus::Completed => self.progress = 100,
            AgentStatus::Error => {}
            AgentStatus::Idle => return Err(invalid()),
        }
        self.status = next;
        Ok(())
    }

    pub(crate) fn reset(&mut self) {
        self.status = AgentStatus::Idle;
        self.progress = 0;
    }
}
