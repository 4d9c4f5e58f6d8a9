//! Per-agent status tracking.

use super::entities::{Agent, AgentStatus};
use super::role::AgentRole;
use crate::core::error::DomainError;

/// Holds the lifecycle state of every agent.
///
/// Transitions are the only way agent state changes; see
/// [`AgentStatus::can_transition_to`] for the table.
#[derive(Debug, Clone)]
pub struct StatusTracker {
    agents: Vec<Agent>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            agents: AgentRole::ALL.iter().copied().map(Agent::new).collect(),
        }
    }

    /// Put every agent back to idle at progress 0
    pub fn reset(&mut self) {
        for agent in &mut self.agents {
            agent.reset();
        }
    }

    /// Apply a state change and return the updated agent.
    ///
    /// On error the agent is left untouched.
    pub fn transition(
        &mut self,
        role: AgentRole,
        status: AgentStatus,
        progress: u8,
    ) -> Result<Agent, DomainError> {
        let agent = self.agent_mut(role);
        agent.apply(status, progress)?;
        Ok(agent.clone())
    }

    pub fn get(&self, role: AgentRole) -> &Agent {
        &self.agents[Self::index(role)]
    }

    /// Read-only copy of all agents in pipeline order
    pub fn snapshot(&self) -> Vec<Agent> {
        self.agents.clone()
    }

    /// Agents currently in `Working`
    pub fn working(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| a.is_working())
    }

    fn agent_mut(&mut self, role: AgentRole) -> &mut Agent {
        &mut self.agents[Self::index(role)]
    }

    fn index(role: AgentRole) -> usize {
        // Discriminants follow `AgentRole::ALL` order
        role as usize
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_has_all_roles_idle() {
        let tracker = StatusTracker::new();
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.len(), 6);
        assert!(snapshot.iter().all(|a| a.status == AgentStatus::Idle));
        assert_eq!(snapshot[0].role, AgentRole::Architect);
        assert_eq!(snapshot[5].role, AgentRole::Devops);
    }

    #[test]
    fn test_transition_updates_only_target() {
        let mut tracker = StatusTracker::new();
        let updated = tracker
            .transition(AgentRole::Backend, AgentStatus::Working, 15)
            .unwrap();
        assert_eq!(updated.progress, 15);
        assert_eq!(tracker.get(AgentRole::Backend).status, AgentStatus::Working);
        assert_eq!(tracker.get(AgentRole::Frontend).status, AgentStatus::Idle);
        assert_eq!(tracker.working().count(), 1);
    }

    #[test]
    fn test_failed_transition_leaves_state() {
        let mut tracker = StatusTracker::new();
        let result = tracker.transition(AgentRole::Database, AgentStatus::Completed, 100);
        assert!(result.is_err());
        assert_eq!(tracker.get(AgentRole::Database).status, AgentStatus::Idle);
    }

    #[test]
    fn test_reset_restores_idle() {
        let mut tracker = StatusTracker::new();
        tracker
            .transition(AgentRole::Architect, AgentStatus::Working, 20)
            .unwrap();
        tracker
            .transition(AgentRole::Architect, AgentStatus::Completed, 100)
            .unwrap();
        tracker
            .transition(AgentRole::Frontend, AgentStatus::Working, 20)
            .unwrap();
        tracker
            .transition(AgentRole::Frontend, AgentStatus::Error, 20)
            .unwrap();

        tracker.reset();

        for agent in tracker.snapshot() {
            assert_eq!(agent.status, AgentStatus::Idle);
            assert_eq!(agent.progress, 0);
        }
        assert_eq!(tracker.working().count(), 0);
    }
}
