//! Progress notification port
//!
//! Defines the interface for observing a build run as it happens.

use buildcrew_domain::{Agent, Message, Phase, RunState};
use tokio::sync::mpsc;

/// Callback for progress updates during a build run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.). Callbacks may arrive
/// from the design phase's concurrent tasks, so implementations must be
/// `Send + Sync`.
pub trait BuildProgressNotifier: Send + Sync {
    /// Called when the overall run changes state
    fn on_run_state(&self, _state: RunState) {}

    /// Called when a phase starts
    fn on_phase_start(&self, _phase: Phase) {}

    /// Called when a phase completes, successfully or not
    fn on_phase_complete(&self, _phase: Phase, _success: bool) {}

    /// Called after every accepted agent transition
    fn on_agent_update(&self, _agent: &Agent) {}

    /// Called after every message appended to the log
    fn on_message(&self, _message: &Message) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl BuildProgressNotifier for NoProgress {}

/// A discrete build event, as delivered by [`ChannelProgress`]
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    RunState(RunState),
    PhaseStarted(Phase),
    PhaseCompleted { phase: Phase, success: bool },
    AgentUpdated(Agent),
    MessageAppended(Message),
}

/// Forwards every callback as a [`BuildEvent`] into an unbounded channel.
///
/// Lets a subscriber consume the run as a stream, decoupled from the
/// orchestrating task. Events are dropped once the receiver is gone.
pub struct ChannelProgress {
    sender: mpsc::UnboundedSender<BuildEvent>,
}

impl ChannelProgress {
    pub fn new(sender: mpsc::UnboundedSender<BuildEvent>) -> Self {
        Self { sender }
    }

    /// Create a notifier together with the receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<BuildEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn emit(&self, event: BuildEvent) {
        // Receiver dropped means nobody is listening anymore
        let _ = self.sender.send(event);
    }
}

impl BuildProgressNotifier for ChannelProgress {
    fn on_run_state(&self, state: RunState) {
        self.emit(BuildEvent::RunState(state));
    }

    fn on_phase_start(&self, phase: Phase) {
        self.emit(BuildEvent::PhaseStarted(phase));
    }

    fn on_phase_complete(&self, phase: Phase, success: bool) {
        self.emit(BuildEvent::PhaseCompleted { phase, success });
    }

    fn on_agent_update(&self, agent: &Agent) {
        self.emit(BuildEvent::AgentUpdated(agent.clone()));
    }

    fn on_message(&self, message: &Message) {
        self.emit(BuildEvent::MessageAppended(message.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildcrew_domain::AgentRole;

    #[test]
    fn test_channel_progress_forwards_events() {
        let (progress, mut rx) = ChannelProgress::channel();
        progress.on_run_state(RunState::Running);
        progress.on_phase_start(Phase::Architecture);
        progress.on_agent_update(&Agent::new(AgentRole::Architect));

        assert_eq!(rx.try_recv().unwrap(), BuildEvent::RunState(RunState::Running));
        assert_eq!(
            rx.try_recv().unwrap(),
            BuildEvent::PhaseStarted(Phase::Architecture)
        );
        assert!(matches!(rx.try_recv().unwrap(), BuildEvent::AgentUpdated(a) if a.role == AgentRole::Architect));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_progress_survives_dropped_receiver() {
        let (progress, rx) = ChannelProgress::channel();
        drop(rx);
        progress.on_phase_complete(Phase::Implementation, true);
    }
}
