//! Explicit run context shared by the orchestrator and its agent calls.
//!
//! Holds the [`StatusTracker`], the [`MessageBus`] and the overall
//! [`RunState`]. Every accepted change is forwarded to the progress
//! notifier and message sink after the lock is released.
//!
//! Each run gets a new epoch. A [`RunScope`] carries the epoch it was
//! created for; writes through a scope from an earlier run (a detached
//! design task that outlived its run) are dropped.

use crate::ports::message_log::{MessageLogSink, NoMessageLog};
use crate::ports::progress::{BuildProgressNotifier, NoProgress};
use buildcrew_domain::{
    Agent, AgentRole, AgentStatus, DomainError, Message, MessageBus, MessageDraft, RunState,
    StatusTracker,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

struct RunInner {
    epoch: u64,
    state: RunState,
    tracker: StatusTracker,
    bus: MessageBus,
}

/// Observable state of the current (or last) build run
pub struct RunContext {
    inner: Mutex<RunInner>,
    notifier: Arc<dyn BuildProgressNotifier>,
    message_log: Arc<dyn MessageLogSink>,
}

impl RunContext {
    pub fn new(
        notifier: Arc<dyn BuildProgressNotifier>,
        message_log: Arc<dyn MessageLogSink>,
    ) -> Self {
        Self {
            inner: Mutex::new(RunInner {
                epoch: 0,
                state: RunState::Idle,
                tracker: StatusTracker::new(),
                bus: MessageBus::new(),
            }),
            notifier,
            message_log,
        }
    }

    pub fn notifier(&self) -> Arc<dyn BuildProgressNotifier> {
        Arc::clone(&self.notifier)
    }

    pub fn message_log(&self) -> Arc<dyn MessageLogSink> {
        Arc::clone(&self.message_log)
    }

    /// Start a new run: reset tracker and bus and enter `Running`.
    ///
    /// Returns `None` without touching anything if a run is in progress.
    pub fn begin(self: &Arc<Self>) -> Option<RunScope> {
        let (epoch, agents) = {
            let mut inner = self.lock();
            if inner.state.is_running() {
                return None;
            }
            inner.epoch += 1;
            inner.state = RunState::Running;
            inner.tracker.reset();
            inner.bus.reset();
            (inner.epoch, inner.tracker.snapshot())
        };

        self.message_log.on_reset();
        self.notifier.on_run_state(RunState::Running);
        for agent in &agents {
            self.notifier.on_agent_update(agent);
        }

        Some(RunScope {
            context: Arc::clone(self),
            epoch,
        })
    }

    pub fn state(&self) -> RunState {
        self.lock().state
    }

    pub fn snapshot(&self) -> Vec<Agent> {
        self.lock().tracker.snapshot()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.lock().bus.all().to_vec()
    }

    fn lock(&self) -> MutexGuard<'_, RunInner> {
        // Every critical section leaves the state consistent, so a
        // poisoned lock is still safe to read
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new(Arc::new(NoProgress), Arc::new(NoMessageLog))
    }
}

/// Handle to one run of a [`RunContext`].
///
/// Cheap to clone; handed to every agent call of the run, including the
/// concurrently spawned design tasks.
#[derive(Clone)]
pub struct RunScope {
    context: Arc<RunContext>,
    epoch: u64,
}

impl RunScope {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Apply an agent transition.
    ///
    /// Returns `Ok(None)` when the scope is stale and the write was dropped.
    pub fn transition(
        &self,
        role: AgentRole,
        status: AgentStatus,
        progress: u8,
    ) -> Result<Option<Agent>, DomainError> {
        let agent = {
            let mut inner = self.context.lock();
            if inner.epoch != self.epoch {
                debug!("Dropping stale transition for {} from run {}", role, self.epoch);
                return Ok(None);
            }
            inner.tracker.transition(role, status, progress)?
        };
        self.context.notifier.on_agent_update(&agent);
        Ok(Some(agent))
    }

    /// Append a message. Returns `None` when the scope is stale.
    pub fn append(&self, draft: MessageDraft) -> Option<Message> {
        let message = {
            let mut inner = self.context.lock();
            if inner.epoch != self.epoch {
                debug!("Dropping stale message from run {}", self.epoch);
                return None;
            }
            inner.bus.append(draft)
        };
        self.context.message_log.record(&message);
        self.context.notifier.on_message(&message);
        Some(message)
    }

    /// Move every agent still `Working` to `Error` at its current progress.
    ///
    /// Returns the agents that were failed; empty when the scope is stale.
    pub fn fail_working(&self) -> Vec<Agent> {
        let failed = {
            let mut inner = self.context.lock();
            if inner.epoch != self.epoch {
                return Vec::new();
            }
            let working: Vec<(AgentRole, u8)> = inner
                .tracker
                .working()
                .map(|a| (a.role, a.progress))
                .collect();
            let mut failed = Vec::with_capacity(working.len());
            for (role, progress) in working {
                match inner.tracker.transition(role, AgentStatus::Error, progress) {
                    Ok(agent) => failed.push(agent),
                    Err(e) => debug!("Could not fail {}: {}", role, e),
                }
            }
            failed
        };
        for agent in &failed {
            self.context.notifier.on_agent_update(agent);
        }
        failed
    }

    /// Current status of one agent
    pub fn agent(&self, role: AgentRole) -> Agent {
        self.context.lock().tracker.get(role).clone()
    }

    pub fn notifier(&self) -> &dyn BuildProgressNotifier {
        self.context.notifier.as_ref()
    }

    /// Leave `Running` for a terminal state
    pub(crate) fn finish(&self, state: RunState) {
        {
            let mut inner = self.context.lock();
            if inner.epoch != self.epoch || !inner.state.is_running() {
                return;
            }
            inner.state = state;
        }
        self.context.notifier.on_run_state(state);
    }
}
