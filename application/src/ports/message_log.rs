//! Port for persisting the message log.
//!
//! The in-memory [`MessageBus`](buildcrew_domain::MessageBus) is cleared at
//! the start of every run. A [`MessageLogSink`] receives each message as it
//! is appended, so an adapter can keep a durable transcript (e.g. JSONL).
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the agents'
//! message transcript in a machine-readable format.

use buildcrew_domain::Message;

/// Port for recording appended messages.
///
/// The `record` method is synchronous and non-fallible so that a logging
/// failure never disrupts a build; adapters swallow their own errors.
pub trait MessageLogSink: Send + Sync {
    /// Record one message
    fn record(&self, message: &Message);

    /// Called when a new run begins and the in-memory log is cleared
    fn on_reset(&self) {}
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoMessageLog;

impl MessageLogSink for NoMessageLog {
    fn record(&self, _message: &Message) {}
}
