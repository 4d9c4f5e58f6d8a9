//! Append-only message log

use super::entities::{Message, MessageDraft};
use chrono::Utc;

/// Ordered, append-only log of inter-agent messages.
///
/// Used for audit and observability only; nothing in the pipeline reads
/// the log to decide what to do next.
#[derive(Debug, Clone, Default)]
pub struct MessageBus {
    messages: Vec<Message>,
    next_id: u64,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the log and restart sequence ids
    pub fn reset(&mut self) {
        self.messages.clear();
        self.next_id = 0;
    }

    /// Stamp the draft with the next sequence id and the current time, then append it.
    pub fn append(&mut self, draft: MessageDraft) -> Message {
        self.next_id += 1;
        let message = Message {
            id: self.next_id,
            from: draft.from,
            to: draft.to,
            content: draft.content,
            kind: draft.kind,
            timestamp: Utc::now(),
        };
        self.messages.push(message.clone());
        message
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
