//! Inter-agent message entities

use crate::agent::role::AgentRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of message on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Work handed to an agent
    Task,
    /// Result reported by an agent
    Response,
    /// Output passed between agents
    Collaboration,
    /// Failure report
    Error,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Task => "task",
            MessageType::Response => "response",
            MessageType::Collaboration => "collaboration",
            MessageType::Error => "error",
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    System,
    Agent(AgentRole),
}

impl MessageSender {
    pub fn name(&self) -> &'static str {
        match self {
            MessageSender::System => "system",
            MessageSender::Agent(role) => role.display_name(),
        }
    }

    pub fn role(&self) -> Option<AgentRole> {
        match self {
            MessageSender::System => None,
            MessageSender::Agent(role) => Some(*role),
        }
    }
}

impl From<AgentRole> for MessageSender {
    fn from(role: AgentRole) -> Self {
        MessageSender::Agent(role)
    }
}

impl std::fmt::Display for MessageSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A message before it is appended to the bus.
///
/// The bus assigns the sequence id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub from: MessageSender,
    pub to: Option<AgentRole>,
    pub content: String,
    pub kind: MessageType,
}

impl MessageDraft {
    pub fn new(from: impl Into<MessageSender>, kind: MessageType, content: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: None,
            content: content.into(),
            kind,
        }
    }

    pub fn task(from: impl Into<MessageSender>, content: impl Into<String>) -> Self {
        Self::new(from, MessageType::Task, content)
    }

    pub fn response(from: impl Into<MessageSender>, content: impl Into<String>) -> Self {
        Self::new(from, MessageType::Response, content)
    }

    pub fn collaboration(from: impl Into<MessageSender>, content: impl Into<String>) -> Self {
        Self::new(from, MessageType::Collaboration, content)
    }

    pub fn error(from: impl Into<MessageSender>, content: impl Into<String>) -> Self {
        Self::new(from, MessageType::Error, content)
    }

    pub fn to(mut self, role: AgentRole) -> Self {
        self.to = Some(role);
        self
    }
}

/// An appended, immutable message (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Monotonically increasing within one run, starting at 1
    pub id: u64,
    pub from: MessageSender,
    pub to: Option<AgentRole>,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub timestamp: DateTime<Utc>,
}
