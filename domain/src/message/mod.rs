//! Message domain module
//!
//! [`Message`] entities and the append-only [`MessageBus`].

pub mod bus;
pub mod entities;

pub use bus::MessageBus;
pub use entities::{Message, MessageDraft, MessageSender, MessageType};
