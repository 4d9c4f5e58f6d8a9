//! Logging infrastructure: durable message transcripts.
//!
//! Provides [`JsonlMessageLog`], a JSONL file writer that implements
//! the [`MessageLogSink`](buildcrew_application::MessageLogSink) port.

mod jsonl_message_log;

pub use jsonl_message_log::JsonlMessageLog;
