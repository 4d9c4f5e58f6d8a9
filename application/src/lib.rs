//! Application layer for buildcrew
//!
//! This crate contains the orchestrator, the agent runner, port definitions
//! and pipeline configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{PhaseProgress, PipelineConfig};
pub use ports::{
    generation::{GenerationError, GenerationService},
    message_log::{MessageLogSink, NoMessageLog},
    progress::{BuildEvent, BuildProgressNotifier, ChannelProgress, NoProgress},
};
pub use use_cases::agent_runner::{AgentError, AgentRequest, AgentRunner};
pub use use_cases::run_build::{Orchestrator, RunBuildError};
pub use use_cases::run_context::{RunContext, RunScope};
