//! Domain layer for buildcrew
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Agents
//!
//! Six fixed roles (architect, frontend, backend, database, code generator,
//! devops). Each has a lifecycle `Idle -> Working -> Completed | Error`
//! owned by the [`StatusTracker`].
//!
//! ## Project State
//!
//! The output document of a build, filled field by field through the
//! [`ProjectStateAccumulator`]. Each field has exactly one producing phase.
//!
//! ## Messages
//!
//! An append-only [`MessageBus`] recording what every agent was asked and
//! what it answered.

pub mod agent;
pub mod config;
pub mod core;
pub mod message;
pub mod orchestration;
pub mod project;
pub mod prompt;

// Re-export commonly used types
pub use agent::{Agent, AgentRole, AgentStatus, StatusTracker};
pub use config::OutputFormat;
pub use crate::core::{error::DomainError, requirement::Requirement};
pub use message::{Message, MessageBus, MessageDraft, MessageSender, MessageType};
pub use orchestration::{Phase, RunState};
pub use project::{
    ArchitecturePlan, BackendDesign, ComponentSpec, DatabaseDesign, DeploymentConfig,
    EndpointSpec, FieldValue, FrontendDesign, GeneratedFile, ModelSpec, ProjectField,
    ProjectState, ProjectStateAccumulator, ResponseShape, ShapeViolation, StructuredOutput,
    TableSpec,
};
pub use prompt::BuildPromptTemplate;
