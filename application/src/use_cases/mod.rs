//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod agent_runner;
pub mod run_build;
pub mod run_context;
