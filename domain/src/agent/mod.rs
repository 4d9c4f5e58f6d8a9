//! Agent domain module
//!
//! Fixed crew roles, the agent lifecycle state machine and the
//! [`StatusTracker`](tracker::StatusTracker) that owns every agent.

pub mod entities;
pub mod role;
pub mod tracker;

pub use entities::{Agent, AgentStatus};
pub use role::AgentRole;
pub use tracker::StatusTracker;
