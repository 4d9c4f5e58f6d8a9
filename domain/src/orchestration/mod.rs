//! Build orchestration domain
//!
//! The fixed [`Phase`](entities::Phase) sequence and the overall
//! [`RunState`](entities::RunState) of a build.

pub mod entities;

pub use entities::{Phase, RunState};
