//! Prompt domain
//!
//! Templates for generating the role-specific prompt of each build phase.

mod template;

pub use template::BuildPromptTemplate;
