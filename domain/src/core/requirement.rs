//! Requirement value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A natural-language build requirement (Value Object)
///
/// The single input of a build run. Always non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Requirement {
    content: String,
}

impl Requirement {
    /// Create a requirement, rejecting empty or whitespace-only input
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidRequirement(
                "requirement cannot be empty".to_string(),
            ));
        }
        Ok(Self { content })
    }

    /// Get the requirement text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Requirement {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Requirement::try_new(s)
    }
}

impl TryFrom<&str> for Requirement {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Requirement::try_new(s)
    }
}

impl From<Requirement> for String {
    fn from(r: Requirement) -> Self {
        r.content
    }
}
