//! Fixed agent roles of the build crew.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the six fixed agent roles.
///
/// The set is static for the lifetime of the process; every orchestrator
/// owns exactly one [`Agent`](super::entities::Agent) per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Architect,
    Frontend,
    Backend,
    Database,
    CodeGenerator,
    Devops,
}

impl AgentRole {
    /// All roles in pipeline order.
    pub const ALL: [AgentRole; 6] = [
        AgentRole::Architect,
        AgentRole::Frontend,
        AgentRole::Backend,
        AgentRole::Database,
        AgentRole::CodeGenerator,
        AgentRole::Devops,
    ];

    /// Stable identifier used in logs and config keys
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Architect => "architect",
            AgentRole::Frontend => "frontend",
            AgentRole::Backend => "backend",
            AgentRole::Database => "database",
            AgentRole::CodeGenerator => "code_generator",
            AgentRole::Devops => "devops",
        }
    }

    /// Display name used as the message sender
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentRole::Architect => "Architect",
            AgentRole::Frontend => "Frontend Designer",
            AgentRole::Backend => "Backend Designer",
            AgentRole::Database => "Data Modeler",
            AgentRole::CodeGenerator => "Code Generator",
            AgentRole::Devops => "DevOps Engineer",
        }
    }

    pub fn specialty(&self) -> &'static str {
        match self {
            AgentRole::Architect => "System architecture and technology selection",
            AgentRole::Frontend => "UI components, pages and styling",
            AgentRole::Backend => "API endpoints and domain models",
            AgentRole::Database => "Schema design, relationships and indexes",
            AgentRole::CodeGenerator => "Source file implementation",
            AgentRole::Devops => "Build, container and deployment configuration",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "architect" => Ok(AgentRole::Architect),
            "frontend" => Ok(AgentRole::Frontend),
            "backend" => Ok(AgentRole::Backend),
            "database" => Ok(AgentRole::Database),
            "code_generator" | "code-generator" => Ok(AgentRole::CodeGenerator),
            "devops" => Ok(AgentRole::Devops),
            other => Err(format!("unknown agent role: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in AgentRole::ALL {
            assert_eq!(role.as_str().parse::<AgentRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_hyphenated_alias() {
        assert_eq!(
            "code-generator".parse::<AgentRole>().unwrap(),
            AgentRole::CodeGenerator
        );
        assert!("tester".parse::<AgentRole>().is_err());
    }
}
