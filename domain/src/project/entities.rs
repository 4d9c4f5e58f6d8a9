//! Project entities produced by the build phases.
//!
//! Each phase result is a plain serde type. Only the fields listed as
//! required in its [`ResponseShape`](super::shape::ResponseShape) must be
//! present in a generated payload; the rest default to empty.

use crate::core::requirement::Requirement;
use serde::{Deserialize, Serialize};

/// Output of the architecture phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitecturePlan {
    pub overview: String,
    pub tech_stack: Vec<String>,
    pub modules: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_flow: Option<String>,
}

/// A UI component proposed by the frontend designer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<String>,
}

/// Output of the frontend design phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendDesign {
    pub components: Vec<ComponentSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<String>,
}

/// A domain model proposed by the backend designer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSpec {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub description: String,
}

/// Output of the backend design phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendDesign {
    pub models: Vec<ModelSpec>,
    pub endpoints: Vec<EndpointSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
}

/// Output of the data modeling phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseDesign {
    pub tables: Vec<TableSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<String>,
}

/// A single source or configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
    pub language: String,
}

impl GeneratedFile {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            language: language.into(),
        }
    }
}

/// Output of the deployment configuration phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub platform: String,
    pub files: Vec<GeneratedFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<String>,
}

/// The accumulated output document of one build run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectState {
    pub requirement: Requirement,
    pub architecture: Option<ArchitecturePlan>,
    pub frontend_design: Option<FrontendDesign>,
    pub backend_design: Option<BackendDesign>,
    pub database_design: Option<DatabaseDesign>,
    pub generated_files: Vec<GeneratedFile>,
    pub deployment_config: Option<DeploymentConfig>,
}

impl ProjectState {
    pub fn new(requirement: Requirement) -> Self {
        Self {
            requirement,
            architecture: None,
            frontend_design: None,
            backend_design: None,
            database_design: None,
            generated_files: Vec::new(),
            deployment_config: None,
        }
    }

    /// Find a generated file by path
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.generated_files.iter().find(|f| f.path == path)
    }
}
