//! Response shapes for structured generation.
//!
//! A [`ResponseShape`] is what the pipeline hands to the generation backend
//! alongside a prompt: a name, the top-level fields that must be present and
//! a human-readable skeleton. Validation here is structural only: presence
//! of the required fields, then typed deserialization.

use super::entities::{
    ArchitecturePlan, BackendDesign, DatabaseDesign, DeploymentConfig, FrontendDesign,
    GeneratedFile,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Why a generated payload was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeViolation {
    #[error("expected a JSON object for '{shape}'")]
    NotAnObject { shape: &'static str },

    #[error("'{shape}' is missing required field '{field}'")]
    MissingField {
        shape: &'static str,
        field: &'static str,
    },

    #[error("'{shape}' could not be parsed: {reason}")]
    Invalid { shape: &'static str, reason: String },
}

/// Expected structure of a generated payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseShape {
    pub name: &'static str,
    pub required_fields: &'static [&'static str],
    pub description: &'static str,
}

impl ResponseShape {
    pub const ARCHITECTURE: ResponseShape = ResponseShape {
        name: "architecture",
        required_fields: &["overview", "tech_stack", "modules"],
        description: r#"{"overview": string, "tech_stack": [string], "modules": [string], "data_flow": string?}"#,
    };

    pub const FRONTEND_DESIGN: ResponseShape = ResponseShape {
        name: "frontend_design",
        required_fields: &["components"],
        description: r#"{"components": [{"name": string, "description": string, "props": [string]}], "pages": [string]?, "styling": string?}"#,
    };

    pub const BACKEND_DESIGN: ResponseShape = ResponseShape {
        name: "backend_design",
        required_fields: &["models", "endpoints"],
        description: r#"{"models": [{"name": string, "fields": [string]}], "endpoints": [{"method": string, "path": string, "description": string}]}"#,
    };

    pub const DATABASE_DESIGN: ResponseShape = ResponseShape {
        name: "database_design",
        required_fields: &["tables"],
        description: r#"{"tables": [{"name": string, "columns": [string]}], "relationships": [string]?, "indexes": [string]?}"#,
    };

    pub const GENERATED_FILE: ResponseShape = ResponseShape {
        name: "generated_file",
        required_fields: &["path", "content", "language"],
        description: r#"{"path": string, "content": string, "language": string}"#,
    };

    pub const DEPLOYMENT_CONFIG: ResponseShape = ResponseShape {
        name: "deployment_config",
        required_fields: &["platform", "files"],
        description: r#"{"platform": string, "files": [{"path": string, "content": string, "language": string}], "environment": [string]?}"#,
    };

    /// Check that `value` is an object carrying every required field
    pub fn validate(&self, value: &Value) -> Result<(), ShapeViolation> {
        let object = value
            .as_object()
            .ok_or(ShapeViolation::NotAnObject { shape: self.name })?;

        for &field in self.required_fields {
            match object.get(field) {
                Some(Value::Null) | None => {
                    return Err(ShapeViolation::MissingField {
                        shape: self.name,
                        field,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Validate, then deserialize into the typed result
    pub fn parse<T: DeserializeOwned>(&self, value: Value) -> Result<T, ShapeViolation> {
        self.validate(&value)?;
        serde_json::from_value(value).map_err(|e| ShapeViolation::Invalid {
            shape: self.name,
            reason: e.to_string(),
        })
    }
}

/// A phase result that can be requested from the generation backend.
pub trait StructuredOutput: DeserializeOwned + Send + 'static {
    fn shape() -> ResponseShape;

    /// One-line summary used in response messages, e.g. item counts
    fn summary(&self) -> String;
}

impl StructuredOutput for ArchitecturePlan {
    fn shape() -> ResponseShape {
        ResponseShape::ARCHITECTURE
    }

    fn summary(&self) -> String {
        format!(
            "Architecture ready: {} modules on a {}-part tech stack",
            self.modules.len(),
            self.tech_stack.len()
        )
    }
}

impl StructuredOutput for FrontendDesign {
    fn shape() -> ResponseShape {
        ResponseShape::FRONTEND_DESIGN
    }

    fn summary(&self) -> String {
        format!(
            "Designed {} components across {} pages",
            self.components.len(),
            self.pages.len()
        )
    }
}

impl StructuredOutput for BackendDesign {
    fn shape() -> ResponseShape {
        ResponseShape::BACKEND_DESIGN
    }

    fn summary(&self) -> String {
        format!(
            "Designed {} models and {} endpoints",
            self.models.len(),
            self.endpoints.len()
        )
    }
}

impl StructuredOutput for DatabaseDesign {
    fn shape() -> ResponseShape {
        ResponseShape::DATABASE_DESIGN
    }

    fn summary(&self) -> String {
        format!(
            "Modeled {} tables with {} relationships",
            self.tables.len(),
            self.relationships.len()
        )
    }
}

impl StructuredOutput for GeneratedFile {
    fn shape() -> ResponseShape {
        ResponseShape::GENERATED_FILE
    }

    fn summary(&self) -> String {
        format!("Generated {} ({} bytes)", self.path, self.content.len())
    }
}

impl StructuredOutput for DeploymentConfig {
    fn shape() -> ResponseShape {
        ResponseShape::DEPLOYMENT_CONFIG
    }

    fn summary(&self) -> String {
        format!(
            "Prepared {} deployment files for {}",
            self.files.len(),
            self.platform
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_accepts_required_fields() {
        let value = json!({"tables": [], "extra": 1});
        assert!(ResponseShape::DATABASE_DESIGN.validate(&value).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_object() {
        let err = ResponseShape::ARCHITECTURE
            .validate(&json!(["overview"]))
            .unwrap_err();
        assert_eq!(err, ShapeViolation::NotAnObject { shape: "architecture" });
    }

    #[test]
    fn test_validate_rejects_missing_and_null_fields() {
        let err = ResponseShape::BACKEND_DESIGN
            .validate(&json!({"models": []}))
            .unwrap_err();
        assert_eq!(
            err,
            ShapeViolation::MissingField {
                shape: "backend_design",
                field: "endpoints"
            }
        );

        let err = ResponseShape::BACKEND_DESIGN
            .validate(&json!({"models": null, "endpoints": []}))
            .unwrap_err();
        assert!(matches!(err, ShapeViolation::MissingField { field: "models", .. }));
    }

    #[test]
    fn test_parse_typed_result() {
        let design: FrontendDesign = ResponseShape::FRONTEND_DESIGN
            .parse(json!({
                "components": [{"name": "TodoList"}, {"name": "TodoItem", "props": ["todo"]}]
            }))
            .unwrap();
        assert_eq!(design.components.len(), 2);
        assert_eq!(design.components[1].props, vec!["todo".to_string()]);
        assert!(design.pages.is_empty());
        assert_eq!(design.summary(), "Designed 2 components across 0 pages");
    }

    #[test]
    fn test_parse_reports_type_mismatch() {
        let result: Result<BackendDesign, _> = ResponseShape::BACKEND_DESIGN
            .parse(json!({"models": "User, Todo", "endpoints": []}));
        assert!(matches!(result, Err(ShapeViolation::Invalid { .. })));
    }
}
