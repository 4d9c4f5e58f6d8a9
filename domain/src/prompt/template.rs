//! Prompt templates for each build phase

use crate::agent::role::AgentRole;
use crate::project::entities::{
    ArchitecturePlan, BackendDesign, ComponentSpec, EndpointSpec, ModelSpec,
};

/// Templates for generating the role-specific prompts of a build run
pub struct BuildPromptTemplate;

impl BuildPromptTemplate {
    /// Role preamble placed in front of every prompt for that agent
    pub fn system(role: AgentRole) -> &'static str {
        match role {
            AgentRole::Architect => {
                "You are a senior software architect. Choose a pragmatic technology stack \
                 and split the system into a small number of cohesive modules."
            }
            AgentRole::Frontend => {
                "You are a frontend designer. Describe the UI as reusable components \
                 with clear responsibilities and props."
            }
            AgentRole::Backend => {
                "You are a backend designer. Describe the domain models and the HTTP \
                 endpoints that expose them."
            }
            AgentRole::Database => {
                "You are a database engineer. Derive a normalized relational schema \
                 from the backend models."
            }
            AgentRole::CodeGenerator => {
                "You are an expert programmer. Write complete, idiomatic source files \
                 with no placeholders."
            }
            AgentRole::Devops => {
                "You are a DevOps engineer. Produce the build and deployment files \
                 needed to ship the application."
            }
        }
    }

    pub fn architecture(requirement: &str) -> String {
        format!(
            r#"{}

Requirement:
{}

Describe the architecture: a short overview, the technology stack and the main modules."#,
            Self::system(AgentRole::Architect),
            requirement
        )
    }

    pub fn frontend_design(requirement: &str, architecture: &ArchitecturePlan) -> String {
        format!(
            r#"{}

Requirement:
{}

Architecture:
{}

List the UI components and pages needed for this application."#,
            Self::system(AgentRole::Frontend),
            requirement,
            Self::architecture_summary(architecture)
        )
    }

    pub fn backend_design(requirement: &str, architecture: &ArchitecturePlan) -> String {
        format!(
            r#"{}

Requirement:
{}

Architecture:
{}

List the domain models with their fields, and the REST endpoints."#,
            Self::system(AgentRole::Backend),
            requirement,
            Self::architecture_summary(architecture)
        )
    }

    pub fn data_modeling(requirement: &str, backend: &BackendDesign) -> String {
        let models = backend
            .models
            .iter()
            .map(Self::model_line)
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"{}

Requirement:
{}

Backend models:
{}

Design the database tables, their relationships and useful indexes."#,
            Self::system(AgentRole::Database),
            requirement,
            models
        )
    }

    pub fn component_file(
        requirement: &str,
        tech_stack: &[String],
        component: &ComponentSpec,
    ) -> String {
        let mut prompt = format!(
            r#"{}

Requirement:
{}

Tech stack: {}

Write the source file for the UI component `{}`."#,
            Self::system(AgentRole::CodeGenerator),
            requirement,
            tech_stack.join(", "),
            component.name
        );

        if !component.description.is_empty() {
            prompt.push_str(&format!("\nPurpose: {}", component.description));
        }
        if !component.props.is_empty() {
            prompt.push_str(&format!("\nProps: {}", component.props.join(", ")));
        }
        prompt
    }

    pub fn model_file(
        requirement: &str,
        tech_stack: &[String],
        model: &ModelSpec,
        endpoints: &[EndpointSpec],
    ) -> String {
        let mut prompt = format!(
            r#"{}

Requirement:
{}

Tech stack: {}

Write the source file for the backend model {}."#,
            Self::system(AgentRole::CodeGenerator),
            requirement,
            tech_stack.join(", "),
            Self::model_line(model)
        );

        let related: Vec<_> = endpoints
            .iter()
            .filter(|e| {
                e.path
                    .to_lowercase()
                    .contains(&model.name.to_lowercase())
            })
            .map(|e| format!("- {} {}", e.method, e.path))
            .collect();
        if !related.is_empty() {
            prompt.push_str("\nRelated endpoints:\n");
            prompt.push_str(&related.join("\n"));
        }
        prompt
    }

    pub fn deployment(requirement: &str, architecture: &ArchitecturePlan) -> String {
        format!(
            r#"{}

Requirement:
{}

Architecture:
{}

Choose a deployment platform and write its configuration files."#,
            Self::system(AgentRole::Devops),
            requirement,
            Self::architecture_summary(architecture)
        )
    }

    /// Wrap a prompt with the JSON shape the answer must follow
    pub fn with_shape(prompt: &str, shape_description: &str) -> String {
        format!(
            "{}\n\nRespond with a single JSON object of this shape and nothing else:\n{}",
            prompt, shape_description
        )
    }

    fn architecture_summary(architecture: &ArchitecturePlan) -> String {
        format!(
            "{}\nTech stack: {}\nModules: {}",
            architecture.overview,
            architecture.tech_stack.join(", "),
            architecture.modules.join(", ")
        )
    }

    fn model_line(model: &ModelSpec) -> String {
        if model.fields.is_empty() {
            format!("`{}`", model.name)
        } else {
            format!("`{}` ({})", model.name, model.fields.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> ArchitecturePlan {
        ArchitecturePlan {
            overview: "Single page app backed by a REST API".to_string(),
            tech_stack: vec!["React".to_string(), "Axum".to_string()],
            modules: vec!["web".to_string(), "api".to_string()],
            data_flow: None,
        }
    }

    #[test]
    fn test_architecture_prompt_contains_requirement() {
        let prompt = BuildPromptTemplate::architecture("Build a todo app");
        assert!(prompt.contains("Build a todo app"));
        assert!(prompt.starts_with("You are a senior software architect"));
    }

    #[test]
    fn test_design_prompts_embed_architecture() {
        let frontend = BuildPromptTemplate::frontend_design("Build a todo app", &plan());
        let backend = BuildPromptTemplate::backend_design("Build a todo app", &plan());
        assert!(frontend.contains("React, Axum"));
        assert!(backend.contains("Modules: web, api"));
    }

    #[test]
    fn test_model_file_lists_related_endpoints() {
        let model = ModelSpec {
            name: "Todo".to_string(),
            fields: vec!["id".to_string(), "title".to_string()],
        };
        let endpoints = vec![
            EndpointSpec {
                method: "GET".to_string(),
                path: "/todos".to_string(),
                description: String::new(),
            },
            EndpointSpec {
                method: "GET".to_string(),
                path: "/health".to_string(),
                description: String::new(),
            },
        ];
        let prompt =
            BuildPromptTemplate::model_file("Build a todo app", &plan().tech_stack, &model, &endpoints);
        assert!(prompt.contains("`Todo` (id, title)"));
        assert!(prompt.contains("- GET /todos"));
        assert!(!prompt.contains("/health"));
    }

    #[test]
    fn test_with_shape_appends_description() {
        let prompt = BuildPromptTemplate::with_shape("Do it", r#"{"path": string}"#);
        assert!(prompt.ends_with(r#"{"path": string}"#));
    }
}
