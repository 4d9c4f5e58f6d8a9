//! Console output formatter for build results

use buildcrew_domain::{
    Agent, AgentStatus, Message, MessageType, OutputFormat, ProjectState,
};
use colored::Colorize;

/// Formats build results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a finished project in the requested format
    pub fn format(project: &ProjectState, format: OutputFormat) -> String {
        match format {
            OutputFormat::Summary => Self::format_summary(project),
            OutputFormat::Files => Self::format_files(project),
            OutputFormat::Json => Self::format_json(project),
        }
    }

    /// Phase results and a listing of generated files
    pub fn format_summary(project: &ProjectState) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Build Results"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Requirement:".cyan().bold(),
            project.requirement
        ));

        if let Some(architecture) = &project.architecture {
            output.push_str(&Self::section_header("Architecture"));
            output.push_str(&format!("{}\n", architecture.overview));
            output.push_str(&format!(
                "{} {}\n",
                "Tech stack:".bold(),
                architecture.tech_stack.join(", ")
            ));
            output.push_str(&format!(
                "{} {}\n",
                "Modules:".bold(),
                architecture.modules.join(", ")
            ));
            if let Some(data_flow) = &architecture.data_flow {
                output.push_str(&format!("{} {}\n", "Data flow:".bold(), data_flow));
            }
        }

        if let Some(frontend) = &project.frontend_design {
            output.push_str(&Self::section_header("Frontend Design"));
            for component in &frontend.components {
                output.push_str(&format!("  * {}", component.name.yellow()));
                if !component.description.is_empty() {
                    output.push_str(&format!(": {}", component.description));
                }
                output.push('\n');
            }
            if !frontend.pages.is_empty() {
                output.push_str(&format!("{} {}\n", "Pages:".bold(), frontend.pages.join(", ")));
            }
        }

        if let Some(backend) = &project.backend_design {
            output.push_str(&Self::section_header("Backend Design"));
            for model in &backend.models {
                output.push_str(&format!(
                    "  * {} ({})\n",
                    model.name.yellow(),
                    model.fields.join(", ")
                ));
            }
            for endpoint in &backend.endpoints {
                output.push_str(&format!(
                    "    {:<6} {}\n",
                    endpoint.method.green(),
                    endpoint.path
                ));
            }
        }

        if let Some(database) = &project.database_design {
            output.push_str(&Self::section_header("Data Model"));
            for table in &database.tables {
                output.push_str(&format!(
                    "  * {} ({})\n",
                    table.name.yellow(),
                    table.columns.join(", ")
                ));
            }
            for relationship in &database.relationships {
                output.push_str(&format!("    {}\n", relationship.dimmed()));
            }
        }

        if let Some(deployment) = &project.deployment_config {
            output.push_str(&Self::section_header("Deployment"));
            output.push_str(&format!("{} {}\n", "Platform:".bold(), deployment.platform));
        }

        output.push_str(&Self::section_header(&format!(
            "Generated Files ({})",
            project.generated_files.len()
        )));
        for file in &project.generated_files {
            output.push_str(&format!(
                "  {} {}\n",
                file.path,
                format!("[{}]", file.language).dimmed()
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Every generated file with its full content
    pub fn format_files(project: &ProjectState) -> String {
        let mut output = String::new();
        for file in &project.generated_files {
            output.push_str(&format!(
                "{}\n{}\n\n",
                format!("── {} ({}) ──", file.path, file.language).yellow().bold(),
                file.content.trim_end()
            ));
        }
        output
    }

    /// Format as JSON
    pub fn format_json(project: &ProjectState) -> String {
        serde_json::to_string_pretty(project).unwrap_or_else(|_| "{}".to_string())
    }

    /// Report for a failed run: the error, every agent's final status and
    /// the error messages that were logged
    pub fn format_failure(error: &str, agents: &[Agent], messages: &[Message]) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} {}\n", "Build failed:".red().bold(), error));

        output.push_str(&Self::section_header("Agent Status"));
        for agent in agents {
            let status = match agent.status {
                AgentStatus::Idle => agent.status.as_str().dimmed(),
                AgentStatus::Working => agent.status.as_str().yellow(),
                AgentStatus::Completed => agent.status.as_str().green(),
                AgentStatus::Error => agent.status.as_str().red().bold(),
            };
            output.push_str(&format!(
                "  {:<18} {:<10} {:>3}%\n",
                agent.name, status, agent.progress
            ));
        }

        let errors: Vec<_> = messages
            .iter()
            .filter(|m| m.kind == MessageType::Error)
            .collect();
        if !errors.is_empty() {
            output.push_str(&Self::section_header("Errors"));
            for message in errors {
                output.push_str(&format!(
                    "  [{}] {}\n",
                    message.from.name().red(),
                    message.content
                ));
            }
        }

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildcrew_domain::{
        AgentRole, ArchitecturePlan, DeploymentConfig, GeneratedFile, MessageBus, MessageDraft,
        MessageSender, Requirement,
    };

    fn project() -> ProjectState {
        let mut project = ProjectState::new(Requirement::try_new("A todo app").unwrap());
        project.architecture = Some(ArchitecturePlan {
            overview: "SPA with REST API".to_string(),
            tech_stack: vec!["React".to_string(), "Axum".to_string()],
            modules: vec!["web".to_string(), "api".to_string()],
            data_flow: None,
        });
        project.generated_files = vec![
            GeneratedFile::new("src/TodoList.tsx", "export const TodoList = () => null;\n", "typescript"),
            GeneratedFile::new("Dockerfile", "FROM node:20", "dockerfile"),
        ];
        project.deployment_config = Some(DeploymentConfig {
            platform: "docker".to_string(),
            files: vec![],
            environment: vec![],
        });
        project
    }

    #[test]
    fn test_summary_lists_results_and_files() {
        let output = ConsoleFormatter::format(&project(), OutputFormat::Summary);
        assert!(output.contains("A todo app"));
        assert!(output.contains("SPA with REST API"));
        assert!(output.contains("React, Axum"));
        assert!(output.contains("Generated Files (2)"));
        assert!(output.contains("src/TodoList.tsx"));
        assert!(output.contains("docker"));
    }

    #[test]
    fn test_files_include_content() {
        let output = ConsoleFormatter::format(&project(), OutputFormat::Files);
        assert!(output.contains("export const TodoList"));
        assert!(output.contains("FROM node:20"));
    }

    #[test]
    fn test_json_round_trips() {
        let output = ConsoleFormatter::format(&project(), OutputFormat::Json);
        let parsed: ProjectState = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, project());
    }

    #[test]
    fn test_failure_report() {
        let mut architect = Agent::new(AgentRole::Architect);
        architect.status = AgentStatus::Error;
        architect.progress = 20;
        let agents = vec![architect, Agent::new(AgentRole::Frontend)];

        let mut bus = MessageBus::new();
        bus.append(MessageDraft::task(MessageSender::System, "Build started"));
        bus.append(MessageDraft::error(AgentRole::Architect, "Connection error: refused"));

        let output = ConsoleFormatter::format_failure("Phase 'architecture' failed", &agents, bus.all());
        assert!(output.contains("Phase 'architecture' failed"));
        assert!(output.contains("Architect"));
        assert!(output.contains("20%"));
        assert!(output.contains("Connection error: refused"));
        assert!(!output.contains("Build started"));
    }
}
