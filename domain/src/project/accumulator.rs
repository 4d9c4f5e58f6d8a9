//! Single-writer aggregate that phase results are merged into.

use super::entities::{
    ArchitecturePlan, BackendDesign, DatabaseDesign, DeploymentConfig, FrontendDesign,
    GeneratedFile, ProjectState,
};
use crate::agent::role::AgentRole;
use crate::core::error::DomainError;
use crate::core::requirement::Requirement;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A field of [`ProjectState`] with exactly one producing phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectField {
    Architecture,
    FrontendDesign,
    BackendDesign,
    DatabaseDesign,
    GeneratedFiles,
    DeploymentConfig,
}

impl ProjectField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectField::Architecture => "architecture",
            ProjectField::FrontendDesign => "frontend_design",
            ProjectField::BackendDesign => "backend_design",
            ProjectField::DatabaseDesign => "database_design",
            ProjectField::GeneratedFiles => "generated_files",
            ProjectField::DeploymentConfig => "deployment_config",
        }
    }

    /// The agent whose phase writes this field
    pub fn producer(&self) -> AgentRole {
        match self {
            ProjectField::Architecture => AgentRole::Architect,
            ProjectField::FrontendDesign => AgentRole::Frontend,
            ProjectField::BackendDesign => AgentRole::Backend,
            ProjectField::DatabaseDesign => AgentRole::Database,
            ProjectField::GeneratedFiles => AgentRole::CodeGenerator,
            ProjectField::DeploymentConfig => AgentRole::Devops,
        }
    }
}

impl std::fmt::Display for ProjectField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value for one write-once field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Architecture(ArchitecturePlan),
    FrontendDesign(FrontendDesign),
    BackendDesign(BackendDesign),
    DatabaseDesign(DatabaseDesign),
    DeploymentConfig(DeploymentConfig),
}

impl FieldValue {
    pub fn field(&self) -> ProjectField {
        match self {
            FieldValue::Architecture(_) => ProjectField::Architecture,
            FieldValue::FrontendDesign(_) => ProjectField::FrontendDesign,
            FieldValue::BackendDesign(_) => ProjectField::BackendDesign,
            FieldValue::DatabaseDesign(_) => ProjectField::DatabaseDesign,
            FieldValue::DeploymentConfig(_) => ProjectField::DeploymentConfig,
        }
    }
}

/// Accumulates phase results into a [`ProjectState`].
///
/// Every write-once field is committed exactly once per run. Reads go
/// through typed accessors that fail until the producing phase committed.
/// Not synchronized: the orchestrator is the only writer.
#[derive(Debug, Clone)]
pub struct ProjectStateAccumulator {
    state: ProjectState,
    committed: HashSet<ProjectField>,
}

impl ProjectStateAccumulator {
    pub fn new(requirement: Requirement) -> Self {
        Self {
            state: ProjectState::new(requirement),
            committed: HashSet::new(),
        }
    }

    pub fn requirement(&self) -> &Requirement {
        &self.state.requirement
    }

    /// Write one field.
    ///
    /// Setting the deployment config also appends its files to the
    /// generated file list, after the implementation files.
    pub fn set(&mut self, value: FieldValue) -> Result<(), DomainError> {
        let field = value.field();
        if self.committed.contains(&field) {
            return Err(DomainError::DuplicateWrite(field));
        }

        match value {
            FieldValue::Architecture(v) => self.state.architecture = Some(v),
            FieldValue::FrontendDesign(v) => self.state.frontend_design = Some(v),
            FieldValue::BackendDesign(v) => self.state.backend_design = Some(v),
            FieldValue::DatabaseDesign(v) => self.state.database_design = Some(v),
            FieldValue::DeploymentConfig(v) => {
                self.state.generated_files.extend(v.files.iter().cloned());
                self.state.deployment_config = Some(v);
            }
        }
        self.committed.insert(field);
        Ok(())
    }

    /// Append one implementation file.
    ///
    /// Fails once the generated file list has been sealed by [`Self::seal_files`].
    pub fn append_file(&mut self, file: GeneratedFile) -> Result<(), DomainError> {
        if self.committed.contains(&ProjectField::GeneratedFiles) {
            return Err(DomainError::DuplicateWrite(ProjectField::GeneratedFiles));
        }
        self.state.generated_files.push(file);
        Ok(())
    }

    /// Mark the implementation loop as finished
    pub fn seal_files(&mut self) -> Result<(), DomainError> {
        if !self.committed.insert(ProjectField::GeneratedFiles) {
            return Err(DomainError::DuplicateWrite(ProjectField::GeneratedFiles));
        }
        Ok(())
    }

    pub fn is_committed(&self, field: ProjectField) -> bool {
        self.committed.contains(&field)
    }

    /// Fail with the first field in `fields` that has not been committed
    pub fn ensure_committed(&self, fields: &[ProjectField]) -> Result<(), DomainError> {
        match fields.iter().find(|f| !self.committed.contains(f)) {
            Some(missing) => Err(DomainError::DependencyNotReady(*missing)),
            None => Ok(()),
        }
    }

    pub fn architecture(&self) -> Result<&ArchitecturePlan, DomainError> {
        self.require(ProjectField::Architecture, self.state.architecture.as_ref())
    }

    pub fn frontend_design(&self) -> Result<&FrontendDesign, DomainError> {
        self.require(
            ProjectField::FrontendDesign,
            self.state.frontend_design.as_ref(),
        )
    }

    pub fn backend_design(&self) -> Result<&BackendDesign, DomainError> {
        self.require(ProjectField::BackendDesign, self.state.backend_design.as_ref())
    }

    pub fn database_design(&self) -> Result<&DatabaseDesign, DomainError> {
        self.require(
            ProjectField::DatabaseDesign,
            self.state.database_design.as_ref(),
        )
    }

    pub fn generated_files(&self) -> Result<&[GeneratedFile], DomainError> {
        self.require(ProjectField::GeneratedFiles, Some(&self.state.generated_files))
            .map(Vec::as_slice)
    }

    pub fn deployment_config(&self) -> Result<&DeploymentConfig, DomainError> {
        self.require(
            ProjectField::DeploymentConfig,
            self.state.deployment_config.as_ref(),
        )
    }

    /// Number of files written so far, readable while the loop is running
    pub fn file_count(&self) -> usize {
        self.state.generated_files.len()
    }

    /// Hand out the finished state; every field must have been committed.
    pub fn into_project_state(self) -> Result<ProjectState, DomainError> {
        const ALL: [ProjectField; 6] = [
            ProjectField::Architecture,
            ProjectField::FrontendDesign,
            ProjectField::BackendDesign,
            ProjectField::DatabaseDesign,
            ProjectField::GeneratedFiles,
            ProjectField::DeploymentConfig,
        ];
        self.ensure_committed(&ALL)?;
        Ok(self.state)
    }

    fn require<'a, T>(&self, field: ProjectField, value: Option<&'a T>) -> Result<&'a T, DomainError> {
        match value {
            Some(v) if self.committed.contains(&field) => Ok(v),
            _ => Err(DomainError::DependencyNotReady(field)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulator() -> ProjectStateAccumulator {
        ProjectStateAccumulator::new(Requirement::try_new("Build a todo app").unwrap())
    }

    fn architecture() -> ArchitecturePlan {
        ArchitecturePlan {
            overview: "SPA with REST API".to_string(),
            tech_stack: vec!["React".to_string(), "Axum".to_string()],
            modules: vec!["web".to_string(), "api".to_string()],
            data_flow: None,
        }
    }

    fn deployment() -> DeploymentConfig {
        DeploymentConfig {
            platform: "docker".to_string(),
            files: vec![
                GeneratedFile::new("Dockerfile", "FROM rust", "dockerfile"),
                GeneratedFile::new("compose.yaml", "services: {}", "yaml"),
            ],
            environment: vec![],
        }
    }

    #[test]
    fn test_read_before_write_is_not_ready() {
        let acc = accumulator();
        assert_eq!(
            acc.architecture().unwrap_err(),
            DomainError::DependencyNotReady(ProjectField::Architecture)
        );
        assert!(acc.generated_files().is_err());
    }

    #[test]
    fn test_set_then_get() {
        let mut acc = accumulator();
        acc.set(FieldValue::Architecture(architecture())).unwrap();
        assert_eq!(acc.architecture().unwrap().modules.len(), 2);
        assert!(acc.is_committed(ProjectField::Architecture));
    }

    #[test]
    fn test_duplicate_write_is_rejected() {
        let mut acc = accumulator();
        acc.set(FieldValue::Architecture(architecture())).unwrap();
        let err = acc.set(FieldValue::Architecture(architecture())).unwrap_err();
        assert_eq!(err, DomainError::DuplicateWrite(ProjectField::Architecture));
    }

    #[test]
    fn test_files_are_readable_only_after_seal() {
        let mut acc = accumulator();
        acc.append_file(GeneratedFile::new("src/App.tsx", "", "typescript"))
            .unwrap();
        assert_eq!(acc.file_count(), 1);
        assert!(acc.generated_files().is_err());

        acc.seal_files().unwrap();
        assert_eq!(acc.generated_files().unwrap().len(), 1);
        assert!(acc
            .append_file(GeneratedFile::new("late.rs", "", "rust"))
            .is_err());
    }

    #[test]
    fn test_deployment_files_follow_implementation_files() {
        let mut acc = accumulator();
        acc.append_file(GeneratedFile::new("src/main.rs", "", "rust"))
            .unwrap();
        acc.seal_files().unwrap();
        acc.set(FieldValue::DeploymentConfig(deployment())).unwrap();

        let paths: Vec<_> = acc
            .generated_files()
            .unwrap()
            .iter()
            .map(|f| f.path.as_str())
            .collect();
        assert_eq!(paths, vec!["src/main.rs", "Dockerfile", "compose.yaml"]);
    }

    #[test]
    fn test_into_project_state_requires_every_field() {
        let mut acc = accumulator();
        acc.set(FieldValue::Architecture(architecture())).unwrap();
        let err = acc.into_project_state().unwrap_err();
        assert_eq!(err, DomainError::DependencyNotReady(ProjectField::FrontendDesign));
    }

    #[test]
    fn test_ensure_committed_reports_first_missing() {
        let mut acc = accumulator();
        acc.set(FieldValue::Architecture(architecture())).unwrap();
        assert!(acc.ensure_committed(&[ProjectField::Architecture]).is_ok());
        assert_eq!(
            acc.ensure_committed(&[
                ProjectField::Architecture,
                ProjectField::BackendDesign,
                ProjectField::FrontendDesign,
            ]),
            Err(DomainError::DependencyNotReady(ProjectField::BackendDesign))
        );
    }

    #[test]
    fn test_field_producers() {
        assert_eq!(ProjectField::DatabaseDesign.producer(), AgentRole::Database);
        assert_eq!(
            ProjectField::GeneratedFiles.producer(),
            AgentRole::CodeGenerator
        );
    }
}
