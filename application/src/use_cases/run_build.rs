//! Run Build use case
//!
//! Orchestrates the full build flow, from requirement to project state:
//!
//! ```text
//! Architecture ──┬── Frontend Design ──┬── Data Modeling ── Implementation ── Deployment Config
//!                └── Backend Design ───┘
//! ```
//!
//! The two design phases are the only concurrent step. Everything else runs
//! one agent call at a time, and the first failure ends the run.

use super::agent_runner::{AgentError, AgentRequest, AgentRunner};
use super::run_context::{RunContext, RunScope};
use crate::config::PipelineConfig;
use crate::ports::generation::GenerationService;
use crate::ports::message_log::MessageLogSink;
use crate::ports::progress::BuildProgressNotifier;
use buildcrew_domain::{
    Agent, AgentRole, AgentStatus, ArchitecturePlan, BackendDesign, BuildPromptTemplate,
    DatabaseDesign, DeploymentConfig, DomainError, FieldValue, FrontendDesign, GeneratedFile,
    Message, MessageDraft, MessageSender, Phase, ProjectState, ProjectStateAccumulator,
    Requirement, RunState, StructuredOutput,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{info, warn};

/// Errors that can end a build run
#[derive(Error, Debug)]
pub enum RunBuildError {
    #[error("Invalid requirement: {0}")]
    Validation(String),

    #[error("A build is already running")]
    AlreadyRunning,

    #[error("Phase '{phase}' failed: {source}")]
    AgentExecution {
        phase: Phase,
        #[source]
        source: AgentError,
    },

    #[error("Internal error: {0}")]
    Internal(#[from] DomainError),

    #[error("Phase '{phase}' task aborted: {reason}")]
    TaskAborted { phase: Phase, reason: String },
}

impl RunBuildError {
    /// The phase that failed, if the error came from one
    pub fn phase(&self) -> Option<Phase> {
        match self {
            RunBuildError::AgentExecution { phase, .. }
            | RunBuildError::TaskAborted { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    pub fn agent_error(&self) -> Option<&AgentError> {
        match self {
            RunBuildError::AgentExecution { source, .. } => Some(source),
            _ => None,
        }
    }

    fn at(phase: Phase) -> impl FnOnce(AgentError) -> RunBuildError {
        move |source| RunBuildError::AgentExecution { phase, source }
    }
}

/// Fails the run if `run()` is dropped before it finished.
///
/// Agents caught mid-call are moved to `Error` and a cancellation message
/// closes the log.
struct ActiveRun {
    scope: RunScope,
    finished: bool,
}

impl ActiveRun {
    fn finish(mut self, state: RunState) {
        self.finished = true;
        self.scope.finish(state);
    }
}

impl Drop for ActiveRun {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Build run {} dropped before finishing", self.scope.epoch());
            for agent in self.scope.fail_working() {
                warn!("{} cancelled at {}%", agent.role, agent.progress);
            }
            self.scope.append(MessageDraft::error(
                MessageSender::System,
                "Build cancelled",
            ));
            self.scope.finish(RunState::Failed);
        }
    }
}

/// Drives the fixed agent sequence for one requirement at a time
pub struct Orchestrator<G: GenerationService + 'static> {
    runner: AgentRunner<G>,
    config: PipelineConfig,
    context: Arc<RunContext>,
}

impl<G: GenerationService + 'static> Orchestrator<G> {
    pub fn new(generation: Arc<G>) -> Self {
        Self {
            runner: AgentRunner::new(generation),
            config: PipelineConfig::default(),
            context: Arc::new(RunContext::default()),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Subscribe a progress notifier to every run of this orchestrator
    pub fn with_progress(mut self, notifier: Arc<dyn BuildProgressNotifier>) -> Self {
        self.context = Arc::new(RunContext::new(notifier, self.context.message_log()));
        self
    }

    /// Mirror every appended message into a durable sink
    pub fn with_message_log(mut self, message_log: Arc<dyn MessageLogSink>) -> Self {
        self.context = Arc::new(RunContext::new(self.context.notifier(), message_log));
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Current state of the overall run
    pub fn run_state(&self) -> RunState {
        self.context.state()
    }

    /// Live status of every agent; usable during and after a run
    pub fn status_snapshot(&self) -> Vec<Agent> {
        self.context.snapshot()
    }

    /// Messages of the current (or last) run, in append order
    pub fn message_log(&self) -> Vec<Message> {
        self.context.messages()
    }

    /// Build a project from a requirement.
    ///
    /// Returns the project state only if every phase succeeded. On failure
    /// the status snapshot still shows which agents completed and which one
    /// failed.
    pub async fn run(&self, requirement: &str) -> Result<ProjectState, RunBuildError> {
        let requirement = Requirement::try_new(requirement)
            .map_err(|e| RunBuildError::Validation(e.to_string()))?;

        let scope = self.context.begin().ok_or(RunBuildError::AlreadyRunning)?;
        let active = ActiveRun {
            scope: scope.clone(),
            finished: false,
        };

        info!("Starting build run {}", scope.epoch());
        scope.append(MessageDraft::task(
            MessageSender::System,
            format!("Build started: {}", requirement),
        ));

        match self.run_phases(&scope, requirement).await {
            Ok(project) => {
                active.finish(RunState::Succeeded);
                scope.append(MessageDraft::response(
                    MessageSender::System,
                    format!(
                        "Build completed: {} files generated",
                        project.generated_files.len()
                    ),
                ));
                info!("Build run {} succeeded", scope.epoch());
                Ok(project)
            }
            Err(error) => {
                active.finish(RunState::Failed);
                scope.append(MessageDraft::error(
                    MessageSender::System,
                    format!("Build failed: {}", error),
                ));
                warn!("Build run {} failed: {}", scope.epoch(), error);
                Err(error)
            }
        }
    }

    async fn run_phases(
        &self,
        scope: &RunScope,
        requirement: Requirement,
    ) -> Result<ProjectState, RunBuildError> {
        let mut project = ProjectStateAccumulator::new(requirement);

        let architecture = self.architecture_phase(scope, &project).await?;
        project.set(FieldValue::Architecture(architecture))?;

        let (frontend, backend) = self.design_phase(scope, &project).await?;
        project.set(FieldValue::FrontendDesign(frontend))?;
        project.set(FieldValue::BackendDesign(backend))?;

        let database = self.data_modeling_phase(scope, &project).await?;
        project.set(FieldValue::DatabaseDesign(database))?;

        self.implementation_phase(scope, &mut project).await?;

        let deployment = self.deployment_phase(scope, &project).await?;
        project.set(FieldValue::DeploymentConfig(deployment))?;

        Ok(project.into_project_state()?)
    }

    /// Phase 1: Architecture
    async fn architecture_phase(
        &self,
        scope: &RunScope,
        project: &ProjectStateAccumulator,
    ) -> Result<ArchitecturePlan, RunBuildError> {
        let phase = Phase::Architecture;
        Self::ready(project, phase)?;
        let requirement = project.requirement().content();
        let request = self.request(
            phase,
            "Design the system architecture",
            BuildPromptTemplate::architecture(requirement),
        );
        self.sequential(scope, phase, request).await
    }

    /// Phase 2: Frontend and backend design, concurrently.
    ///
    /// Both tasks are spawned and the join waits for both. The first
    /// failure fails the join; the sibling is left running detached and its
    /// result is discarded.
    async fn design_phase(
        &self,
        scope: &RunScope,
        project: &ProjectStateAccumulator,
    ) -> Result<(FrontendDesign, BackendDesign), RunBuildError> {
        Self::ready(project, Phase::FrontendDesign)?;
        Self::ready(project, Phase::BackendDesign)?;
        let requirement = project.requirement().content();
        let architecture = project.architecture()?;

        let notifier = scope.notifier();
        notifier.on_phase_start(Phase::FrontendDesign);
        notifier.on_phase_start(Phase::BackendDesign);
        info!("Phase 2: Frontend and Backend Design");

        let mut frontend = self.spawn_agent::<FrontendDesign>(
            scope,
            self.request(
                Phase::FrontendDesign,
                "Design the frontend components",
                BuildPromptTemplate::frontend_design(requirement, architecture),
            ),
        );
        let mut backend = self.spawn_agent::<BackendDesign>(
            scope,
            self.request(
                Phase::BackendDesign,
                "Design the backend models and endpoints",
                BuildPromptTemplate::backend_design(requirement, architecture),
            ),
        );

        // Join point
        tokio::select! {
            result = &mut frontend => {
                let frontend = Self::joined(scope, Phase::FrontendDesign, result)?;
                let backend = Self::joined(scope, Phase::BackendDesign, backend.await)?;
                Ok((frontend, backend))
            }
            result = &mut backend => {
                let backend = Self::joined(scope, Phase::BackendDesign, result)?;
                let frontend = Self::joined(scope, Phase::FrontendDesign, frontend.await)?;
                Ok((frontend, backend))
            }
        }
    }

    /// Phase 3: Data modeling from the backend models
    async fn data_modeling_phase(
        &self,
        scope: &RunScope,
        project: &ProjectStateAccumulator,
    ) -> Result<DatabaseDesign, RunBuildError> {
        let phase = Phase::DataModeling;
        Self::ready(project, phase)?;
        let requirement = project.requirement().content();
        let backend = project.backend_design()?;
        let request = self.request(
            phase,
            format!("Model the data for {} backend models", backend.models.len()),
            BuildPromptTemplate::data_modeling(requirement, backend),
        );
        self.sequential(scope, phase, request).await
    }

    /// Phase 4: One file per selected component and model, one at a time.
    ///
    /// The code generator stays `Working` after this phase: the deployment
    /// config counts as its last batch.
    async fn implementation_phase(
        &self,
        scope: &RunScope,
        project: &mut ProjectStateAccumulator,
    ) -> Result<(), RunBuildError> {
        let phase = Phase::Implementation;
        let role = phase.agent();
        Self::ready(project, phase)?;
        let targets = self.implementation_targets(project)?;
        let total_batches = targets.len() + 1;

        info!("Phase 4: Implementation ({} files)", targets.len());
        scope.notifier().on_phase_start(phase);
        scope.transition(role, AgentStatus::Working, 0)?;

        for (index, request) in targets.into_iter().enumerate() {
            let file: GeneratedFile = match self.runner.generate_step(scope, request).await {
                Ok(file) => file,
                Err(error) => {
                    scope.notifier().on_phase_complete(phase, false);
                    return Err(RunBuildError::at(phase)(error));
                }
            };
            project.append_file(file)?;
            scope.transition(
                role,
                AgentStatus::Working,
                batch_progress(index + 1, total_batches),
            )?;
        }

        project.seal_files()?;
        scope.append(MessageDraft::collaboration(
            role,
            format!("{} source files ready for deployment", project.file_count()),
        ).to(AgentRole::Devops));
        scope.notifier().on_phase_complete(phase, true);
        Ok(())
    }

    /// Phase 5: Deployment config; also closes the code generator's last batch
    async fn deployment_phase(
        &self,
        scope: &RunScope,
        project: &ProjectStateAccumulator,
    ) -> Result<DeploymentConfig, RunBuildError> {
        let phase = Phase::DeploymentConfig;
        Self::ready(project, phase)?;
        let requirement = project.requirement().content();
        let architecture = project.architecture()?;
        let request = self.request(
            phase,
            "Prepare the deployment configuration",
            BuildPromptTemplate::deployment(requirement, architecture),
        );

        match self.sequential(scope, phase, request).await {
            Ok(deployment) => {
                scope.transition(AgentRole::CodeGenerator, AgentStatus::Completed, 100)?;
                Ok(deployment)
            }
            Err(error) => {
                let code_generator = scope.agent(AgentRole::CodeGenerator);
                if let Err(e) = scope.transition(
                    AgentRole::CodeGenerator,
                    AgentStatus::Error,
                    code_generator.progress,
                ) {
                    warn!("Could not mark code generator as failed: {}", e);
                }
                Err(error)
            }
        }
    }

    /// Requests for the implementation loop: components first, then models
    fn implementation_targets(
        &self,
        project: &ProjectStateAccumulator,
    ) -> Result<Vec<AgentRequest>, RunBuildError> {
        let requirement = project.requirement().content();
        let tech_stack = &project.architecture()?.tech_stack;
        let frontend = project.frontend_design()?;
        let backend = project.backend_design()?;
        let role = Phase::Implementation.agent();

        let components = frontend
            .components
            .iter()
            .take(self.config.max_component_files)
            .map(|component| {
                AgentRequest::new(
                    role,
                    format!("Implement component {}", component.name),
                    BuildPromptTemplate::component_file(requirement, tech_stack, component),
                )
            });

        let models = backend
            .models
            .iter()
            .take(self.config.max_model_files)
            .map(|model| {
                AgentRequest::new(
                    role,
                    format!("Implement model {}", model.name),
                    BuildPromptTemplate::model_file(
                        requirement,
                        tech_stack,
                        model,
                        &backend.endpoints,
                    ),
                )
            });

        Ok(components.chain(models).collect())
    }

    /// Refuse to start a phase before the fields it reads are committed
    fn ready(project: &ProjectStateAccumulator, phase: Phase) -> Result<(), RunBuildError> {
        project.ensure_committed(&phase.inputs())?;
        Ok(())
    }

    async fn sequential<T: StructuredOutput>(
        &self,
        scope: &RunScope,
        phase: Phase,
        request: AgentRequest,
    ) -> Result<T, RunBuildError> {
        info!("Phase: {}", phase.display_name());
        scope.notifier().on_phase_start(phase);
        let result = self.runner.execute(scope, request).await;
        scope.notifier().on_phase_complete(phase, result.is_ok());
        result.map_err(RunBuildError::at(phase))
    }

    fn spawn_agent<T: StructuredOutput>(
        &self,
        scope: &RunScope,
        request: AgentRequest,
    ) -> JoinHandle<Result<T, AgentError>> {
        let runner = self.runner.clone();
        let scope = scope.clone();
        tokio::spawn(async move { runner.execute::<T>(&scope, request).await })
    }

    fn joined<T>(
        scope: &RunScope,
        phase: Phase,
        result: Result<Result<T, AgentError>, JoinError>,
    ) -> Result<T, RunBuildError> {
        let outcome = match result {
            Ok(inner) => inner.map_err(RunBuildError::at(phase)),
            Err(e) => {
                let role = phase.agent();
                warn!("{} task aborted: {}", role, e);
                if let Err(err) = scope.transition(role, AgentStatus::Error, scope.agent(role).progress)
                {
                    warn!("Could not mark {} as failed: {}", role, err);
                }
                scope.append(MessageDraft::error(role, format!("{} task aborted: {}", role, e)));
                Err(RunBuildError::TaskAborted {
                    phase,
                    reason: e.to_string(),
                })
            }
        };
        scope.notifier().on_phase_complete(phase, outcome.is_ok());
        outcome
    }

    fn request(&self, phase: Phase, task: impl Into<String>, prompt: String) -> AgentRequest {
        AgentRequest::new(phase.agent(), task, prompt)
            .with_initial_progress(self.config.initial_progress.for_phase(phase))
    }
}

/// Linear progress after `done` of `total` batches
fn batch_progress(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (done.min(total) * 100 / total) as u8
}
