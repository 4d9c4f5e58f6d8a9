//! Agent runner
//!
//! Invokes the generation backend for one agent, validates the structured
//! response and keeps the agent's status and the message log in step.

use super::run_context::RunScope;
use crate::ports::generation::{GenerationError, GenerationService};
use buildcrew_domain::{
    AgentRole, AgentStatus, BuildPromptTemplate, DomainError, MessageDraft, MessageSender,
    StructuredOutput,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised by a single agent call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("{role} generation failed: {source}")]
    Generation {
        role: AgentRole,
        #[source]
        source: GenerationError,
    },

    #[error("{role} returned a malformed payload: {reason}")]
    Malformation { role: AgentRole, reason: String },

    #[error("{role} state error: {source}")]
    State {
        role: AgentRole,
        #[source]
        source: DomainError,
    },
}

impl AgentError {
    pub fn role(&self) -> AgentRole {
        match self {
            AgentError::Generation { role, .. }
            | AgentError::Malformation { role, .. }
            | AgentError::State { role, .. } => *role,
        }
    }

    pub fn is_malformation(&self) -> bool {
        matches!(self, AgentError::Malformation { .. })
    }
}

/// One request to an agent
#[derive(Debug, Clone)]
pub struct AgentRequest {
    pub role: AgentRole,
    /// Short description of the task, used in the task message
    pub task: String,
    /// Role-specific prompt, without the response shape
    pub prompt: String,
    /// Progress reported when the agent starts working
    pub initial_progress: u8,
}

impl AgentRequest {
    pub fn new(role: AgentRole, task: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            role,
            task: task.into(),
            prompt: prompt.into(),
            initial_progress: 0,
        }
    }

    pub fn with_initial_progress(mut self, progress: u8) -> Self {
        self.initial_progress = progress;
        self
    }
}

/// Runs agent calls against a [`GenerationService`]
pub struct AgentRunner<G: GenerationService + 'static> {
    generation: Arc<G>,
}

impl<G: GenerationService + 'static> Clone for AgentRunner<G> {
    fn clone(&self) -> Self {
        Self {
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<G: GenerationService + 'static> AgentRunner<G> {
    pub fn new(generation: Arc<G>) -> Self {
        Self { generation }
    }

    /// Run one complete agent phase.
    ///
    /// `Idle -> Working(initial) -> Completed(100)` on success, with a
    /// response message summarising the result. On failure the agent ends
    /// in `Error` and an error message is appended before returning.
    pub async fn execute<T: StructuredOutput>(
        &self,
        scope: &RunScope,
        request: AgentRequest,
    ) -> Result<T, AgentError> {
        let role = request.role;
        Self::transition(scope, role, AgentStatus::Working, request.initial_progress)?;

        let result: T = self.call(scope, &request).await?;

        Self::transition(scope, role, AgentStatus::Completed, 100)?;
        scope.append(MessageDraft::response(role, result.summary()));
        info!("{} completed: {}", role, result.summary());
        Ok(result)
    }

    /// Run one step of a multi-call phase.
    ///
    /// The caller owns the agent's `Working` status and progress; only a
    /// failure changes the status here.
    pub async fn generate_step<T: StructuredOutput>(
        &self,
        scope: &RunScope,
        request: AgentRequest,
    ) -> Result<T, AgentError> {
        let result: T = self.call(scope, &request).await?;
        scope.append(MessageDraft::response(request.role, result.summary()));
        debug!("{} step done: {}", request.role, result.summary());
        Ok(result)
    }

    /// Mark an agent failed and log the error message
    pub fn fail(scope: &RunScope, error: &AgentError) {
        let role = error.role();
        if let Err(e) = scope.transition(role, AgentStatus::Error, scope.agent(role).progress) {
            warn!("Could not mark {} as failed: {}", role, e);
        }
        scope.append(MessageDraft::error(role, error.to_string()));
    }

    async fn call<T: StructuredOutput>(
        &self,
        scope: &RunScope,
        request: &AgentRequest,
    ) -> Result<T, AgentError> {
        let role = request.role;
        let shape = T::shape();

        scope.append(MessageDraft::task(MessageSender::System, request.task.clone()).to(role));
        debug!("{} generating '{}'", role, shape.name);

        let prompt = BuildPromptTemplate::with_shape(&request.prompt, shape.description);
        let outcome = match self.generation.generate_structured(&prompt, &shape).await {
            Ok(value) => shape.parse::<T>(value).map_err(|e| AgentError::Malformation {
                role,
                reason: e.to_string(),
            }),
            Err(GenerationError::MalformedResponse(reason)) => {
                Err(AgentError::Malformation { role, reason })
            }
            Err(source) => Err(AgentError::Generation { role, source }),
        };

        if let Err(error) = &outcome {
            warn!("{} failed: {}", role, error);
            Self::fail(scope, error);
        }
        outcome
    }

    fn transition(
        scope: &RunScope,
        role: AgentRole,
        status: AgentStatus,
        progress: u8,
    ) -> Result<(), AgentError> {
        scope
            .transition(role, status, progress)
            .map(|_| ())
            .map_err(|source| AgentError::State { role, source })
    }
}
