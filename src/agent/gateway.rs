use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::backend::{AgentBackend, BackendError};
use super::prompt::PromptBuilder;
use super::role::AgentRole;
use super::simulator::ResponseSimulator;
use super::types::{AgentResponse, QueryContext};
use crate::config::RoleModels;

/// Confidence attached to every live backend answer
pub const LIVE_CONFIDENCE: f64 = 0.85;

/// Why a call ended on the simulated path
#[derive(Debug)]
pub enum FallbackReason {
    /// Live mode is off for this gateway
    Disabled,
    Failed(BackendError),
}

/// Result of the single live attempt of a call
#[derive(Debug)]
pub enum LiveOutcome {
    Live(AgentResponse),
    Fallback(FallbackReason),
}

struct LiveBackend {
    backend: Arc<dyn AgentBackend>,
    models: RoleModels,
    request_timeout: Duration,
}

/// Entry point of the agent query service.
///
/// Whether a live backend is attempted is decided when the gateway is
/// constructed and stays fixed for its lifetime; a failed call never
/// switches it off. Every call resolves to an [`AgentResponse`]: backend
/// failures of any kind end on the simulator.
pub struct AgentGateway {
    live: Option<LiveBackend>,
    simulator: ResponseSimulator,
}

impl AgentGateway {
    /// Gateway that tries `backend` once per call before simulating.
    pub fn live(backend: Arc<dyn AgentBackend>, models: RoleModels, request_timeout: Duration) -> Self {
        info!("Agent gateway in live mode (timeout {:?})", request_timeout);
        Self {
            live: Some(LiveBackend {
                backend,
                models,
                request_timeout,
            }),
            simulator: ResponseSimulator::new(),
        }
    }

    /// Gateway that never leaves the simulator.
    pub fn simulated() -> Self {
        info!("Agent gateway in simulated mode");
        Self {
            live: None,
            simulator: ResponseSimulator::new(),
        }
    }

    pub fn is_live_mode(&self) -> bool {
        self.live.is_some()
    }

    pub async fn query(&self, role: AgentRole, question: &str, context: &QueryContext) -> AgentResponse {
        let outcome = self.attempt_live(role, question, context).await;
        self.resolve(role, question, context, outcome)
    }

    /// Like [`query`](Self::query), but abandons the live attempt once
    /// `deadline` elapses and answers from the simulator instead.
    pub async fn query_within(
        &self,
        role: AgentRole,
        question: &str,
        context: &QueryContext,
        deadline: Duration,
    ) -> AgentResponse {
        let outcome = match tokio::time::timeout(deadline, self.attempt_live(role, question, context)).await {
            Ok(outcome) => outcome,
            Err(_) => LiveOutcome::Fallback(FallbackReason::Failed(BackendError::Timeout(deadline))),
        };
        self.resolve(role, question, context, outcome)
    }

    async fn attempt_live(&self, role: AgentRole, question: &str, context: &QueryContext) -> LiveOutcome {
        let Some(live) = &self.live else {
            return LiveOutcome::Fallback(FallbackReason::Disabled);
        };

        let prompt = PromptBuilder::build(role, question, context);
        let model = live.models.for_role(role);
        debug!("Querying {} with model {}", role, model);

        let result = match tokio::time::timeout(live.request_timeout, live.backend.generate(model, &prompt)).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout(live.request_timeout)),
        };

        match result {
            Ok(text) => LiveOutcome::Live(AgentResponse::new(text).with_confidence(LIVE_CONFIDENCE)),
            Err(e) => LiveOutcome::Fallback(FallbackReason::Failed(e)),
        }
    }

    fn resolve(
        &self,
        role: AgentRole,
        question: &str,
        context: &QueryContext,
        outcome: LiveOutcome,
    ) -> AgentResponse {
        match outcome {
            LiveOutcome::Live(response) => response,
            LiveOutcome::Fallback(reason) => {
                if let FallbackReason::Failed(e) = &reason {
                    warn!("Live query for {} failed, using simulated response: {}", role, e);
                }
                self.simulator.simulate(role, question, context)
            }
        }
    }
}
