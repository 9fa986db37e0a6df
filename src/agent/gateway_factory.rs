use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::agent::backend::{AgentBackend, OllamaBackend};
use crate::agent::gateway::AgentGateway;
use crate::config::{AgentConfig, LiveMode};

/// Factory for creating the agent gateway
pub struct AgentGatewayFactory;

impl AgentGatewayFactory {
    /// Create a gateway backed by Ollama at `config.base_url`.
    pub async fn create(config: &AgentConfig) -> AgentGateway {
        let backend = Arc::new(OllamaBackend::new(config.base_url.clone()));
        Self::create_with_backend(config, backend).await
    }

    /// Resolve the live-mode setting against `backend`.
    ///
    /// `auto` probes the backend exactly once; the answer is fixed for the
    /// lifetime of the returned gateway.
    pub async fn create_with_backend(config: &AgentConfig, backend: Arc<dyn AgentBackend>) -> AgentGateway {
        let live = match config.live_mode {
            LiveMode::Off => false,
            LiveMode::On => true,
            LiveMode::Auto => {
                info!("Checking backend availability at {}", config.base_url);
                let available = backend.is_available().await;
                if !available {
                    warn!("Backend at {} is not available, using simulated responses", config.base_url);
                }
                available
            }
        };

        if live {
            AgentGateway::live(
                backend,
                config.models.clone(),
                Duration::from_secs(config.request_timeout_secs),
            )
        } else {
            AgentGateway::simulated()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::backend::BackendError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ProbeOnly {
        available: bool,
        probes: AtomicUsize,
    }

    #[async_trait]
    impl AgentBackend for ProbeOnly {
        async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, BackendError> {
            Ok("live".to_string())
        }

        async fn is_available(&self) -> bool {
            self.probes.fetch_add(1, Ordering::SeqCst);
            self.available
        }
    }

    fn config(live_mode: LiveMode) -> AgentConfig {
        AgentConfig {
            live_mode,
            ..AgentConfig::default()
        }
    }

    #[tokio::test]
    async fn test_off_and_on_skip_the_probe() {
        let backend = Arc::new(ProbeOnly { available: false, probes: AtomicUsize::new(0) });

        let off = AgentGatewayFactory::create_with_backend(&config(LiveMode::Off), backend.clone()).await;
        let on = AgentGatewayFactory::create_with_backend(&config(LiveMode::On), backend.clone()).await;

        assert!(!off.is_live_mode());
        assert!(on.is_live_mode());
        assert_eq!(backend.probes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_auto_probes_once() {
        let up = Arc::new(ProbeOnly { available: true, probes: AtomicUsize::new(0) });
        let gateway = AgentGatewayFactory::create_with_backend(&config(LiveMode::Auto), up.clone()).await;
        assert!(gateway.is_live_mode());
        assert_eq!(up.probes.load(Ordering::SeqCst), 1);

        let down = Arc::new(ProbeOnly { available: false, probes: AtomicUsize::new(0) });
        let gateway = AgentGatewayFactory::create_with_backend(&config(LiveMode::Auto), down.clone()).await;
        assert!(!gateway.is_live_mode());

        gateway.query(crate::agent::AgentRole::Coordinator, "q", &Default::default()).await;
        assert_eq!(down.probes.load(Ordering::SeqCst), 1);
    }
}
