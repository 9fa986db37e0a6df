use std::sync::Arc;

use crate::agent::{AgentGateway, AgentGatewayFactory};
use crate::config::Config;
use crate::store::{JsonFileStore, LocalStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub gateway: Arc<AgentGateway>,
    pub store: Arc<dyn LocalStore>,
}

impl AppState {
    /// Resolve live mode and open the store described by `config`.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let gateway = Arc::new(AgentGatewayFactory::create(&config.agent_config).await);
        let store = Arc::new(JsonFileStore::open(&config.system_config.data_dir)?);

        Ok(Self {
            config,
            gateway,
            store,
        })
    }

    pub fn from_parts(config: Config, gateway: Arc<AgentGateway>, store: Arc<dyn LocalStore>) -> Self {
        Self {
            config,
            gateway,
            store,
        }
    }
}
