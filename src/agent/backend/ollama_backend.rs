use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::backend_interface::{AgentBackend, BackendError};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Ollama `/api/generate` client
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: Client,
    base_url: String,
}

impl OllamaBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Initialized OllamaBackend: base_url={}", base_url);
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl AgentBackend for OllamaBackend {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }

        let body = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        debug!("Ollama answered with {} characters", parsed.response.len());
        Ok(parsed.response)
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Ollama availability probe failed: {}", e);
                false
            }
        }
    }
}
