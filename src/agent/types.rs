use serde::{Deserialize, Serialize};

/// Structured payload passed alongside a question. Never validated; it is
/// only serialized into the prompt and the simulator hash.
pub type QueryContext = serde_json::Map<String, serde_json::Value>;

/// Recommendation text produced by an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Confidence in `[0, 1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl AgentResponse {
    pub fn new(text: String) -> Self {
        Self {
            text,
            reasoning: None,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }
}
