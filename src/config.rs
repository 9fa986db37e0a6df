use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use tracing::{debug, info};
use regex::Regex;

use crate::agent::AgentRole;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub agent_config: AgentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the local store's JSON tables
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "data".to_string()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
        }
    }
}

/// Whether the gateway attempts a live backend before simulating.
/// Resolved once at startup and never re-evaluated per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveMode {
    #[default]
    Off,
    On,
    /// Probe the backend once at startup
    Auto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub live_mode: LiveMode,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub models: RoleModels,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            live_mode: LiveMode::default(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            models: RoleModels::default(),
        }
    }
}

/// Model identifier sent to the backend for each role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleModels {
    #[serde(default = "default_model")]
    pub farmer_advisor: String,
    #[serde(default = "default_model")]
    pub market_researcher: String,
    #[serde(default = "default_model")]
    pub coordinator: String,
}

fn default_model() -> String {
    "llama3".to_string()
}

impl Default for RoleModels {
    fn default() -> Self {
        Self {
            farmer_advisor: default_model(),
            market_researcher: default_model(),
            coordinator: default_model(),
        }
    }
}

impl RoleModels {
    pub fn for_role(&self, role: AgentRole) -> &str {
        match role {
            AgentRole::FarmerAdvisor => &self.farmer_advisor,
            AgentRole::MarketResearcher => &self.market_researcher,
            AgentRole::Coordinator => &self.coordinator,
        }
    }
}

impl Config {
    /// Load a YAML or JSON config file, chosen by extension.
    ///
    /// `${VAR}` placeholders are replaced with environment variables;
    /// unset variables are left as written.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }
        let content = substitute_env_vars(&fs::read_to_string(path)?)?;

        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".json") {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Load `explicit` if given, failing when it does not load. Otherwise
    /// take the first of `candidates` that loads, or the defaults.
    pub fn locate(explicit: Option<&str>, candidates: &[String]) -> Result<Self> {
        if let Some(path) = explicit {
            let config = Self::load(path).with_context(|| format!("Could not load config file {}", path))?;
            info!("Loaded configuration from: {}", path);
            return Ok(config);
        }

        for path in candidates {
            match Self::load(path) {
                Ok(config) => {
                    info!("Loaded configuration from: {}", path);
                    return Ok(config);
                }
                Err(e) => debug!("Failed to load config from {}: {}", path, e),
            }
        }

        info!("No config file found (tried {:?}), using defaults", candidates);
        Ok(Self::default())
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

fn substitute_env_vars(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}
