use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of recommendation agents.
///
/// The role decides both the system preamble sent to a live backend and
/// the canned response pool used by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentRole {
    FarmerAdvisor,
    MarketResearcher,
    Coordinator,
}

impl AgentRole {
    pub const ALL: [AgentRole; 3] = [
        AgentRole::FarmerAdvisor,
        AgentRole::MarketResearcher,
        AgentRole::Coordinator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::FarmerAdvisor => "FarmerAdvisor",
            AgentRole::MarketResearcher => "MarketResearcher",
            AgentRole::Coordinator => "Coordinator",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown agent role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for AgentRole {
    type Err = UnknownRole;

    /// Accepts `FarmerAdvisor`, `farmer-advisor`, `farmer_advisor` and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(|c| c.to_lowercase())
            .collect();

        match normalized.as_str() {
            "farmeradvisor" => Ok(AgentRole::FarmerAdvisor),
            "marketresearcher" => Ok(AgentRole::MarketResearcher),
            "coordinator" => Ok(AgentRole::Coordinator),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}
