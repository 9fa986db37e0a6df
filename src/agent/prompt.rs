use super::role::AgentRole;
use super::types::QueryContext;

const FARMER_ADVISOR_PREAMBLE: &str = "You are a Farmer Advisor specialized in sustainable agriculture. \
Your task is to analyze the farmer's land data and preferences to suggest the most sustainable crops. \
Focus on water conservation, soil health improvement, and minimizing carbon footprint. \
Provide specific, actionable advice.";

const MARKET_RESEARCHER_PREAMBLE: &str = "You are a Market Researcher focusing on agricultural commodities. \
Analyze current market trends, pricing, and demand forecasts to recommend the most profitable crops. \
Your recommendations should be data-driven and consider regional factors.";

const COORDINATOR_PREAMBLE: &str = "You are a Coordinator that balances sustainability and profitability in agriculture. \
Analyze the recommendations from both sustainability and market perspectives. \
Provide a balanced final recommendation that optimizes both factors.";

/// Renders the single prompt string sent to a live backend.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn preamble(role: AgentRole) -> &'static str {
        match role {
            AgentRole::FarmerAdvisor => FARMER_ADVISOR_PREAMBLE,
            AgentRole::MarketResearcher => MARKET_RESEARCHER_PREAMBLE,
            AgentRole::Coordinator => COORDINATOR_PREAMBLE,
        }
    }

    /// Preamble, context dump and question, separated by blank lines.
    ///
    /// The context dump is for transmission only and is never parsed back.
    pub fn build(role: AgentRole, question: &str, context: &QueryContext) -> String {
        let context_dump = serde_json::to_string(context).unwrap_or_else(|_| "{}".to_string());
        format!(
            "{}\n\nFARMER DATA:\n{}\n\nQUESTION: {}",
            Self::preamble(role),
            context_dump,
            question
        )
    }
}
