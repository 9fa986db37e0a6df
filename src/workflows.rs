//! Caller-side flows that assemble context from the store, query an agent
//! and persist the outcome.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::agent::{AgentGateway, AgentResponse, AgentRole, QueryContext};
use crate::store::{DemandTrend, FarmerProfile, LocalStore, MarketEntry, Recommendation, RecommendedCrop};

pub const FARM_QUESTION: &str = "What are the most sustainable crops for this land?";
pub const MARKET_QUESTION: &str = "What are the most profitable crops based on current market trends?";
pub const COORDINATION_QUESTION: &str =
    "Generate balanced recommendations that optimize for both sustainability and profitability.";

/// Market table filter; `None` fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketFilter {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub trend: Option<DemandTrend>,
    /// Case-insensitive crop-name substring
    #[serde(default)]
    pub search: Option<String>,
}

impl MarketFilter {
    pub fn matches(&self, entry: &MarketEntry) -> bool {
        if let Some(region) = &self.region {
            if &entry.region != region {
                return false;
            }
        }
        if let Some(trend) = self.trend {
            if entry.demand_trend != trend {
                return false;
            }
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            if !entry.crop_name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, entries: Vec<MarketEntry>) -> Vec<MarketEntry> {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

fn to_context(value: serde_json::Value) -> QueryContext {
    match value {
        serde_json::Value::Object(map) => map,
        _ => QueryContext::new(),
    }
}

/// Save the profile and ask the farmer advisor about it.
pub async fn analyze_farm(
    gateway: &AgentGateway,
    store: &dyn LocalStore,
    profile: FarmerProfile,
) -> Result<(FarmerProfile, AgentResponse)> {
    let saved = store.save_farmer_profile(profile).await?;
    let context = to_context(serde_json::to_value(&saved)?);
    let response = gateway.query(AgentRole::FarmerAdvisor, FARM_QUESTION, &context).await;
    info!("Farm analysis complete for {}", saved.farmer_id);
    Ok((saved, response))
}

/// Ask the market researcher about the rows matching `filter`.
pub async fn analyze_market(
    gateway: &AgentGateway,
    store: &dyn LocalStore,
    filter: &MarketFilter,
) -> Result<(Vec<MarketEntry>, AgentResponse)> {
    let rows = filter.apply(store.list_market_entries().await?);
    let context = to_context(json!({
        "marketData": rows,
        "region": filter.region.as_deref().unwrap_or("All Regions"),
    }));
    let response = gateway.query(AgentRole::MarketResearcher, MARKET_QUESTION, &context).await;
    Ok((rows, response))
}

fn balanced_crops() -> Vec<RecommendedCrop> {
    let crops: [(&str, u32, u32, u32, &str); 3] = [
        ("Organic Soybean", 92, 89, 95, "Excellent market price with good sustainability metrics for your soil type."),
        ("Winter Wheat", 85, 90, 80, "Excellent for soil health and water conservation with stable market."),
        ("Conservation Corn", 78, 75, 82, "Modified planting approach improves sustainability while maintaining profitability."),
    ];

    crops
        .iter()
        .map(|(name, score, sustainability, profitability, reason)| RecommendedCrop {
            crop_name: name.to_string(),
            score: *score,
            sustainability_score: *sustainability,
            profitability_score: *profitability,
            reason: reason.to_string(),
        })
        .collect()
}

/// Ask the coordinator for a balanced plan and store it as a recommendation.
///
/// Returns `None` when no profile has `farmer_id`.
pub async fn coordinate(
    gateway: &AgentGateway,
    store: &dyn LocalStore,
    farmer_id: &str,
) -> Result<Option<(Recommendation, AgentResponse)>> {
    let farmers = store.list_farmer_profiles().await?;
    let Some(farmer) = farmers.into_iter().find(|f| f.farmer_id == farmer_id) else {
        return Ok(None);
    };

    let market_data = store.list_market_entries().await?;
    let context = to_context(json!({
        "farmerData": farmer,
        "marketData": market_data,
    }));
    let response = gateway.query(AgentRole::Coordinator, COORDINATION_QUESTION, &context).await;

    let saved = store
        .save_recommendation(Recommendation {
            id: None,
            farmer_id: farmer_id.to_string(),
            recommended_crops: balanced_crops(),
            created_at: None,
        })
        .await?;
    info!("Saved recommendation {:?} for {}", saved.id, farmer_id);

    Ok(Some((saved, response)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::simulator::pool;
    use crate::store::JsonFileStore;
    use tempfile::tempdir;

    fn in_pool(role: AgentRole, response: &AgentResponse) -> bool {
        pool(role).iter().any(|e| e.to_response() == *response)
    }

    #[test]
    fn test_market_filter() {
        let entries = crate::store::sample_data::market_entries("now");

        let all = MarketFilter::default().apply(entries.clone());
        assert_eq!(all.len(), 5);

        let midwest = MarketFilter {
            region: Some("Midwest".to_string()),
            ..Default::default()
        };
        assert_eq!(midwest.apply(entries.clone()).len(), 3);

        let stable_southwest = MarketFilter {
            region: Some("Southwest".to_string()),
            trend: Some(DemandTrend::Stable),
            search: None,
        };
        let rows = stable_southwest.apply(entries.clone());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].crop_name, "Sorghum");

        let search = MarketFilter {
            search: Some("SOY".to_string()),
            ..Default::default()
        };
        assert_eq!(search.apply(entries)[0].crop_name, "Soybean");
    }

    #[tokio::test]
    async fn test_analyze_farm_saves_profile() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        let gateway = AgentGateway::simulated();

        let profile = FarmerProfile {
            id: None,
            farmer_id: "farmer-010".to_string(),
            land_size: 120.0,
            soil_type: "Loam".to_string(),
            location: "Midwest".to_string(),
            water_availability: 50.0,
            preferred_crops: vec!["Corn".to_string()],
            financial_goal: 40000.0,
            created_at: None,
        };

        let (saved, response) = analyze_farm(&gateway, &store, profile).await.unwrap();
        assert_eq!(saved.id, Some(3));
        assert!(in_pool(AgentRole::FarmerAdvisor, &response));
        assert_eq!(store.list_farmer_profiles().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_analyze_market_returns_filtered_rows() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        let gateway = AgentGateway::simulated();
        let filter = MarketFilter {
            region: Some("Southwest".to_string()),
            ..Default::default()
        };

        let (rows, response) = analyze_market(&gateway, &store, &filter).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(in_pool(AgentRole::MarketResearcher, &response));
    }

    #[tokio::test]
    async fn test_coordinate_stores_recommendation() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        let gateway = AgentGateway::simulated();

        let (saved, response) = coordinate(&gateway, &store, "farmer-002").await.unwrap().unwrap();
        assert_eq!(saved.farmer_id, "farmer-002");
        assert_eq!(saved.recommended_crops.len(), 3);
        assert!(in_pool(AgentRole::Coordinator, &response));
        assert_eq!(store.recommendations_for_farmer("farmer-002").await.unwrap(), vec![saved]);
    }

    #[tokio::test]
    async fn test_coordinate_unknown_farmer() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        let gateway = AgentGateway::simulated();

        assert!(coordinate(&gateway, &store, "farmer-404").await.unwrap().is_none());
        assert_eq!(store.list_recommendations().await.unwrap().len(), 1);
    }
}
