use serde::{Deserialize, Serialize};

/// Land and preference data submitted by a farmer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub farmer_id: String,
    /// Acres
    pub land_size: f64,
    pub soil_type: String,
    pub location: String,
    /// Percentage, 0-100
    pub water_availability: f64,
    #[serde(default)]
    pub preferred_crops: Vec<String>,
    pub financial_goal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandTrend {
    Increasing,
    Stable,
    Decreasing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub crop_name: String,
    pub current_price: f64,
    pub demand_trend: DemandTrend,
    #[serde(default)]
    pub seasonality: Vec<String>,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedCrop {
    pub crop_name: String,
    pub score: u32,
    pub sustainability_score: u32,
    pub profitability_score: u32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub farmer_id: String,
    pub recommended_crops: Vec<RecommendedCrop>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A row of one of the store's tables
pub trait Record {
    fn id(&self) -> Option<u64>;
    fn set_id(&mut self, id: u64);
    /// Fill the creation timestamp if the caller left it empty.
    fn stamp(&mut self, now: &str);
}

impl Record for FarmerProfile {
    fn id(&self) -> Option<u64> {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    fn stamp(&mut self, now: &str) {
        self.created_at.get_or_insert_with(|| now.to_string());
    }
}

impl Record for MarketEntry {
    fn id(&self) -> Option<u64> {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    fn stamp(&mut self, now: &str) {
        self.timestamp.get_or_insert_with(|| now.to_string());
    }
}

impl Record for Recommendation {
    fn id(&self) -> Option<u64> {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    fn stamp(&mut self, now: &str) {
        self.created_at.get_or_insert_with(|| now.to_string());
    }
}
