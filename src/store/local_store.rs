use anyhow::Result;
use async_trait::async_trait;

use super::models::{FarmerProfile, MarketEntry, Recommendation};

/// CRUD surface over the three record kinds.
///
/// Saving a record with an `id` replaces the stored record with that id
/// (last write wins); saving without one assigns the next free id.
#[async_trait]
pub trait LocalStore: Send + Sync {
    async fn list_farmer_profiles(&self) -> Result<Vec<FarmerProfile>>;

    async fn get_farmer_profile(&self, id: u64) -> Result<Option<FarmerProfile>>;

    async fn save_farmer_profile(&self, profile: FarmerProfile) -> Result<FarmerProfile>;

    async fn list_market_entries(&self) -> Result<Vec<MarketEntry>>;

    /// Case-insensitive lookup by crop name
    async fn find_market_entry_by_crop(&self, crop_name: &str) -> Result<Option<MarketEntry>>;

    async fn save_market_entry(&self, entry: MarketEntry) -> Result<MarketEntry>;

    async fn list_recommendations(&self) -> Result<Vec<Recommendation>>;

    async fn recommendations_for_farmer(&self, farmer_id: &str) -> Result<Vec<Recommendation>>;

    async fn save_recommendation(&self, recommendation: Recommendation) -> Result<Recommendation>;
}
