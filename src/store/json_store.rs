use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::local_store::LocalStore;
use super::models::{FarmerProfile, MarketEntry, Recommendation, Record};
use super::sample_data;

const FARMER_INPUTS_FILE: &str = "farmer_inputs.json";
const MARKET_DATA_FILE: &str = "market_data.json";
const RECOMMENDATIONS_FILE: &str = "recommendations.json";

#[derive(Debug, Default)]
struct Tables {
    farmer_inputs: Vec<FarmerProfile>,
    market_data: Vec<MarketEntry>,
    recommendations: Vec<Recommendation>,
}

/// Local store kept in memory and mirrored to one JSON file per table.
///
/// Every save rewrites all three files. There are no transactions; the
/// last write wins.
pub struct JsonFileStore {
    data_dir: PathBuf,
    tables: RwLock<Tables>,
}

impl JsonFileStore {
    /// Open the store in `data_dir`, seeding sample data when no farmer
    /// profiles exist yet.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;

        let mut tables = Tables {
            farmer_inputs: load_table(&data_dir.join(FARMER_INPUTS_FILE)),
            market_data: load_table(&data_dir.join(MARKET_DATA_FILE)),
            recommendations: load_table(&data_dir.join(RECOMMENDATIONS_FILE)),
        };

        if tables.farmer_inputs.is_empty() {
            info!("No farmer profiles in {:?}, loading sample data", data_dir);
            let now = now_rfc3339();
            tables = Tables {
                farmer_inputs: sample_data::farmer_profiles(&now),
                market_data: sample_data::market_entries(&now),
                recommendations: sample_data::recommendations(&now),
            };
            persist(&data_dir, &tables)?;
        }

        Ok(Self {
            data_dir,
            tables: RwLock::new(tables),
        })
    }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn load_table<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    if !path.exists() {
        return Vec::new();
    }

    let parsed = fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|content| serde_json::from_str(&content).map_err(anyhow::Error::from));

    match parsed {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Error loading {:?}, starting empty: {}", path, e);
            Vec::new()
        }
    }
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(rows)?)?;
    Ok(())
}

fn persist(data_dir: &Path, tables: &Tables) -> Result<()> {
    write_table(&data_dir.join(FARMER_INPUTS_FILE), &tables.farmer_inputs)?;
    write_table(&data_dir.join(MARKET_DATA_FILE), &tables.market_data)?;
    write_table(&data_dir.join(RECOMMENDATIONS_FILE), &tables.recommendations)?;
    debug!("Persisted store tables to {:?}", data_dir);
    Ok(())
}

/// Replace the row sharing `record`'s id, or append it under the next id.
fn upsert<T: Record + Clone>(table: &mut Vec<T>, mut record: T, now: &str) -> T {
    record.stamp(now);

    match record.id() {
        Some(id) => match table.iter_mut().find(|row| row.id() == Some(id)) {
            Some(row) => *row = record.clone(),
            None => table.push(record.clone()),
        },
        None => {
            let next_id = table.iter().filter_map(|row| row.id()).max().unwrap_or(0) + 1;
            record.set_id(next_id);
            table.push(record.clone());
        }
    }

    record
}

#[async_trait]
impl LocalStore for JsonFileStore {
    async fn list_farmer_profiles(&self) -> Result<Vec<FarmerProfile>> {
        Ok(self.tables.read().await.farmer_inputs.clone())
    }

    async fn get_farmer_profile(&self, id: u64) -> Result<Option<FarmerProfile>> {
        let tables = self.tables.read().await;
        Ok(tables.farmer_inputs.iter().find(|p| p.id == Some(id)).cloned())
    }

    async fn save_farmer_profile(&self, profile: FarmerProfile) -> Result<FarmerProfile> {
        let mut tables = self.tables.write().await;
        let saved = upsert(&mut tables.farmer_inputs, profile, &now_rfc3339());
        persist(&self.data_dir, &tables)?;
        Ok(saved)
    }

    async fn list_market_entries(&self) -> Result<Vec<MarketEntry>> {
        Ok(self.tables.read().await.market_data.clone())
    }

    async fn find_market_entry_by_crop(&self, crop_name: &str) -> Result<Option<MarketEntry>> {
        let tables = self.tables.read().await;
        Ok(tables
            .market_data
            .iter()
            .find(|e| e.crop_name.eq_ignore_ascii_case(crop_name))
            .cloned())
    }

    async fn save_market_entry(&self, entry: MarketEntry) -> Result<MarketEntry> {
        let mut tables = self.tables.write().await;
        let saved = upsert(&mut tables.market_data, entry, &now_rfc3339());
        persist(&self.data_dir, &tables)?;
        Ok(saved)
    }

    async fn list_recommendations(&self) -> Result<Vec<Recommendation>> {
        Ok(self.tables.read().await.recommendations.clone())
    }

    async fn recommendations_for_farmer(&self, farmer_id: &str) -> Result<Vec<Recommendation>> {
        let tables = self.tables.read().await;
        Ok(tables
            .recommendations
            .iter()
            .filter(|r| r.farmer_id == farmer_id)
            .cloned()
            .collect())
    }

    async fn save_recommendation(&self, recommendation: Recommendation) -> Result<Recommendation> {
        let mut tables = self.tables.write().await;
        let saved = upsert(&mut tables.recommendations, recommendation, &now_rfc3339());
        persist(&self.data_dir, &tables)?;
        Ok(saved)
    }
}
