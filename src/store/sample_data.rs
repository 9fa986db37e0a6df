use super::models::{DemandTrend, FarmerProfile, MarketEntry, Recommendation, RecommendedCrop};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn farmer_profiles(now: &str) -> Vec<FarmerProfile> {
    vec![
        FarmerProfile {
            id: Some(1),
            farmer_id: "farmer-001".to_string(),
            land_size: 150.0,
            soil_type: "Clay Loam".to_string(),
            location: "Midwest".to_string(),
            water_availability: 75.0,
            preferred_crops: strings(&["Corn", "Soybean", "Wheat"]),
            financial_goal: 50000.0,
            created_at: Some(now.to_string()),
        },
        FarmerProfile {
            id: Some(2),
            farmer_id: "farmer-002".to_string(),
            land_size: 80.0,
            soil_type: "Sandy Loam".to_string(),
            location: "Southwest".to_string(),
            water_availability: 40.0,
            preferred_crops: strings(&["Cotton", "Sorghum"]),
            financial_goal: 30000.0,
            created_at: Some(now.to_string()),
        },
    ]
}

pub(crate) fn market_entries(now: &str) -> Vec<MarketEntry> {
    let rows: [(&str, f64, DemandTrend, &[&str], &str); 5] = [
        ("Corn", 5.73, DemandTrend::Increasing, &["Spring", "Summer"], "Midwest"),
        ("Soybean", 12.58, DemandTrend::Stable, &["Spring", "Summer"], "Midwest"),
        ("Wheat", 6.84, DemandTrend::Decreasing, &["Fall", "Winter"], "Midwest"),
        ("Cotton", 0.89, DemandTrend::Increasing, &["Spring", "Summer"], "Southwest"),
        ("Sorghum", 4.82, DemandTrend::Stable, &["Summer"], "Southwest"),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (crop, price, trend, seasons, region))| MarketEntry {
            id: Some(i as u64 + 1),
            crop_name: crop.to_string(),
            current_price: *price,
            demand_trend: *trend,
            seasonality: strings(seasons),
            region: region.to_string(),
            timestamp: Some(now.to_string()),
        })
        .collect()
}

pub(crate) fn recommendations(now: &str) -> Vec<Recommendation> {
    vec![Recommendation {
        id: Some(1),
        farmer_id: "farmer-001".to_string(),
        recommended_crops: vec![
            RecommendedCrop {
                crop_name: "Soybean".to_string(),
                score: 85,
                sustainability_score: 80,
                profitability_score: 90,
                reason: "High market price with good sustainability metrics for your soil type.".to_string(),
            },
            RecommendedCrop {
                crop_name: "Corn".to_string(),
                score: 78,
                sustainability_score: 75,
                profitability_score: 82,
                reason: "Good water efficiency and increasing market demand.".to_string(),
            },
        ],
        created_at: Some(now.to_string()),
    }]
}
