use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::agent::{AgentResponse, AgentRole, QueryContext};
use crate::state::AppState;
use crate::store::{FarmerProfile, MarketEntry, Recommendation};
use crate::workflows::{self, MarketFilter};

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn internal_error(e: anyhow::Error) -> ApiError {
    error!("Request failed: {:#}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": e.to_string()})),
    )
}

fn not_found(message: String) -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({"error": message})))
}

/// Full application router with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_check))
        // Agent query service
        .route("/api/agents/:role/query", post(query_agent))
        // Local store
        .route("/api/farmers", get(list_farmers).post(save_farmer))
        .route("/api/farmers/:id", get(get_farmer))
        .route("/api/market", get(list_market).post(save_market_entry))
        .route("/api/market/crops/:name", get(market_entry_by_crop))
        .route("/api/recommendations", get(list_recommendations).post(save_recommendation))
        .route("/api/recommendations/farmer/:farmer_id", get(recommendations_for_farmer))
        // Advisory workflows
        .route("/api/analysis/farm", post(analyze_farm))
        .route("/api/analysis/market", post(analyze_market))
        .route("/api/analysis/coordinate/:farmer_id", post(coordinate))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "liveMode": state.gateway.is_live_mode()
    }))
}

#[derive(Debug, Deserialize)]
struct QueryRequest {
    question: String,
    #[serde(default)]
    context: QueryContext,
}

async fn query_agent(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(request): Json<QueryRequest>,
) -> ApiResult<AgentResponse> {
    let role: AgentRole = role
        .parse()
        .map_err(|e: crate::agent::UnknownRole| (StatusCode::BAD_REQUEST, Json(json!({"error": e.to_string()}))))?;

    let response = state.gateway.query(role, &request.question, &request.context).await;
    Ok(Json(response))
}

async fn list_farmers(State(state): State<AppState>) -> ApiResult<Vec<FarmerProfile>> {
    state.store.list_farmer_profiles().await.map(Json).map_err(internal_error)
}

async fn get_farmer(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<FarmerProfile> {
    state
        .store
        .get_farmer_profile(id)
        .await
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("No farmer profile with id {}", id)))
}

async fn save_farmer(
    State(state): State<AppState>,
    Json(profile): Json<FarmerProfile>,
) -> ApiResult<FarmerProfile> {
    state.store.save_farmer_profile(profile).await.map(Json).map_err(internal_error)
}

async fn list_market(State(state): State<AppState>) -> ApiResult<Vec<MarketEntry>> {
    state.store.list_market_entries().await.map(Json).map_err(internal_error)
}

async fn market_entry_by_crop(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<MarketEntry> {
    state
        .store
        .find_market_entry_by_crop(&name)
        .await
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found(format!("No market data for {}", name)))
}

async fn save_market_entry(
    State(state): State<AppState>,
    Json(entry): Json<MarketEntry>,
) -> ApiResult<MarketEntry> {
    state.store.save_market_entry(entry).await.map(Json).map_err(internal_error)
}

async fn list_recommendations(State(state): State<AppState>) -> ApiResult<Vec<Recommendation>> {
    state.store.list_recommendations().await.map(Json).map_err(internal_error)
}

async fn recommendations_for_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<String>,
) -> ApiResult<Vec<Recommendation>> {
    state
        .store
        .recommendations_for_farmer(&farmer_id)
        .await
        .map(Json)
        .map_err(internal_error)
}

async fn save_recommendation(
    State(state): State<AppState>,
    Json(recommendation): Json<Recommendation>,
) -> ApiResult<Recommendation> {
    state.store.save_recommendation(recommendation).await.map(Json).map_err(internal_error)
}

async fn analyze_farm(
    State(state): State<AppState>,
    Json(profile): Json<FarmerProfile>,
) -> ApiResult<Value> {
    let (profile, response) = workflows::analyze_farm(&state.gateway, state.store.as_ref(), profile)
        .await
        .map_err(internal_error)?;
    Ok(Json(json!({
        "profile": profile,
        "response": response
    })))
}

async fn analyze_market(
    State(state): State<AppState>,
    Json(filter): Json<MarketFilter>,
) -> ApiResult<Value> {
    let (rows, response) = workflows::analyze_market(&state.gateway, state.store.as_ref(), &filter)
        .await
        .map_err(internal_error)?;
    Ok(Json(json!({
        "marketData": rows,
        "response": response
    })))
}

async fn coordinate(
    State(state): State<AppState>,
    Path(farmer_id): Path<String>,
) -> ApiResult<Value> {
    let (recommendation, response) = workflows::coordinate(&state.gateway, state.store.as_ref(), &farmer_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| not_found(format!("No farmer profile for {}", farmer_id)))?;
    Ok(Json(json!({
        "recommendation": recommendation,
        "response": response
    })))
}
