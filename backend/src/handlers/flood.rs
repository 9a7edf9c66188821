//! HTTP handlers for the flood snapshot

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    current_conditions, has_recent_data, route_recommendation, Coordinate, FloodObservation,
    RiskLevel, RoutePriority, RECENT_DATA_WINDOW_SECS,
};

use super::required_coordinate;
use crate::error::{AppError, AppResult};
use crate::services::SnapshotSource;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct FloodDataResponse {
    pub nodes: Vec<FloodObservation>,
    pub source: SnapshotSource,
    pub refreshed_at: DateTime<Utc>,
    pub has_recent_data: bool,
}

/// Current flood snapshot
pub async fn get_flood_data(State(state): State<AppState>) -> Json<FloodDataResponse> {
    let snapshot = state.snapshot.current().await;
    let recent = has_recent_data(
        &snapshot.observations,
        Utc::now(),
        chrono::Duration::seconds(RECENT_DATA_WINDOW_SECS),
    );

    Json(FloodDataResponse {
        nodes: snapshot.observations,
        source: snapshot.source,
        refreshed_at: snapshot.refreshed_at,
        has_recent_data: recent,
    })
}

#[derive(Debug, Deserialize)]
pub struct PointQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct FloodRiskResponse {
    pub location: Coordinate,
    pub risk: RiskLevel,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub source: SnapshotSource,
}

/// Flood risk at a single point
pub async fn get_flood_risk(
    State(state): State<AppState>,
    Query(query): Query<PointQuery>,
) -> AppResult<Json<FloodRiskResponse>> {
    let location = required_coordinate(query.lat, query.lng)?;

    let snapshot = state.snapshot.read().await;
    let lookup = snapshot.lookup(state.config.flood.cutoff_km);
    let point = lookup.risk_at(&location);
    let nearest = lookup
        .nearest(&location)
        .filter(|(_, distance)| *distance <= lookup.cutoff_km());

    Ok(Json(FloodRiskResponse {
        location,
        risk: point.risk,
        score: point.score,
        nearest_node: nearest.map(|(obs, _)| obs.node_id.clone()),
        distance_km: nearest.map(|(_, distance)| distance),
        source: snapshot.source,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ConditionsQuery {
    pub priority: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConditionsResponse {
    pub severity: RiskLevel,
    pub observation_count: usize,
    pub priority: RoutePriority,
    pub recommendation: String,
    pub source: SnapshotSource,
}

/// Area-wide conditions and advice for a routing priority
pub async fn get_conditions(
    State(state): State<AppState>,
    Query(query): Query<ConditionsQuery>,
) -> AppResult<Json<ConditionsResponse>> {
    let priority = match query.priority.as_deref() {
        Some(value) => value
            .parse::<RoutePriority>()
            .map_err(|msg| AppError::validation("priority", msg))?,
        None => RoutePriority::default(),
    };

    let snapshot = state.snapshot.read().await;
    let conditions = current_conditions(&snapshot.observations);

    Ok(Json(ConditionsResponse {
        severity: conditions.severity,
        observation_count: conditions.observation_count,
        priority,
        recommendation: route_recommendation(&conditions, priority).to_string(),
        source: snapshot.source,
    }))
}
