//! HTTP handlers for sensor readings

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{NearbyFlood, PaginatedResponse, Pagination, SensorReading, UpsertSensorReading};

use super::required_coordinate;
use crate::error::AppResult;
use crate::services::sensor::{SensorService, DEFAULT_NEARBY_RADIUS_M};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SensorListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// List sensor readings, newest first
pub async fn list_sensor_data(
    State(state): State<AppState>,
    Query(query): Query<SensorListQuery>,
) -> AppResult<Json<PaginatedResponse<SensorReading>>> {
    let service = SensorService::new(state.db);
    let pagination = Pagination::from_query(query.page, query.limit);
    let readings = service.list(pagination).await?;
    Ok(Json(readings))
}

/// Store the latest reading for a node
pub async fn upsert_sensor_data(
    State(state): State<AppState>,
    Json(input): Json<UpsertSensorReading>,
) -> AppResult<(StatusCode, Json<SensorReading>)> {
    let service = SensorService::new(state.db);
    let reading = service.upsert(input).await?;
    Ok((StatusCode::CREATED, Json(reading)))
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Metres
    pub radius: Option<u32>,
}

/// Readings near a point, nearest first
pub async fn get_nearby_floods(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> AppResult<Json<Vec<NearbyFlood>>> {
    let center = required_coordinate(query.lat, query.lng)?;
    let service = SensorService::new(state.db);
    let floods = service
        .nearby(center, query.radius.unwrap_or(DEFAULT_NEARBY_RADIUS_M))
        .await?;
    Ok(Json(floods))
}
