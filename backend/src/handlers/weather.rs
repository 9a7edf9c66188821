//! HTTP handlers for weather flood checks

use axum::{
    extract::{Query, State},
    Json,
};

use super::{flood::PointQuery, required_coordinate};
use crate::error::AppResult;
use crate::services::weather::WeatherFloodReport;
use crate::AppState;

/// Flood risk from current weather at a point
pub async fn get_weather_flood_risk(
    State(state): State<AppState>,
    Query(query): Query<PointQuery>,
) -> AppResult<Json<WeatherFloodReport>> {
    let location = required_coordinate(query.lat, query.lng)?;
    let report = state.weather.flood_risk(location).await?;
    Ok(Json(report))
}
