//! HTTP handlers for flood predictions

use axum::Json;
use serde::Deserialize;
use shared::{forecast, validate_address, FloodForecast, PredictionInput};
use validator::Validate;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    /// Area named in the advice text
    pub location: String,
    pub conditions: PredictionInput,
}

/// 24h/48h flood outlook for the supplied conditions
pub async fn predict_flood(Json(request): Json<PredictionRequest>) -> AppResult<Json<FloodForecast>> {
    request.conditions.validate()?;

    validate_address(&request.location).map_err(|msg| AppError::validation("location", msg))?;

    let outlook = forecast(&request.conditions, request.location.trim());
    tracing::debug!(
        risk_24h = %outlook.next_24h.risk,
        risk_48h = %outlook.next_48h.risk,
        "Flood prediction computed"
    );

    Ok(Json(outlook))
}
