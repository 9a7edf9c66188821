//! Short-horizon flood prediction from current field conditions
//!
//! A fixed linear model over normalised features. Scores share the
//! `RiskLevel` thresholds used for points and routes, so a prediction of
//! HIGH means the same thing everywhere.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::RiskLevel;

/// Model confidence reported with every prediction
pub const PREDICTION_CONFIDENCE: f64 = 0.85;

/// 48-hour outlook scales rainfall and water level by these factors
pub const OUTLOOK_48H_RAINFALL_FACTOR: f64 = 1.5;
pub const OUTLOOK_48H_WATER_LEVEL_FACTOR: f64 = 1.2;

const RAINFALL_WEIGHT: f64 = 0.7;
const WATER_LEVEL_WEIGHT: f64 = 0.8;
const SOIL_SATURATION_WEIGHT: f64 = 0.5;
const TEMPERATURE_WEIGHT: f64 = -0.2;
const HUMIDITY_WEIGHT: f64 = 0.3;

// Feature values at which each input counts as fully saturated
const RAINFALL_FULL_MM: f64 = 50.0;
const WATER_LEVEL_FULL_CM: f64 = 100.0;
const TEMPERATURE_FULL_C: f64 = 40.0;
const HUMIDITY_FULL_PERCENT: f64 = 100.0;

/// Current conditions at a monitored location; missing values count as zero
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct PredictionInput {
    /// Rainfall over the last hour, mm
    #[validate(range(min = 0.0, message = "rainfall_mm must not be negative"))]
    pub rainfall_mm: f64,
    /// Water level above the gauge zero, cm
    #[validate(range(min = 0.0, message = "water_level_cm must not be negative"))]
    pub water_level_cm: f64,
    /// Soil saturation from 0 (dry) to 1 (saturated)
    #[validate(range(min = 0.0, max = 1.0, message = "soil_saturation must be between 0 and 1"))]
    pub soil_saturation: f64,
    pub temperature_c: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "humidity_percent must be between 0 and 100"))]
    pub humidity_percent: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FloodPrediction {
    pub score: f64,
    pub risk: RiskLevel,
    pub confidence: f64,
}

/// Predictions for both horizons plus the expected rise and advice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FloodForecast {
    pub next_24h: FloodPrediction,
    pub next_48h: FloodPrediction,
    pub water_level_change_cm: f64,
    pub recommendation: String,
}

fn normalised(value: f64, full: f64) -> f64 {
    (value / full).clamp(0.0, 1.0)
}

/// Weighted flood score in `[0, 1]`
///
/// Each feature is scaled to `[0, 1]` and the weighted sum is divided by
/// the total of the positive weights, so all-saturated inputs on a cold day
/// score exactly 1.
pub fn prediction_score(input: &PredictionInput) -> f64 {
    let positive_weights = RAINFALL_WEIGHT + WATER_LEVEL_WEIGHT + SOIL_SATURATION_WEIGHT + HUMIDITY_WEIGHT;

    let weighted = normalised(input.rainfall_mm, RAINFALL_FULL_MM) * RAINFALL_WEIGHT
        + normalised(input.water_level_cm, WATER_LEVEL_FULL_CM) * WATER_LEVEL_WEIGHT
        + input.soil_saturation.clamp(0.0, 1.0) * SOIL_SATURATION_WEIGHT
        + normalised(input.temperature_c, TEMPERATURE_FULL_C) * TEMPERATURE_WEIGHT
        + normalised(input.humidity_percent, HUMIDITY_FULL_PERCENT) * HUMIDITY_WEIGHT;

    (weighted / positive_weights).clamp(0.0, 1.0)
}

pub fn predict_flood_risk(input: &PredictionInput) -> FloodPrediction {
    let score = prediction_score(input);
    FloodPrediction {
        score,
        risk: RiskLevel::from_score(score),
        confidence: PREDICTION_CONFIDENCE,
    }
}

/// Expected rise in cm; rain raises shallow water more than high water
pub fn predict_water_level_change(current_level_cm: f64, rainfall_mm: f64) -> f64 {
    let base_rise = rainfall_mm.max(0.0) * 0.5;
    let level_factor = (1.0 - current_level_cm / 100.0).max(0.0);
    base_rise * level_factor
}

pub fn evacuation_recommendation(risk: RiskLevel, location: &str) -> String {
    match risk {
        RiskLevel::High => format!(
            "Evacuate immediately from {} area. Flood warning in effect.",
            location
        ),
        RiskLevel::Moderate => format!(
            "Prepare for possible evacuation in low-lying areas near {}.",
            location
        ),
        RiskLevel::Low => format!(
            "Monitor conditions in {} area. No immediate action required.",
            location
        ),
    }
}

/// 24h and 48h predictions for a location
pub fn forecast(input: &PredictionInput, location: &str) -> FloodForecast {
    let next_24h = predict_flood_risk(input);
    let next_48h = predict_flood_risk(&PredictionInput {
        rainfall_mm: input.rainfall_mm * OUTLOOK_48H_RAINFALL_FACTOR,
        water_level_cm: input.water_level_cm * OUTLOOK_48H_WATER_LEVEL_FACTOR,
        ..*input
    });

    FloodForecast {
        next_24h,
        next_48h,
        water_level_change_cm: predict_water_level_change(input.water_level_cm, input.rainfall_mm),
        recommendation: evacuation_recommendation(next_24h.risk, location),
    }
}
