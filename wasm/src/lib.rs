//! WebAssembly module for FloodSafe
//!
//! Provides client-side computation for:
//! - Decoding Google encoded polylines
//! - Point flood-risk lookups
//! - Route safety scoring and ranking
//! - Route advice text
//! - Short-horizon flood forecasts
//!
//! Structured values cross the boundary as JSON strings.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

use shared::{
    assess_route as score_route, current_conditions, PredictionInput, RiskLookup, RECENT_DATA_WINDOW_SECS,
};

fn parse<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_priority(priority: &str) -> Result<RoutePriority, JsValue> {
    priority.parse().map_err(|e: String| JsValue::from_str(&e))
}

/// Decode an encoded polyline into a JSON array of `{lat, lng}`
#[wasm_bindgen]
pub fn decode_polyline(encoded: &str) -> Result<String, JsValue> {
    let points = shared::decode_polyline(encoded).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&points)
}

/// Flood risk `{risk, score}` at a coordinate
#[wasm_bindgen]
pub fn flood_risk_at(lat: f64, lng: f64, observations_json: &str) -> Result<String, JsValue> {
    let observations: Vec<FloodObservation> = parse(observations_json, "observations")?;
    let risk = RiskLookup::new(&observations).risk_at(&Coordinate::new(lat, lng));
    to_json(&risk)
}

/// Assess a single route candidate
#[wasm_bindgen]
pub fn assess_route(
    route_json: &str,
    observations_json: &str,
    priority: &str,
) -> Result<String, JsValue> {
    let candidate: RouteCandidate = parse(route_json, "route")?;
    let observations: Vec<FloodObservation> = parse(observations_json, "observations")?;
    let priority = parse_priority(priority)?;

    let route = assess_with_insight(candidate, &RiskLookup::new(&observations), priority);
    to_json(&route)
}

/// Assess and rank a list of route candidates, best first
#[wasm_bindgen]
pub fn rank_routes(
    routes_json: &str,
    observations_json: &str,
    priority: &str,
) -> Result<String, JsValue> {
    let candidates: Vec<RouteCandidate> = parse(routes_json, "routes")?;
    let observations: Vec<FloodObservation> = parse(observations_json, "observations")?;
    let priority = parse_priority(priority)?;
    let lookup = RiskLookup::new(&observations);

    let mut routes: Vec<AssessedRoute> = candidates
        .into_iter()
        .map(|candidate| assess_with_insight(candidate, &lookup, priority))
        .collect();
    shared::rank_routes(&mut routes, priority);
    to_json(&routes)
}

/// Insight text for an already scored route
#[wasm_bindgen]
pub fn route_insight(
    priority: &str,
    safety_score: u8,
    has_flood: bool,
    duration_secs: f64,
) -> Result<String, JsValue> {
    let priority = parse_priority(priority)?;
    Ok(shared::route_insight(
        priority,
        safety_score.clamp(1, 10),
        has_flood,
        duration_secs,
    ))
}

/// Area-wide route advice for the chosen priority
#[wasm_bindgen]
pub fn route_recommendation(observations_json: &str, priority: &str) -> Result<String, JsValue> {
    let observations: Vec<FloodObservation> = parse(observations_json, "observations")?;
    let priority = parse_priority(priority)?;
    let conditions = current_conditions(&observations);
    Ok(shared::route_recommendation(&conditions, priority).to_string())
}

/// Whether any sensor reported within the last two minutes
#[wasm_bindgen]
pub fn has_recent_data(observations_json: &str) -> Result<bool, JsValue> {
    let observations: Vec<FloodObservation> = parse(observations_json, "observations")?;
    let now = DateTime::from_timestamp_millis(js_sys::Date::now() as i64)
        .ok_or_else(|| JsValue::from_str("Invalid clock value"))?;
    Ok(recent_at(&observations, now))
}

/// 24h/48h flood outlook `{next_24h, next_48h, water_level_change_cm, recommendation}`
#[wasm_bindgen]
pub fn flood_forecast(conditions_json: &str, location: &str) -> Result<String, JsValue> {
    let conditions: PredictionInput = parse(conditions_json, "conditions")?;
    to_json(&shared::forecast(&conditions, location.trim()))
}

fn recent_at(observations: &[FloodObservation], now: DateTime<Utc>) -> bool {
    shared::has_recent_data(
        observations,
        now,
        Duration::seconds(RECENT_DATA_WINDOW_SECS),
    )
}

fn assess_with_insight(
    candidate: RouteCandidate,
    lookup: &RiskLookup<'_>,
    priority: RoutePriority,
) -> AssessedRoute {
    let mut assessment = score_route(&candidate, lookup);
    assessment.insight = shared::route_insight(
        priority,
        assessment.safety_score,
        assessment.has_flood,
        candidate.duration,
    );
    AssessedRoute {
        candidate,
        assessment,
    }
}
