//! Route definitions for the FloodSafe API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Sensor store
        .route(
            "/sensor-data",
            get(handlers::list_sensor_data).post(handlers::upsert_sensor_data),
        )
        .route("/nearby-floods", get(handlers::get_nearby_floods))
        // Flood snapshot
        .route("/flood-data", get(handlers::get_flood_data))
        .route("/flood-risk", get(handlers::get_flood_risk))
        .route("/conditions", get(handlers::get_conditions))
        // Flood prediction
        .route("/predictions", post(handlers::predict_flood))
        // Route planning
        .nest("/routes", route_planning_routes())
        // Weather
        .nest("/weather", weather_routes())
}

fn route_planning_routes() -> Router<AppState> {
    Router::new()
        .route("/best", post(handlers::plan_best_route))
        .route("/assess", post(handlers::assess_routes))
}

fn weather_routes() -> Router<AppState> {
    Router::new().route("/flood-risk", get(handlers::get_weather_flood_risk))
}
