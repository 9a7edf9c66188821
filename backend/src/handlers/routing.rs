//! HTTP handlers for route planning

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::planner::{AssessRoutesRequest, PlanRouteRequest, RoutePlan};
use crate::AppState;

/// Fetch, score and rank routes between two endpoints
pub async fn plan_best_route(
    State(state): State<AppState>,
    Json(request): Json<PlanRouteRequest>,
) -> AppResult<Json<RoutePlan>> {
    let plan = state.planner.plan(request).await?;
    Ok(Json(plan))
}

/// Score and rank routes supplied by the caller
pub async fn assess_routes(
    State(state): State<AppState>,
    Json(request): Json<AssessRoutesRequest>,
) -> AppResult<Json<RoutePlan>> {
    let plan = state.planner.assess(request.routes, request.priority).await?;
    Ok(Json(plan))
}
