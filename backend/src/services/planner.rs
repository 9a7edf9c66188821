//! Route planner: fetch candidates, score them against the flood snapshot
//! and rank them by the requested priority

use serde::{Deserialize, Serialize};
use shared::{
    assess_route, current_conditions, rank_routes, route_insight, route_recommendation,
    validate_address, validate_coordinate, AssessedRoute, FloodObservation, RiskLookup,
    RouteCandidate, RoutePriority,
};

use crate::error::{AppError, AppResult};
use crate::external::{GeocodingClient, RoutingClient, Waypoint};
use crate::services::snapshot::{SnapshotSource, SnapshotStore};

/// Request body for planning a route between two endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRouteRequest {
    pub origin: Option<Waypoint>,
    pub destination: Option<Waypoint>,
    #[serde(default)]
    pub priority: RoutePriority,
}

/// Request body for scoring routes the caller already has
#[derive(Debug, Clone, Deserialize)]
pub struct AssessRoutesRequest {
    pub routes: Vec<RouteCandidate>,
    #[serde(default)]
    pub priority: RoutePriority,
}

/// Ranked routes with the area-wide advice
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub recommended: AssessedRoute,
    pub routes: Vec<AssessedRoute>,
    pub priority: RoutePriority,
    pub recommendation: String,
    pub snapshot_source: SnapshotSource,
}

#[derive(Clone)]
pub struct RoutePlanner {
    routing: RoutingClient,
    geocoding: GeocodingClient,
    snapshot: SnapshotStore,
    cutoff_km: f64,
}

impl RoutePlanner {
    pub fn new(
        routing: RoutingClient,
        geocoding: GeocodingClient,
        snapshot: SnapshotStore,
        cutoff_km: f64,
    ) -> Self {
        Self {
            routing,
            geocoding,
            snapshot,
            cutoff_km,
        }
    }

    /// Plan routes between two endpoints
    pub async fn plan(&self, request: PlanRouteRequest) -> AppResult<RoutePlan> {
        let origin = require_waypoint("origin", request.origin)?;
        let destination = require_waypoint("destination", request.destination)?;

        let origin = self.resolve("origin", origin).await?;
        let destination = self.resolve("destination", destination).await?;

        let candidates = self.routing.fetch_routes(&origin, &destination).await?;
        if candidates.is_empty() {
            return Err(AppError::RoutingUnavailable("no routes found".to_string()));
        }

        tracing::debug!(
            candidates = candidates.len(),
            priority = %request.priority,
            "Route candidates received"
        );

        self.assess(candidates, request.priority).await
    }

    /// Score and rank caller-supplied candidates
    pub async fn assess(
        &self,
        candidates: Vec<RouteCandidate>,
        priority: RoutePriority,
    ) -> AppResult<RoutePlan> {
        let snapshot = self.snapshot.read().await;
        build_plan(
            candidates,
            &snapshot.observations,
            self.cutoff_km,
            priority,
            snapshot.source,
        )
    }

    /// Geocode an address endpoint when the provider only takes coordinates.
    /// Any geocoding failure means no route can be calculated.
    async fn resolve(&self, field: &str, waypoint: Waypoint) -> AppResult<Waypoint> {
        match waypoint {
            Waypoint::Address(address) if self.routing.needs_coordinates() => {
                let coordinate = self
                    .geocoding
                    .geocode(address.trim())
                    .await
                    .map_err(|e| {
                        tracing::warn!(%address, "Geocoding {} failed: {}", field, e);
                        AppError::RoutingUnavailable(format!("could not geocode {}", field))
                    })?;
                tracing::debug!(%address, lat = coordinate.lat, lng = coordinate.lng, "Address geocoded");
                Ok(Waypoint::Coordinate(coordinate))
            }
            other => Ok(other),
        }
    }
}

/// Reject a missing or malformed endpoint before any network call
fn require_waypoint(field: &str, waypoint: Option<Waypoint>) -> AppResult<Waypoint> {
    let waypoint =
        waypoint.ok_or_else(|| AppError::validation(field, format!("{} is required", field)))?;

    match &waypoint {
        Waypoint::Coordinate(c) => validate_coordinate(c),
        Waypoint::Address(address) => validate_address(address),
    }
    .map_err(|msg| AppError::validation(field, msg))?;

    Ok(waypoint)
}

/// Assess every candidate with an insight for `priority`, best first
pub fn assess_candidates(
    candidates: Vec<RouteCandidate>,
    observations: &[FloodObservation],
    cutoff_km: f64,
    priority: RoutePriority,
) -> Vec<AssessedRoute> {
    let lookup = RiskLookup::new(observations).with_cutoff_km(cutoff_km);

    let mut routes: Vec<AssessedRoute> = candidates
        .into_iter()
        .map(|candidate| {
            let mut assessment = assess_route(&candidate, &lookup);
            assessment.insight = route_insight(
                priority,
                assessment.safety_score,
                assessment.has_flood,
                candidate.duration,
            );
            AssessedRoute {
                candidate,
                assessment,
            }
        })
        .collect();

    rank_routes(&mut routes, priority);
    routes
}

fn build_plan(
    candidates: Vec<RouteCandidate>,
    observations: &[FloodObservation],
    cutoff_km: f64,
    priority: RoutePriority,
    snapshot_source: SnapshotSource,
) -> AppResult<RoutePlan> {
    let routes = assess_candidates(candidates, observations, cutoff_km, priority);
    let recommended = routes
        .first()
        .cloned()
        .ok_or_else(|| AppError::validation("routes", "at least one route is required"))?;

    let conditions = current_conditions(observations);

    Ok(RoutePlan {
        recommended,
        routes,
        priority,
        recommendation: route_recommendation(&conditions, priority).to_string(),
        snapshot_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Coordinate, Severity, DEFAULT_CUTOFF_KM};

    fn straight(from: Coordinate, to: Coordinate, points: usize) -> Vec<Coordinate> {
        (0..points)
            .map(|i| {
                let t = i as f64 / (points - 1) as f64;
                Coordinate::new(
                    from.lat + (to.lat - from.lat) * t,
                    from.lng + (to.lng - from.lng) * t,
                )
            })
            .collect()
    }

    fn flooded_node() -> Vec<FloodObservation> {
        vec![FloodObservation::new(
            "NODE_001",
            Coordinate::new(14.345, 121.085),
            Severity::High,
        )]
    }

    fn candidates() -> Vec<RouteCandidate> {
        // Through the flooded node, short
        let through = straight(Coordinate::new(14.345, 121.07), Coordinate::new(14.345, 121.10), 20);
        // Well clear of it, long
        let around = straight(Coordinate::new(14.40, 121.07), Coordinate::new(14.40, 121.10), 20);
        vec![
            RouteCandidate::new(through, 600.0, 3300.0),
            RouteCandidate::new(around, 1500.0, 9000.0),
        ]
    }

    #[test]
    fn test_safest_prefers_route_around_flood() {
        let routes = assess_candidates(candidates(), &flooded_node(), DEFAULT_CUTOFF_KM, RoutePriority::Safest);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].duration(), 1500.0);
        assert!(routes[0].safety_score() > routes[1].safety_score());
        assert!(routes[1].assessment.has_flood);
        assert!(routes[0].assessment.insight.starts_with("This route prioritizes safety"));
    }

    #[test]
    fn test_fastest_keeps_flooded_route_first_with_warning() {
        let routes = assess_candidates(candidates(), &flooded_node(), DEFAULT_CUTOFF_KM, RoutePriority::Fastest);
        assert_eq!(routes[0].duration(), 600.0);
        assert_eq!(
            routes[0].assessment.insight,
            "This is the fastest route (10 min). Warning: This route passes through flood-prone areas."
        );
    }

    #[test]
    fn test_plan_carries_recommendation_and_source() {
        let plan = build_plan(
            candidates(),
            &flooded_node(),
            DEFAULT_CUTOFF_KM,
            RoutePriority::Balanced,
            SnapshotSource::Fallback,
        )
        .unwrap();

        assert_eq!(plan.routes.len(), 2);
        assert_eq!(plan.recommended, plan.routes[0]);
        assert_eq!(plan.snapshot_source, SnapshotSource::Fallback);
        assert!(plan.recommendation.starts_with("Due to severe flooding"));
    }

    #[test]
    fn test_plan_rejects_empty_candidates() {
        let err = build_plan(Vec::new(), &[], DEFAULT_CUTOFF_KM, RoutePriority::Fastest, SnapshotSource::Store)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "routes"));
    }

    #[test]
    fn test_require_waypoint() {
        assert!(matches!(
            require_waypoint("origin", None),
            Err(AppError::Validation { ref field, .. }) if field == "origin"
        ));
        assert!(require_waypoint("destination", Some(Waypoint::Address("   ".to_string()))).is_err());
        assert!(require_waypoint("origin", Some(Waypoint::Coordinate(Coordinate::new(91.0, 0.0)))).is_err());
        assert!(require_waypoint("origin", Some(Waypoint::Address("Biñan, Laguna".to_string()))).is_ok());
    }

    #[test]
    fn test_plan_request_parses_mixed_waypoints() {
        let request: PlanRouteRequest = serde_json::from_value(serde_json::json!({
            "origin": {"lat": 14.33, "lng": 121.08},
            "destination": "Santa Rosa, Laguna"
        }))
        .unwrap();
        assert_eq!(request.priority, RoutePriority::Balanced);
        assert!(matches!(request.origin, Some(Waypoint::Coordinate(_))));
        assert!(matches!(request.destination, Some(Waypoint::Address(_))));
    }
}
