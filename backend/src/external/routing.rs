//! Routing provider clients
//!
//! Route candidates come from either an OSRM server (GeoJSON geometry,
//! coordinates only) or the Google Directions API (encoded polylines,
//! accepts free-text addresses).

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{decode_polyline, Coordinate, RouteCandidate};

use crate::config::{RoutingConfig, RoutingProviderKind};
use crate::error::{AppError, AppResult};

/// A route endpoint as given by the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Waypoint {
    Coordinate(Coordinate),
    Address(String),
}

impl Waypoint {
    /// Value for providers that take a single text parameter
    fn as_query(&self) -> String {
        match self {
            Waypoint::Coordinate(c) => format!("{},{}", c.lat, c.lng),
            Waypoint::Address(address) => address.trim().to_string(),
        }
    }
}

/// Routing client for the configured provider
#[derive(Clone)]
pub enum RoutingClient {
    Osrm(OsrmClient),
    Google(GoogleDirectionsClient),
}

impl RoutingClient {
    pub fn from_config(config: &RoutingConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Routing HTTP client: {}", e)))?;

        match config.provider {
            RoutingProviderKind::Osrm => Ok(RoutingClient::Osrm(OsrmClient {
                http_client,
                base_url: config.osrm_base_url.trim_end_matches('/').to_string(),
            })),
            RoutingProviderKind::Google => {
                if config.google_api_key.is_empty() {
                    return Err(AppError::Configuration(
                        "routing.google_api_key is required for the google provider".to_string(),
                    ));
                }
                Ok(RoutingClient::Google(GoogleDirectionsClient {
                    http_client,
                    base_url: config.google_base_url.trim_end_matches('/').to_string(),
                    api_key: config.google_api_key.clone(),
                }))
            }
        }
    }

    /// Whether address endpoints must be geocoded before calling the provider
    pub fn needs_coordinates(&self) -> bool {
        matches!(self, RoutingClient::Osrm(_))
    }

    /// Fetch driving route alternatives between two endpoints
    pub async fn fetch_routes(
        &self,
        origin: &Waypoint,
        destination: &Waypoint,
    ) -> AppResult<Vec<RouteCandidate>> {
        match self {
            RoutingClient::Osrm(client) => {
                let (Waypoint::Coordinate(from), Waypoint::Coordinate(to)) = (origin, destination)
                else {
                    return Err(AppError::Internal(
                        "OSRM requires coordinate endpoints".to_string(),
                    ));
                };
                client.fetch_routes(from, to).await
            }
            RoutingClient::Google(client) => client.fetch_routes(origin, destination).await,
        }
    }
}

// ============================================================================
// OSRM
// ============================================================================

#[derive(Clone)]
pub struct OsrmClient {
    http_client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    duration: f64,
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// `[lng, lat]` pairs
    coordinates: Vec<[f64; 2]>,
}

impl OsrmClient {
    pub async fn fetch_routes(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> AppResult<Vec<RouteCandidate>> {
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson&alternatives=true",
            self.base_url, origin.lng, origin.lat, destination.lng, destination.lat
        );
        tracing::debug!("Requesting OSRM routes: {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::RoutingUnavailable(format!("OSRM request failed: {}", e.without_url())))?;

        // OSRM reports routing failures (e.g. NoRoute) as JSON with a 4xx status
        let data: OsrmResponse = response
            .json()
            .await
            .map_err(|e| AppError::RoutingUnavailable(format!("Invalid OSRM response: {}", e.without_url())))?;

        convert_osrm_response(data)
    }
}

fn convert_osrm_response(data: OsrmResponse) -> AppResult<Vec<RouteCandidate>> {
    if data.code != "Ok" {
        return Err(AppError::RoutingUnavailable(
            data.message.unwrap_or_else(|| format!("OSRM returned {}", data.code)),
        ));
    }

    Ok(data
        .routes
        .into_iter()
        .map(|route| {
            let geometry = route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lng, lat]| Coordinate::new(lat, lng))
                .collect();
            RouteCandidate::new(geometry, route.duration, route.distance)
        })
        .collect())
}

// ============================================================================
// Google Directions
// ============================================================================

#[derive(Clone)]
pub struct GoogleDirectionsClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    overview_polyline: DirectionsPolyline,
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    duration: DirectionsValue,
    distance: DirectionsValue,
}

#[derive(Debug, Deserialize)]
struct DirectionsValue {
    value: f64,
}

impl GoogleDirectionsClient {
    pub async fn fetch_routes(
        &self,
        origin: &Waypoint,
        destination: &Waypoint,
    ) -> AppResult<Vec<RouteCandidate>> {
        let url = format!("{}/directions/json", self.base_url);
        let origin = origin.as_query();
        let destination = destination.as_query();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("origin", origin.as_str()),
                ("destination", destination.as_str()),
                ("mode", "driving"),
                ("alternatives", "true"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::RoutingUnavailable(format!("Directions request failed: {}", e.without_url()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::RoutingUnavailable(format!(
                "Directions API error: {}",
                status
            )));
        }

        let data: DirectionsResponse = response.json().await.map_err(|e| {
            AppError::RoutingUnavailable(format!("Invalid Directions response: {}", e.without_url()))
        })?;

        convert_directions_response(data)
    }
}

fn convert_directions_response(data: DirectionsResponse) -> AppResult<Vec<RouteCandidate>> {
    if data.status != "OK" {
        return Err(AppError::RoutingUnavailable(format!(
            "Directions request failed due to {}{}",
            data.status,
            data.error_message
                .map(|m| format!(": {}", m))
                .unwrap_or_default()
        )));
    }

    data.routes
        .into_iter()
        .map(|route| {
            let geometry = decode_polyline(&route.overview_polyline.points).map_err(|e| {
                AppError::ExternalService(format!("Malformed route polyline: {}", e))
            })?;
            let duration = route.legs.iter().map(|leg| leg.duration.value).sum();
            let distance = route.legs.iter().map(|leg| leg.distance.value).sum();
            Ok(RouteCandidate::new(geometry, duration, distance))
        })
        .collect()
}
