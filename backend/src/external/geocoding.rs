//! Geocoding client (Nominatim search API)

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::Coordinate;

use crate::config::GeocodingConfig;
use crate::error::{AppError, AppResult};

/// Resolves free-text addresses to coordinates
#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

/// One Nominatim search hit; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl GeocodingClient {
    pub fn from_config(config: &GeocodingConfig) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Geocoding HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve an address to the coordinate of its best match
    pub async fn geocode(&self, address: &str) -> AppResult<Coordinate> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("limit", "1"), ("q", address)])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Geocoding request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalService(format!(
                "Geocoding API error: {}",
                status
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Invalid geocoding response: {}", e.without_url())))?;

        first_coordinate(&places).ok_or_else(|| AppError::GeocodingFailed(address.to_string()))
    }
}

fn first_coordinate(places: &[NominatimPlace]) -> Option<Coordinate> {
    let place = places.first()?;
    let lat = place.lat.parse().ok()?;
    let lng = place.lon.parse().ok()?;
    Some(Coordinate::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_coordinate_parses_strings() {
        let places: Vec<NominatimPlace> = serde_json::from_str(
            r#"[{"lat": "14.3420", "lon": "121.0803", "display_name": "Biñan"}]"#,
        )
        .unwrap();
        assert_eq!(first_coordinate(&places), Some(Coordinate::new(14.342, 121.0803)));
    }

    #[test]
    fn test_first_coordinate_empty_or_malformed() {
        assert_eq!(first_coordinate(&[]), None);
        let places = vec![NominatimPlace {
            lat: "north".to_string(),
            lon: "121.0".to_string(),
        }];
        assert_eq!(first_coordinate(&places), None);
    }
}
