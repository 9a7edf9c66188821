//! Weather-based flood check on live conditions

use serde::Serialize;
use shared::{validate_latitude, validate_longitude, weather_flood_risk, Coordinate, RiskLevel};

use crate::error::{AppError, AppResult};
use crate::external::weather::{CurrentWeather, WeatherClient};

#[derive(Clone)]
pub struct WeatherService {
    weather_client: Option<WeatherClient>,
}

/// Flood risk derived from current weather at a location
#[derive(Debug, Clone, Serialize)]
pub struct WeatherFloodReport {
    pub location: Coordinate,
    pub risk: RiskLevel,
    pub factors: Vec<String>,
    pub weather: CurrentWeather,
}

impl WeatherService {
    pub fn new(weather_client: Option<WeatherClient>) -> Self {
        Self { weather_client }
    }

    pub fn is_configured(&self) -> bool {
        self.weather_client.is_some()
    }

    /// Fetch current weather and evaluate its flood risk
    pub async fn flood_risk(&self, location: Coordinate) -> AppResult<WeatherFloodReport> {
        validate_latitude(location.lat).map_err(|msg| AppError::validation("lat", msg))?;
        validate_longitude(location.lng).map_err(|msg| AppError::validation("lng", msg))?;

        let client = self.weather_client.as_ref().ok_or_else(|| {
            tracing::warn!("Weather flood check requested but no API key is configured");
            AppError::WeatherServiceUnavailable
        })?;

        let weather = client.get_current_weather(&location).await?;
        Ok(build_report(location, weather))
    }
}

fn build_report(location: Coordinate, weather: CurrentWeather) -> WeatherFloodReport {
    let assessment = weather_flood_risk(&weather.conditions());
    WeatherFloodReport {
        location,
        risk: assessment.risk,
        factors: assessment.factors,
        weather,
    }
}
