//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current weather endpoint

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{Coordinate, WeatherConditions};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Current weather conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub timestamp: DateTime<Utc>,
    pub location_name: String,
    pub temperature_celsius: f64,
    pub humidity_percent: i32,
    pub pressure_hpa: i32,
    pub wind_speed_mps: f64,
    pub weather_condition: String,
    pub weather_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_1h_mm: Option<f64>,
}

impl CurrentWeather {
    pub fn conditions(&self) -> WeatherConditions {
        WeatherConditions {
            rain_1h_mm: self.rain_1h_mm,
            humidity_percent: self.humidity_percent,
            pressure_hpa: self.pressure_hpa,
        }
    }
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    main: OWMMain,
    wind: OWMWind,
    rain: Option<OWMRain>,
    dt: i64,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    pressure: i32,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a client from configuration; `None` when no API key is set
    pub fn from_config(config: &WeatherConfig) -> AppResult<Option<Self>> {
        if config.api_key.is_empty() {
            return Ok(None);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Weather HTTP client: {}", e)))?;

        Ok(Some(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
        }))
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_weather(&self, location: &Coordinate) -> AppResult<CurrentWeather> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, location.lat, location.lng, self.api_key
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!("Weather API request failed: {}", e.without_url());
            AppError::WeatherServiceUnavailable
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Weather API error: {} - {}", status, body);
            return Err(AppError::WeatherServiceUnavailable);
        }

        let data: OWMCurrentResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse weather response: {}", e)))?;

        Ok(convert_current_response(data))
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_current_response(data: OWMCurrentResponse) -> CurrentWeather {
    let weather = data.weather.first();

    CurrentWeather {
        timestamp: DateTime::from_timestamp(data.dt, 0).unwrap_or_else(Utc::now),
        location_name: data.name,
        temperature_celsius: data.main.temp,
        humidity_percent: data.main.humidity,
        pressure_hpa: data.main.pressure,
        wind_speed_mps: data.wind.speed,
        weather_condition: weather.map(|w| w.main.clone()).unwrap_or_default(),
        weather_description: weather.map(|w| w.description.clone()).unwrap_or_default(),
        rain_1h_mm: data.rain.and_then(|r| r.one_hour),
    }
}
