//! Weather-driven flood risk

use serde::{Deserialize, Serialize};

use super::flood::RiskLevel;

/// The subset of current weather that drives the flood check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherConditions {
    /// Rainfall over the last hour in millimetres
    pub rain_1h_mm: Option<f64>,
    pub humidity_percent: i32,
    pub pressure_hpa: i32,
}

/// Result of the weather flood check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherFloodRisk {
    pub risk: RiskLevel,
    pub factors: Vec<String>,
}

/// Classify flood risk from heavy rain, saturated air and low pressure
pub fn weather_flood_risk(weather: &WeatherConditions) -> WeatherFloodRisk {
    let mut risk = RiskLevel::Low;
    let mut factors = Vec::new();

    let rainfall = weather.rain_1h_mm.unwrap_or(0.0);
    if rainfall > 10.0 {
        risk = RiskLevel::High;
        factors.push("Heavy rainfall".to_string());
    } else if rainfall > 5.0 {
        risk = RiskLevel::Moderate;
        factors.push("Moderate rainfall".to_string());
    }

    if weather.humidity_percent > 90 {
        risk = risk.max(RiskLevel::Moderate);
        factors.push("High humidity".to_string());
    }

    if weather.pressure_hpa < 1000 {
        risk = risk.max(RiskLevel::Moderate);
        factors.push("Low pressure system".to_string());
    }

    WeatherFloodRisk { risk, factors }
}
