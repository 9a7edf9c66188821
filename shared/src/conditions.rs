//! Area-wide flood conditions and route advice

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{FloodObservation, RiskLevel, RoutePriority, Severity};

/// Readings newer than this count as live sensor data
pub const RECENT_DATA_WINDOW_SECS: i64 = 120;

/// Summary of the current flood situation across all observations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AreaConditions {
    /// Highest reported severity; no data and unknown labels count as low
    pub severity: RiskLevel,
    pub observation_count: usize,
}

/// Highest severity currently reported
pub fn current_conditions(observations: &[FloodObservation]) -> AreaConditions {
    let severity = observations
        .iter()
        .map(|obs| match obs.severity {
            Severity::High => RiskLevel::High,
            Severity::Moderate => RiskLevel::Moderate,
            Severity::Low | Severity::Unknown => RiskLevel::Low,
        })
        .max()
        .unwrap_or(RiskLevel::Low);

    AreaConditions {
        severity,
        observation_count: observations.len(),
    }
}

/// Advice for the chosen priority under the current conditions
pub fn route_recommendation(conditions: &AreaConditions, priority: RoutePriority) -> &'static str {
    match (conditions.severity, priority) {
        (RiskLevel::High, _) => {
            "Due to severe flooding, we strongly recommend using the safest route option."
        }
        (RiskLevel::Moderate, RoutePriority::Fastest) => {
            "Fastest route available, but includes areas with moderate flood risk."
        }
        (RiskLevel::Moderate, RoutePriority::Safest) => {
            "This route completely avoids all flood-prone areas but takes longer."
        }
        (RiskLevel::Moderate, RoutePriority::Balanced) => {
            "Balanced route avoids most flood-prone areas with reasonable travel time."
        }
        (RiskLevel::Low, RoutePriority::Fastest) => {
            "Fastest route recommended - minimal flooding reported in the area."
        }
        (RiskLevel::Low, RoutePriority::Safest) => {
            "Safest route selected, though minimal flooding is reported."
        }
        (RiskLevel::Low, RoutePriority::Balanced) => {
            "Balanced route is optimal given current conditions."
        }
    }
}

/// Whether any observation was reported within `window` of `now`
pub fn has_recent_data(observations: &[FloodObservation], now: DateTime<Utc>, window: Duration) -> bool {
    observations
        .iter()
        .filter_map(|obs| obs.timestamp)
        .any(|ts| now.signed_duration_since(ts) < window)
}
