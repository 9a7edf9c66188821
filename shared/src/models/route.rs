//! Route candidate and assessment models

use serde::{Deserialize, Serialize};

use super::flood::RiskLevel;
use crate::types::Coordinate;

/// User-selected trade-off between travel time and flood exposure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoutePriority {
    Fastest,
    Safest,
    #[default]
    Balanced,
}

impl std::str::FromStr for RoutePriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fastest" => Ok(RoutePriority::Fastest),
            "safest" => Ok(RoutePriority::Safest),
            "balanced" => Ok(RoutePriority::Balanced),
            other => Err(format!("unknown route priority: {}", other)),
        }
    }
}

impl std::fmt::Display for RoutePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutePriority::Fastest => write!(f, "fastest"),
            RoutePriority::Safest => write!(f, "safest"),
            RoutePriority::Balanced => write!(f, "balanced"),
        }
    }
}

/// A drivable path returned by the routing provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteCandidate {
    pub geometry: Vec<Coordinate>,
    /// Total travel time in seconds
    pub duration: f64,
    /// Total length in metres
    pub distance: f64,
}

impl RouteCandidate {
    pub fn new(geometry: Vec<Coordinate>, duration: f64, distance: f64) -> Self {
        Self {
            geometry,
            duration,
            distance,
        }
    }
}

/// Flood exposure of a single route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteAssessment {
    /// 1 (most exposed) to 10 (safest)
    pub safety_score: u8,
    /// True when at least one sampled point is HIGH risk
    pub has_flood: bool,
    pub risk_level: RiskLevel,
    pub average_risk: f64,
    pub sampled_points: usize,
    pub high_risk_points: usize,
    #[serde(default)]
    pub insight: String,
}

/// A candidate together with its assessment, as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessedRoute {
    #[serde(flatten)]
    pub candidate: RouteCandidate,
    #[serde(flatten)]
    pub assessment: RouteAssessment,
}

impl AssessedRoute {
    pub fn duration(&self) -> f64 {
        self.candidate.duration
    }

    pub fn safety_score(&self) -> u8 {
        self.assessment.safety_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parse() {
        assert_eq!("fastest".parse::<RoutePriority>(), Ok(RoutePriority::Fastest));
        assert_eq!("SAFEST".parse::<RoutePriority>(), Ok(RoutePriority::Safest));
        assert_eq!("balanced".parse::<RoutePriority>(), Ok(RoutePriority::Balanced));
        assert!("scenic".parse::<RoutePriority>().is_err());
    }

    #[test]
    fn test_priority_default_is_balanced() {
        assert_eq!(RoutePriority::default(), RoutePriority::Balanced);
    }

    #[test]
    fn test_assessed_route_serializes_flat() {
        let route = AssessedRoute {
            candidate: RouteCandidate::new(vec![Coordinate::new(1.0, 2.0)], 300.0, 1200.0),
            assessment: RouteAssessment {
                safety_score: 9,
                has_flood: false,
                risk_level: RiskLevel::Low,
                average_risk: 0.1,
                sampled_points: 1,
                high_risk_points: 0,
                insight: String::new(),
            },
        };
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["duration"], 300.0);
        assert_eq!(json["safety_score"], 9);
        assert_eq!(json["risk_level"], "LOW");
    }
}
