//! Flood observation models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Coordinate;

/// Reported severity of a flood observation
///
/// Any value other than LOW, MODERATE or HIGH is kept as `Unknown`
/// so that a bad sensor label never rejects the whole feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum Severity {
    Low,
    Moderate,
    High,
    #[default]
    Unknown,
}

impl Severity {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "LOW" => Severity::Low,
            "MODERATE" => Severity::Moderate,
            "HIGH" => Severity::High,
            _ => Severity::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Moderate => "MODERATE",
            Severity::High => "HIGH",
            Severity::Unknown => "UNKNOWN",
        }
    }

    /// Base risk score contributed by an observation of this severity
    pub fn base_score(&self) -> f64 {
        match self {
            Severity::High => 0.9,
            Severity::Moderate => 0.5,
            Severity::Low => 0.2,
            Severity::Unknown => 0.1,
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        Severity::parse(&value)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative risk classification of a continuous risk score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Lower bound of the MODERATE band
    pub const MODERATE_THRESHOLD: f64 = 0.3;
    /// Lower bound of the HIGH band
    pub const HIGH_THRESHOLD: f64 = 0.7;

    /// Classify a risk score. The same scale is used for single points and
    /// for whole routes.
    pub fn from_score(score: f64) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            RiskLevel::High
        } else if score >= Self::MODERATE_THRESHOLD {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Moderate => write!(f, "MODERATE"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// A located flood reading as consumed by the risk lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FloodObservation {
    pub node_id: String,
    pub location: Coordinate,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl FloodObservation {
    pub fn new(node_id: impl Into<String>, location: Coordinate, severity: Severity) -> Self {
        Self {
            node_id: node_id.into(),
            location,
            severity,
            water_level: None,
            timestamp: None,
        }
    }
}

/// Risk at a single point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointRisk {
    pub risk: RiskLevel,
    pub score: f64,
}
