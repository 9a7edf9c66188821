//! Point flood-risk lookup
//!
//! Risk at a coordinate is taken from the single nearest observation only,
//! attenuated linearly with distance up to a cutoff. There is no
//! interpolation between observations, so risk is discontinuous where two
//! observations of different severity are equidistant.

use crate::geo::haversine_km;
use crate::models::{FloodObservation, PointRisk, RiskLevel};
use crate::types::Coordinate;

/// Observations farther than this contribute nothing
pub const DEFAULT_CUTOFF_KM: f64 = 5.0;

/// Score reported when no observation is within the cutoff
pub const NO_DATA_SCORE: f64 = 0.1;

/// Nearest-neighbour flood risk over a borrowed set of observations
#[derive(Debug, Clone, Copy)]
pub struct RiskLookup<'a> {
    observations: &'a [FloodObservation],
    cutoff_km: f64,
}

impl<'a> RiskLookup<'a> {
    pub fn new(observations: &'a [FloodObservation]) -> Self {
        Self {
            observations,
            cutoff_km: DEFAULT_CUTOFF_KM,
        }
    }

    pub fn with_cutoff_km(mut self, cutoff_km: f64) -> Self {
        self.cutoff_km = cutoff_km;
        self
    }

    pub fn cutoff_km(&self) -> f64 {
        self.cutoff_km
    }

    /// Nearest observation and its distance in kilometres
    pub fn nearest(&self, point: &Coordinate) -> Option<(&'a FloodObservation, f64)> {
        self.observations
            .iter()
            .map(|obs| (obs, haversine_km(point, &obs.location)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Flood risk at a coordinate
    pub fn risk_at(&self, point: &Coordinate) -> PointRisk {
        let Some((nearest, distance_km)) = self.nearest(point) else {
            return no_data();
        };
        if distance_km > self.cutoff_km {
            return no_data();
        }

        let attenuation = 1.0 - (distance_km / self.cutoff_km).min(1.0);
        let score = nearest.severity.base_score() * attenuation;

        PointRisk {
            risk: RiskLevel::from_score(score),
            score,
        }
    }
}

fn no_data() -> PointRisk {
    PointRisk {
        risk: RiskLevel::Low,
        score: NO_DATA_SCORE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn node(id: &str, lat: f64, lng: f64, severity: Severity) -> FloodObservation {
        FloodObservation::new(id, Coordinate::new(lat, lng), severity)
    }

    #[test]
    fn test_no_observations_is_low() {
        let lookup = RiskLookup::new(&[]);
        let risk = lookup.risk_at(&Coordinate::new(14.3, 121.0));
        assert_eq!(risk.risk, RiskLevel::Low);
        assert_eq!(risk.score, NO_DATA_SCORE);
    }

    #[test]
    fn test_on_top_of_high_observation() {
        let observations = vec![node("A", 14.345, 121.085, Severity::High)];
        let risk = RiskLookup::new(&observations).risk_at(&Coordinate::new(14.345, 121.085));
        assert_eq!(risk.risk, RiskLevel::High);
        assert!((risk.score - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_beyond_cutoff_is_no_data() {
        // ~6.7 km north
        let observations = vec![node("A", 14.345, 121.085, Severity::High)];
        let risk = RiskLookup::new(&observations).risk_at(&Coordinate::new(14.405, 121.085));
        assert_eq!(risk.risk, RiskLevel::Low);
        assert_eq!(risk.score, NO_DATA_SCORE);
    }

    #[test]
    fn test_attenuates_with_distance() {
        let observations = vec![node("A", 0.0, 0.0, Severity::High)];
        let lookup = RiskLookup::new(&observations);
        // 0.0225 degrees of latitude is ~2.5 km, half the cutoff
        let risk = lookup.risk_at(&Coordinate::new(0.0225, 0.0));
        let expected = 0.9 * (1.0 - haversine_km(&Coordinate::new(0.0225, 0.0), &Coordinate::new(0.0, 0.0)) / 5.0);
        assert!((risk.score - expected).abs() < 1e-12);
        assert_eq!(risk.risk, RiskLevel::Moderate);
    }

    #[test]
    fn test_moderate_observation_never_reaches_high() {
        let observations = vec![node("A", 0.0, 0.0, Severity::Moderate)];
        let risk = RiskLookup::new(&observations).risk_at(&Coordinate::new(0.0, 0.0));
        assert_eq!(risk.risk, RiskLevel::Moderate);
        assert!((risk.score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_severity_scores_low() {
        let observations = vec![node("A", 0.0, 0.0, Severity::Unknown)];
        let risk = RiskLookup::new(&observations).risk_at(&Coordinate::new(0.0, 0.0));
        assert_eq!(risk.risk, RiskLevel::Low);
        assert!((risk.score - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_only_nearest_counts() {
        // a LOW node right here masks a HIGH node 1 km away
        let observations = vec![
            node("far-high", 0.009, 0.0, Severity::High),
            node("near-low", 0.0, 0.0, Severity::Low),
        ];
        let lookup = RiskLookup::new(&observations);
        let (nearest, _) = lookup.nearest(&Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(nearest.node_id, "near-low");
        assert_eq!(lookup.risk_at(&Coordinate::new(0.0, 0.0)).risk, RiskLevel::Low);
    }

    #[test]
    fn test_custom_cutoff() {
        let observations = vec![node("A", 0.0, 0.0, Severity::High)];
        let lookup = RiskLookup::new(&observations).with_cutoff_km(1.0);
        // ~2.2 km away, outside a 1 km cutoff
        let risk = lookup.risk_at(&Coordinate::new(0.02, 0.0));
        assert_eq!(risk.score, NO_DATA_SCORE);
        assert_eq!(lookup.cutoff_km(), 1.0);
    }
}
