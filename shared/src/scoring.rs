//! Route safety scoring

use crate::models::{RiskLevel, RouteAssessment, RouteCandidate};
use crate::risk::RiskLookup;
use crate::types::Coordinate;

/// Upper bound on points sampled along a route
pub const MAX_ROUTE_SAMPLES: usize = 10;

/// Evenly spaced sample points along a polyline
///
/// Stride is `max(1, n / 10)`; every point at a multiple of the stride is
/// taken, so short routes are sampled in full.
pub fn sample_points(geometry: &[Coordinate]) -> impl Iterator<Item = &Coordinate> {
    let stride = (geometry.len() / MAX_ROUTE_SAMPLES).max(1);
    geometry.iter().step_by(stride)
}

/// Convert an average risk into the 1-10 safety score
pub fn safety_score(average_risk: f64) -> u8 {
    (10.0 - average_risk * 10.0).round().clamp(1.0, 10.0) as u8
}

/// Score a route against the current flood observations
///
/// A route with no geometry has no samples and is reported with zero
/// average risk, i.e. a safety score of 10.
pub fn assess_route(candidate: &RouteCandidate, lookup: &RiskLookup<'_>) -> RouteAssessment {
    let mut total_risk = 0.0;
    let mut sampled_points = 0;
    let mut high_risk_points = 0;

    for point in sample_points(&candidate.geometry) {
        let risk = lookup.risk_at(point);
        total_risk += risk.score;
        sampled_points += 1;
        if risk.risk == RiskLevel::High {
            high_risk_points += 1;
        }
    }

    let average_risk = if sampled_points == 0 {
        0.0
    } else {
        total_risk / sampled_points as f64
    };

    RouteAssessment {
        safety_score: safety_score(average_risk),
        has_flood: high_risk_points > 0,
        risk_level: RiskLevel::from_score(average_risk),
        average_risk,
        sampled_points,
        high_risk_points,
        insight: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FloodObservation, Severity};

    fn line(n: usize) -> Vec<Coordinate> {
        (0..n).map(|i| Coordinate::new(0.0, i as f64 * 0.0001)).collect()
    }

    #[test]
    fn test_sample_count() {
        assert_eq!(sample_points(&line(0)).count(), 0);
        assert_eq!(sample_points(&line(1)).count(), 1);
        assert_eq!(sample_points(&line(9)).count(), 9);
        assert_eq!(sample_points(&line(10)).count(), 10);
        // stride 2 over 25 points: 0, 2, ..., 24
        assert_eq!(sample_points(&line(25)).count(), 13);
        assert_eq!(sample_points(&line(100)).count(), 10);
    }

    #[test]
    fn test_safety_score_bounds() {
        assert_eq!(safety_score(0.0), 10);
        assert_eq!(safety_score(0.1), 9);
        assert_eq!(safety_score(0.9), 1);
        assert_eq!(safety_score(1.0), 1);
        assert_eq!(safety_score(0.44), 6);
    }

    #[test]
    fn test_empty_route_is_max_safe() {
        let candidate = RouteCandidate::new(Vec::new(), 600.0, 5000.0);
        let observations = vec![FloodObservation::new(
            "A",
            Coordinate::new(0.0, 0.0),
            Severity::High,
        )];
        let assessment = assess_route(&candidate, &RiskLookup::new(&observations));
        assert_eq!(assessment.safety_score, 10);
        assert_eq!(assessment.sampled_points, 0);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert!(!assessment.has_flood);
    }

    #[test]
    fn test_route_through_high_observation() {
        let geometry = vec![Coordinate::new(0.0, 0.0); 20];
        let observations = vec![FloodObservation::new(
            "A",
            Coordinate::new(0.0, 0.0),
            Severity::High,
        )];
        let assessment = assess_route(
            &RouteCandidate::new(geometry, 60.0, 100.0),
            &RiskLookup::new(&observations),
        );
        assert_eq!(assessment.safety_score, 1);
        assert!(assessment.has_flood);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.high_risk_points, assessment.sampled_points);
    }

    #[test]
    fn test_route_without_data_scores_nine() {
        let assessment = assess_route(&RouteCandidate::new(line(30), 60.0, 100.0), &RiskLookup::new(&[]));
        assert_eq!(assessment.safety_score, 9);
        assert!((assessment.average_risk - 0.1).abs() < 1e-12);
        assert!(!assessment.has_flood);
    }
}
