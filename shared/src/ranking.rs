//! Route ordering by user priority

use std::cmp::Ordering;

use crate::models::{AssessedRoute, RoutePriority};

/// Weighted score used by the balanced priority: one safety point is worth
/// five minutes of travel.
pub fn balanced_score(safety_score: u8, duration_secs: f64) -> f64 {
    f64::from(safety_score) * 5.0 - duration_secs / 60.0
}

fn compare(a: &AssessedRoute, b: &AssessedRoute, priority: RoutePriority) -> Ordering {
    match priority {
        RoutePriority::Fastest => a.duration().total_cmp(&b.duration()),
        RoutePriority::Safest => b.safety_score().cmp(&a.safety_score()),
        RoutePriority::Balanced => {
            let a_score = balanced_score(a.safety_score(), a.duration());
            let b_score = balanced_score(b.safety_score(), b.duration());
            b_score.total_cmp(&a_score)
        }
    }
}

/// Order routes in place, best first. Ties keep their original order and no
/// route is ever dropped.
pub fn rank_routes(routes: &mut [AssessedRoute], priority: RoutePriority) {
    routes.sort_by(|a, b| compare(a, b, priority));
}
