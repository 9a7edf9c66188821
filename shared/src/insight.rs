//! Human-readable route explanations

use crate::models::RoutePriority;

/// Format a duration in seconds as "1h 5m" or "25 min"
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{} min", minutes)
    }
}

/// Explanation shown next to a route for the selected priority
pub fn route_insight(
    priority: RoutePriority,
    safety_score: u8,
    has_flood: bool,
    duration_secs: f64,
) -> String {
    match (priority, has_flood) {
        (RoutePriority::Safest, true) => format!(
            "This route prioritizes safety with a score of {}/10. Some flood risk areas could not be completely avoided.",
            safety_score
        ),
        (RoutePriority::Safest, false) => format!(
            "This route prioritizes safety with a score of {}/10. All major flood-prone areas are avoided.",
            safety_score
        ),
        (RoutePriority::Fastest, true) => format!(
            "This is the fastest route ({}). Warning: This route passes through flood-prone areas.",
            format_duration(duration_secs)
        ),
        (RoutePriority::Fastest, false) => {
            format!("This is the fastest route ({}).", format_duration(duration_secs))
        }
        (RoutePriority::Balanced, true) => "This route balances travel time and safety. Some moderate flood risk areas may be encountered.".to_string(),
        (RoutePriority::Balanced, false) => "This route balances travel time and safety.".to_string(),
    }
}
