//! Validation utilities for FloodSafe inputs

use crate::types::Coordinate;

/// Largest search radius accepted for nearby-flood queries, in metres
pub const MAX_NEARBY_RADIUS_M: u32 = 50_000;

/// Validate a latitude in decimal degrees
pub fn validate_latitude(lat: f64) -> Result<(), &'static str> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err("Latitude must be between -90 and 90");
    }
    Ok(())
}

/// Validate a longitude in decimal degrees
pub fn validate_longitude(lng: f64) -> Result<(), &'static str> {
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate that a coordinate is a finite WGS84 position
pub fn validate_coordinate(coordinate: &Coordinate) -> Result<(), &'static str> {
    validate_latitude(coordinate.lat)?;
    validate_longitude(coordinate.lng)
}

/// Validate a free-text address used as a route endpoint
pub fn validate_address(address: &str) -> Result<(), &'static str> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err("Address must not be empty");
    }
    if trimmed.len() > 300 {
        return Err("Address must be at most 300 characters");
    }
    Ok(())
}

/// Validate a nearby-flood search radius
pub fn validate_radius(radius_m: u32) -> Result<(), &'static str> {
    if radius_m == 0 || radius_m > MAX_NEARBY_RADIUS_M {
        return Err("Radius must be between 1 and 50000 metres");
    }
    Ok(())
}
