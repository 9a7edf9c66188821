//! HTTP request handlers

pub mod flood;
pub mod health;
pub mod prediction;
pub mod routing;
pub mod sensor;
pub mod weather;

pub use flood::*;
pub use health::*;
pub use prediction::*;
pub use routing::*;
pub use sensor::*;
pub use weather::*;

use shared::Coordinate;

use crate::error::{AppError, AppResult};

/// Require both halves of a `lat`/`lng` query pair
pub(crate) fn required_coordinate(lat: Option<f64>, lng: Option<f64>) -> AppResult<Coordinate> {
    let lat = lat.ok_or_else(|| AppError::validation("lat", "lat is required"))?;
    let lng = lng.ok_or_else(|| AppError::validation("lng", "lng is required"))?;
    shared::validate_latitude(lat).map_err(|msg| AppError::validation("lat", msg))?;
    shared::validate_longitude(lng).map_err(|msg| AppError::validation("lng", msg))?;
    Ok(Coordinate::new(lat, lng))
}
