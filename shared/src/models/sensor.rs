//! Flood sensor reading models

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::flood::{FloodObservation, Severity};
use crate::types::Coordinate;

/// A stored reading from a field sensor node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: Uuid,
    pub node_id: String,
    pub temperature: Option<Decimal>,
    pub humidity: Option<Decimal>,
    pub water_level: Decimal,
    pub severity: Severity,
    pub flood_status: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl SensorReading {
    pub fn location(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }

    /// Convert to an observation; readings without a position are not usable
    /// for risk lookups.
    pub fn to_observation(&self) -> Option<FloodObservation> {
        let location = self.location()?;
        Some(FloodObservation {
            node_id: self.node_id.clone(),
            location,
            severity: self.severity,
            water_level: self.water_level.to_f64(),
            timestamp: Some(self.timestamp),
        })
    }
}

/// Input for inserting or replacing the latest reading of a node
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertSensorReading {
    #[validate(length(min = 1, max = 50, message = "node_id must be 1-50 characters"))]
    pub node_id: String,
    #[validate(custom = "validate_temperature")]
    pub temperature: Option<Decimal>,
    #[validate(custom = "validate_humidity")]
    pub humidity: Option<Decimal>,
    #[validate(custom = "validate_water_level")]
    pub water_level: Decimal,
    pub severity: Option<Severity>,
    #[validate(length(max = 20, message = "flood_status must be at most 20 characters"))]
    pub flood_status: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
}

// Bounds follow the NUMERIC precision of the sensor_data columns.

fn decimal_within(
    value: &Decimal,
    min: Decimal,
    max: Decimal,
    message: &'static str,
) -> Result<(), ValidationError> {
    if *value < min || *value > max {
        let mut error = ValidationError::new("range");
        error.message = Some(Cow::Borrowed(message));
        return Err(error);
    }
    Ok(())
}

fn validate_temperature(value: &Decimal) -> Result<(), ValidationError> {
    decimal_within(
        value,
        Decimal::new(-99_999, 2),
        Decimal::new(99_999, 2),
        "temperature must be between -999.99 and 999.99",
    )
}

fn validate_humidity(value: &Decimal) -> Result<(), ValidationError> {
    decimal_within(
        value,
        Decimal::ZERO,
        Decimal::ONE_HUNDRED,
        "humidity must be between 0 and 100",
    )
}

fn validate_water_level(value: &Decimal) -> Result<(), ValidationError> {
    decimal_within(
        value,
        Decimal::new(-99_999_999, 2),
        Decimal::new(99_999_999, 2),
        "water_level must be between -999999.99 and 999999.99",
    )
}

/// A reading found near a query point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyFlood {
    pub node_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub water_level: Decimal,
    pub severity: Severity,
    /// Distance from the query point, rounded to whole metres
    pub distance: u32,
    pub timestamp: DateTime<Utc>,
}
