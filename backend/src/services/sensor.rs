//! Sensor store: latest reading per field node

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{
    haversine_m, validate_radius, Coordinate, NearbyFlood, PaginatedResponse, Pagination,
    PaginationMeta, SensorReading, Severity, UpsertSensorReading,
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Default search radius for nearby floods, in metres
pub const DEFAULT_NEARBY_RADIUS_M: u32 = 1000;

/// Sensor service for managing node readings
#[derive(Clone)]
pub struct SensorService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct SensorRow {
    id: Uuid,
    node_id: String,
    temperature: Option<Decimal>,
    humidity: Option<Decimal>,
    water_level: Decimal,
    severity: Option<String>,
    flood_status: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    timestamp: DateTime<Utc>,
}

impl From<SensorRow> for SensorReading {
    fn from(row: SensorRow) -> Self {
        SensorReading {
            id: row.id,
            node_id: row.node_id,
            temperature: row.temperature,
            humidity: row.humidity,
            water_level: row.water_level,
            severity: row
                .severity
                .as_deref()
                .map(Severity::parse)
                .unwrap_or_default(),
            flood_status: row.flood_status,
            latitude: row.latitude,
            longitude: row.longitude,
            timestamp: row.timestamp,
        }
    }
}

const SELECT_COLUMNS: &str = "id, node_id, temperature, humidity, water_level, severity, \
     flood_status, latitude, longitude, timestamp";

impl SensorService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List readings, newest first
    pub async fn list(&self, pagination: Pagination) -> AppResult<PaginatedResponse<SensorReading>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sensor_data")
            .fetch_one(&self.db)
            .await?;

        let rows = sqlx::query_as::<_, SensorRow>(&format!(
            "SELECT {} FROM sensor_data ORDER BY timestamp DESC LIMIT $1 OFFSET $2",
            SELECT_COLUMNS
        ))
        .bind(i64::from(pagination.per_page))
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        let meta = PaginationMeta::new(&pagination, u64::try_from(total).unwrap_or(0));

        Ok(PaginatedResponse {
            data: rows.into_iter().map(SensorReading::from).collect(),
            pagination: meta,
        })
    }

    /// Insert a node's reading, replacing any previous one
    pub async fn upsert(&self, input: UpsertSensorReading) -> AppResult<SensorReading> {
        input.validate()?;

        let severity = input.severity.unwrap_or_default();

        let row = sqlx::query_as::<_, SensorRow>(&format!(
            r#"
            INSERT INTO sensor_data (node_id, temperature, humidity, water_level, severity,
                                     flood_status, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (node_id) DO UPDATE SET
                temperature = EXCLUDED.temperature,
                humidity = EXCLUDED.humidity,
                water_level = EXCLUDED.water_level,
                severity = EXCLUDED.severity,
                flood_status = EXCLUDED.flood_status,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                timestamp = NOW()
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(&input.node_id)
        .bind(input.temperature)
        .bind(input.humidity)
        .bind(input.water_level)
        .bind(severity.as_str())
        .bind(&input.flood_status)
        .bind(input.latitude)
        .bind(input.longitude)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(node_id = %row.node_id, severity = %severity, "Sensor reading stored");

        Ok(row.into())
    }

    /// All readings that carry a position
    pub async fn located(&self) -> AppResult<Vec<SensorReading>> {
        let rows = sqlx::query_as::<_, SensorRow>(&format!(
            "SELECT {} FROM sensor_data \
             WHERE latitude IS NOT NULL AND longitude IS NOT NULL \
             ORDER BY timestamp DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(SensorReading::from).collect())
    }

    /// Readings within `radius_m` metres of `center`, nearest first
    pub async fn nearby(&self, center: Coordinate, radius_m: u32) -> AppResult<Vec<NearbyFlood>> {
        validate_radius(radius_m).map_err(|msg| AppError::validation("radius", msg))?;

        let readings = self.located().await?;
        Ok(nearby_floods(&readings, &center, radius_m))
    }
}

/// Filter readings to those within the radius, nearest first
pub fn nearby_floods(readings: &[SensorReading], center: &Coordinate, radius_m: u32) -> Vec<NearbyFlood> {
    let mut found: Vec<(f64, NearbyFlood)> = readings
        .iter()
        .filter_map(|reading| {
            let location = reading.location()?;
            let distance = haversine_m(center, &location);
            (distance <= f64::from(radius_m)).then(|| {
                (
                    distance,
                    NearbyFlood {
                        node_id: reading.node_id.clone(),
                        latitude: location.lat,
                        longitude: location.lng,
                        water_level: reading.water_level,
                        severity: reading.severity,
                        distance: distance.round() as u32,
                        timestamp: reading.timestamp,
                    },
                )
            })
        })
        .collect();

    found.sort_by(|a, b| a.0.total_cmp(&b.0));
    found.into_iter().map(|(_, flood)| flood).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(node_id: &str, lat: Option<f64>, lng: Option<f64>) -> SensorReading {
        SensorReading {
            id: Uuid::new_v4(),
            node_id: node_id.to_string(),
            temperature: None,
            humidity: None,
            water_level: Decimal::from(3),
            severity: Severity::Moderate,
            flood_status: None,
            latitude: lat,
            longitude: lng,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion_parses_severity() {
        let row = SensorRow {
            id: Uuid::nil(),
            node_id: "NODE_002".to_string(),
            temperature: None,
            humidity: None,
            water_level: Decimal::from(2),
            severity: Some("high".to_string()),
            flood_status: Some("ALERT".to_string()),
            latitude: Some(14.3),
            longitude: Some(121.0),
            timestamp: Utc::now(),
        };
        let reading = SensorReading::from(row);
        assert_eq!(reading.severity, Severity::High);

        let row = SensorRow {
            id: Uuid::nil(),
            node_id: "NODE_003".to_string(),
            temperature: None,
            humidity: None,
            water_level: Decimal::ZERO,
            severity: None,
            flood_status: None,
            latitude: None,
            longitude: None,
            timestamp: Utc::now(),
        };
        assert_eq!(SensorReading::from(row).severity, Severity::Unknown);
    }

    #[test]
    fn test_nearby_floods_sorted_and_filtered() {
        let center = Coordinate::new(14.345, 121.085);
        let readings = vec![
            // ~550 m north
            reading("FAR", Some(14.35), Some(121.085)),
            reading("HERE", Some(14.345), Some(121.085)),
            // ~5.5 km north, outside the radius
            reading("OUT", Some(14.395), Some(121.085)),
            reading("NOWHERE", None, None),
        ];

        let found = nearby_floods(&readings, &center, DEFAULT_NEARBY_RADIUS_M);
        let ids: Vec<&str> = found.iter().map(|f| f.node_id.as_str()).collect();
        assert_eq!(ids, vec!["HERE", "FAR"]);
        assert_eq!(found[0].distance, 0);
        assert!((540..=570).contains(&found[1].distance));
    }

    #[test]
    fn test_nearby_floods_empty() {
        let center = Coordinate::new(0.0, 0.0);
        assert!(nearby_floods(&[], &center, 500).is_empty());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn nearby_results_are_within_radius_and_sorted(
                offsets in prop::collection::vec((-0.05f64..0.05, -0.05f64..0.05), 0..30),
                radius_m in 1u32..5000,
            ) {
                let center = Coordinate::new(14.345, 121.085);
                let readings: Vec<SensorReading> = offsets
                    .iter()
                    .enumerate()
                    .map(|(i, (dlat, dlng))| {
                        reading(&format!("NODE_{:03}", i), Some(center.lat + dlat), Some(center.lng + dlng))
                    })
                    .collect();

                let found = nearby_floods(&readings, &center, radius_m);
                prop_assert!(found.len() <= readings.len());
                for flood in &found {
                    prop_assert!(flood.distance <= radius_m);
                }
                for pair in found.windows(2) {
                    prop_assert!(pair[0].distance <= pair[1].distance);
                }
            }
        }
    }
}
