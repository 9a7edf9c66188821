//! In-memory flood snapshot shared by every risk computation
//!
//! Request handlers only read the snapshot. A single background task
//! replaces it on an interval; a failed refresh never leaves it empty.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{Coordinate, FloodObservation, RiskLookup, Severity};
use tokio::sync::{RwLock, RwLockReadGuard};
use tokio::task::JoinHandle;

use crate::config::FloodConfig;
use crate::error::{AppError, AppResult};
use crate::services::sensor::SensorService;

/// Where the current observations came from
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotSource {
    /// Fresh data from the sensor store
    Store,
    /// Last good store data, kept after a failed refresh
    Cached,
    /// Built-in default list; the store has never answered
    Fallback,
}

impl std::fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotSource::Store => write!(f, "store"),
            SnapshotSource::Cached => write!(f, "cached"),
            SnapshotSource::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FloodSnapshot {
    pub observations: Vec<FloodObservation>,
    pub source: SnapshotSource,
    pub refreshed_at: DateTime<Utc>,
}

impl FloodSnapshot {
    pub fn fallback() -> Self {
        Self {
            observations: default_observations(),
            source: SnapshotSource::Fallback,
            refreshed_at: Utc::now(),
        }
    }

    pub fn lookup(&self, cutoff_km: f64) -> RiskLookup<'_> {
        RiskLookup::new(&self.observations).with_cutoff_km(cutoff_km)
    }
}

/// Observations used until the sensor store has answered once
pub fn default_observations() -> Vec<FloodObservation> {
    let mut node = FloodObservation::new("NODE_001", Coordinate::new(14.345, 121.085), Severity::High);
    node.water_level = Some(5.0);
    vec![node]
}

/// Shared handle to the current snapshot
#[derive(Clone)]
pub struct SnapshotStore {
    inner: Arc<RwLock<FloodSnapshot>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    /// Start from the fallback snapshot
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(FloodSnapshot::fallback())),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, FloodSnapshot> {
        self.inner.read().await
    }

    pub async fn current(&self) -> FloodSnapshot {
        self.inner.read().await.clone()
    }

    /// Install the outcome of a fetch and return the resulting source
    pub async fn apply(&self, fetched: AppResult<Vec<FloodObservation>>) -> SnapshotSource {
        let mut snapshot = self.inner.write().await;

        match fetched {
            Ok(observations) => {
                tracing::debug!(count = observations.len(), "Flood snapshot refreshed");
                *snapshot = FloodSnapshot {
                    observations,
                    source: SnapshotSource::Store,
                    refreshed_at: Utc::now(),
                };
            }
            Err(e) => match snapshot.source {
                SnapshotSource::Store | SnapshotSource::Cached => {
                    tracing::warn!("Flood snapshot refresh failed, keeping cached data: {}", e);
                    snapshot.source = SnapshotSource::Cached;
                }
                SnapshotSource::Fallback => {
                    tracing::warn!("Flood snapshot refresh failed, using default data: {}", e);
                    *snapshot = FloodSnapshot::fallback();
                }
            },
        }

        snapshot.source
    }

    /// Run one bounded fetch and install its result
    pub async fn refresh_with<F, Fut>(&self, fetch: F, timeout: Duration) -> SnapshotSource
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Vec<FloodObservation>>>,
    {
        let fetched = match tokio::time::timeout(timeout, fetch()).await {
            Ok(result) => result,
            Err(_) => Err(AppError::ExternalService(format!(
                "flood data fetch exceeded {}s",
                timeout.as_secs()
            ))),
        };
        self.apply(fetched).await
    }

    /// Refresh from the sensor store
    pub async fn refresh(&self, sensors: &SensorService, timeout: Duration) -> SnapshotSource {
        self.refresh_with(|| fetch_observations(sensors), timeout).await
    }
}

async fn fetch_observations(sensors: &SensorService) -> AppResult<Vec<FloodObservation>> {
    let readings = sensors.located().await?;
    Ok(readings.iter().filter_map(|r| r.to_observation()).collect())
}

/// Refresh immediately, then on every interval tick
pub fn spawn_refresh_loop(
    store: SnapshotStore,
    sensors: SensorService,
    config: FloodConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let timeout = Duration::from_secs(config.fetch_timeout_secs);
        let mut interval =
            tokio::time::interval(Duration::from_secs(config.refresh_interval_secs.max(1)));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let source = store.refresh(&sensors, timeout).await;
            tracing::debug!(%source, "Flood snapshot refresh tick");
        }
    })
}
