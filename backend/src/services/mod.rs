//! Business logic services for the FloodSafe server

pub mod planner;
pub mod sensor;
pub mod snapshot;
pub mod weather;

pub use planner::RoutePlanner;
pub use sensor::SensorService;
pub use snapshot::{SnapshotSource, SnapshotStore};
pub use weather::WeatherService;
