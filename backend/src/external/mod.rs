//! External API integrations

pub mod geocoding;
pub mod routing;
pub mod weather;

pub use geocoding::GeocodingClient;
pub use routing::{RoutingClient, Waypoint};
pub use weather::WeatherClient;
