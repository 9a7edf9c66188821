//! Configuration management for the FloodSafe server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FLOODSAFE_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Flood snapshot configuration
    pub flood: FloodConfig,

    /// Routing provider configuration
    pub routing: RoutingConfig,

    /// Geocoding provider configuration
    pub geocoding: GeocodingConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FloodConfig {
    /// Seconds between snapshot refreshes
    pub refresh_interval_secs: u64,

    /// Upper bound on a single snapshot fetch
    pub fetch_timeout_secs: u64,

    /// Observations farther than this do not affect a point's risk
    pub cutoff_km: f64,
}

/// Which routing provider produces route candidates
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoutingProviderKind {
    Osrm,
    Google,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoutingConfig {
    /// Provider used for route candidates
    pub provider: RoutingProviderKind,

    /// OSRM server base URL
    pub osrm_base_url: String,

    /// Google Maps API base URL
    pub google_base_url: String,

    /// Google Maps API key (required when provider = google)
    pub google_api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Nominatim base URL
    pub base_url: String,

    /// User-Agent sent to Nominatim, which rejects anonymous clients
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FLOODSAFE_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3001)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("flood.refresh_interval_secs", 300)?
            .set_default("flood.fetch_timeout_secs", 5)?
            .set_default("flood.cutoff_km", shared::DEFAULT_CUTOFF_KM)?
            .set_default("routing.provider", "osrm")?
            .set_default("routing.osrm_base_url", "https://router.project-osrm.org")?
            .set_default("routing.google_base_url", "https://maps.googleapis.com/maps/api")?
            .set_default("routing.google_api_key", "")?
            .set_default("routing.timeout_secs", 10)?
            .set_default("geocoding.base_url", "https://nominatim.openstreetmap.org")?
            .set_default("geocoding.user_agent", "floodsafe-server")?
            .set_default("geocoding.timeout_secs", 10)?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.api_key", "")?
            .set_default("weather.timeout_secs", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FLOODSAFE_ prefix)
            .add_source(
                Environment::with_prefix("FLOODSAFE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for FloodConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 300,
            fetch_timeout_secs: 5,
            cutoff_km: shared::DEFAULT_CUTOFF_KM,
        }
    }
}
