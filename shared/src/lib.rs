//! Shared types and flood-safety logic for the FloodSafe platform
//!
//! This crate contains the domain models and the pure computations shared
//! between the backend, the browser (via WASM), and other components:
//! flood risk lookup, route safety scoring, route ranking, short-horizon
//! flood prediction and advice text.

pub mod conditions;
pub mod geo;
pub mod insight;
pub mod models;
pub mod polyline;
pub mod prediction;
pub mod ranking;
pub mod risk;
pub mod scoring;
pub mod types;
pub mod validation;

pub use conditions::*;
pub use geo::*;
pub use insight::*;
pub use models::*;
pub use polyline::{decode_polyline, PolylineError};
pub use prediction::*;
pub use ranking::*;
pub use risk::*;
pub use scoring::*;
pub use types::*;
pub use validation::*;
