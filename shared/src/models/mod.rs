//! Domain models for the FloodSafe platform

mod flood;
mod route;
mod sensor;
mod weather;

pub use flood::*;
pub use route::*;
pub use sensor::*;
pub use weather::*;
