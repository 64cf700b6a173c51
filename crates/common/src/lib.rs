//! Shared value types for the city simulation core.

pub mod types;

pub use types::{CityId, ConstructionTypeId, ParseSpeedError, SimulationSpeed, TileCoord};
