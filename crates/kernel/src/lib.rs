//! City kernel: world state, construction registry, random source, animation
//! clock and the one-shot engine bootstrap.
//!
//! # Invariants
//! - The construction registry is populated before any world is loaded.
//! - An [`EngineContext`] exists only after a successful bootstrap.
//! - All world mutations flow through explicit operations.

pub mod clock;
pub mod config;
pub mod context;
pub mod registry;
pub mod rng;
pub mod world;

pub use clock::AnimationClock;
pub use config::{ConfigError, EngineConfig};
pub use context::{BootstrapError, EngineContext, StartupStep};
pub use registry::{ConstructionGroup, ConstructionRegistry, ConstructionType, RegistryError};
pub use rng::SimRng;
pub use world::{Placement, World, WorldError};
