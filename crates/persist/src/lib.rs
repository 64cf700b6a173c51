//! Persistence: single-file city saves, save-directory setup and the
//! fault-tolerant save/load gateway.
//!
//! # Invariants
//! - Save and load require an [`EngineContext`](lincity_kernel::EngineContext),
//!   so they cannot run before bootstrap.
//! - Failing to create a save directory never stops the save attempt.
//! - Every save/load failure is logged and reported; none escapes as a panic.
//! - Loaded worlds are validated against the construction registry.

pub mod dirs;
pub mod gateway;
pub mod save_file;

pub use dirs::{ParentDir, ensure_parent_dir};
pub use gateway::{PersistenceError, PersistenceGateway, WorldPersistence, load_city, save_city};
pub use save_file::{SaveFile, SaveFileError, read_world, write_world};
