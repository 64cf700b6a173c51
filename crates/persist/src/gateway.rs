//! Fault-tolerant save/load boundary.
//!
//! [`save_city`] and [`load_city`] log every outcome and return a
//! [`PersistenceError`] on failure. [`PersistenceGateway`] sits on top for
//! interactive callers: it turns an error into a modal dialog and hands back
//! a plain success flag or an optional world, so no persistence failure ever
//! escapes as a fault.

use crate::dirs::ensure_parent_dir;
use lincity_dialog::{ButtonSet, Dialog, DialogBuilder, DialogPresenter};
use lincity_kernel::{ConstructionRegistry, EngineContext, World};
use std::path::{Path, PathBuf};

/// Image shown on persistence error dialogs.
pub const ERROR_IMAGE: &str = "images/gui/dialogs/error.png";

/// Storage backend for whole worlds.
pub trait WorldPersistence {
    type Error: std::error::Error;

    fn save(&self, world: &World, path: &Path) -> Result<(), Self::Error>;

    /// Read a world. Every construction type it names must be in `registry`.
    fn load(&self, path: &Path, registry: &ConstructionRegistry) -> Result<World, Self::Error>;
}

/// A failed save or load. The backend's error survives only as its message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to save game to '{}': {message}", .path.display())]
    Save { path: PathBuf, message: String },
    #[error("failed to load game from '{}': {message}", .path.display())]
    Load { path: PathBuf, message: String },
}

impl PersistenceError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Save { path, .. } | Self::Load { path, .. } => path,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Save { message, .. } | Self::Load { message, .. } => message,
        }
    }

    /// The error dialog shown to the player for this failure.
    pub fn dialog(&self) -> Dialog {
        let (headline, attempt) = match self {
            Self::Save { path, .. } => (
                "Error: Failed to save game.",
                format!("Could not save to {}.", path.display()),
            ),
            Self::Load { path, .. } => (
                "Error: Failed to load game.",
                format!("Could not load {}.", path.display()),
            ),
        };
        DialogBuilder::new()
            .title_text("Error")
            .message_add_text_bold(headline)
            .message_add_text(attempt)
            .message_add_text(self.message())
            .image_file(ERROR_IMAGE)
            .button_set(ButtonSet::Ok)
            .build()
    }
}

/// Save `world` to `path`, creating the parent directory first if needed.
///
/// Directory problems are only warned about; the backend is called exactly
/// once with `path` either way. The context is taken as proof that bootstrap
/// has run.
pub fn save_city<B: WorldPersistence>(
    _ctx: &EngineContext,
    backend: &B,
    world: &World,
    path: &Path,
) -> Result<(), PersistenceError> {
    ensure_parent_dir(path);

    match backend.save(world, path) {
        Ok(()) => {
            tracing::info!("saved game to '{}'", path.display());
            Ok(())
        }
        Err(e) => {
            let err = PersistenceError::Save {
                path: path.to_path_buf(),
                message: e.to_string(),
            };
            tracing::error!("{err}");
            Err(err)
        }
    }
}

/// Load a world from `path`, resolving construction types through the
/// context's registry.
pub fn load_city<B: WorldPersistence>(
    ctx: &EngineContext,
    backend: &B,
    path: &Path,
) -> Result<World, PersistenceError> {
    match backend.load(path, ctx.registry()) {
        Ok(world) => {
            tracing::info!("loaded game from '{}'", path.display());
            Ok(world)
        }
        Err(e) => {
            let err = PersistenceError::Load {
                path: path.to_path_buf(),
                message: e.to_string(),
            };
            tracing::error!("{err}");
            Err(err)
        }
    }
}

/// Save/load front end that reports failures to the player.
pub struct PersistenceGateway<B, D> {
    backend: B,
    presenter: D,
}

impl<B: WorldPersistence, D: DialogPresenter> PersistenceGateway<B, D> {
    pub fn new(backend: B, presenter: D) -> Self {
        Self { backend, presenter }
    }

    /// Save silently on success; show an error dialog on failure.
    /// Returns whether the save succeeded.
    pub fn save(&mut self, ctx: &EngineContext, world: &World, path: &Path) -> bool {
        match save_city(ctx, &self.backend, world, path) {
            Ok(()) => true,
            Err(err) => {
                self.presenter.present(err.dialog());
                false
            }
        }
    }

    /// Load a world, or show an error dialog and return `None`.
    ///
    /// Nothing the caller already holds is touched on failure.
    pub fn load(&mut self, ctx: &EngineContext, path: &Path) -> Option<World> {
        match load_city(ctx, &self.backend, path) {
            Ok(world) => Some(world),
            Err(err) => {
                self.presenter.present(err.dialog());
                None
            }
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn presenter(&self) -> &D {
        &self.presenter
    }

    pub fn into_parts(self) -> (B, D) {
        (self.backend, self.presenter)
    }
}
