//! Modal message dialogs: a data model, a fluent builder and presenters.
//!
//! Building a dialog never shows it. Callers hand the built [`Dialog`] to a
//! [`DialogPresenter`], which owns how (and whether) it reaches the player.

pub mod builder;
pub mod presenter;

pub use builder::{ButtonSet, Dialog, DialogBuilder, MessagePart};
pub use presenter::{ConsolePresenter, DialogPresenter, RecordingPresenter};
