use std::path::Path;

/// What [`ensure_parent_dir`] found or did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentDir {
    /// The path has no parent segment; it targets the current directory.
    Current,
    /// The parent already existed.
    Existing,
    /// The parent (and any missing ancestors) was created.
    Created,
    /// Checking or creating the parent failed. The error has been logged.
    Failed,
}

/// Make sure the directory a save file goes into exists.
///
/// Never fails: filesystem errors are logged as warnings and otherwise
/// ignored, so the save that follows still gets attempted and reports its
/// own error.
pub fn ensure_parent_dir(path: &Path) -> ParentDir {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => return ParentDir::Current,
    };

    match parent.try_exists() {
        Ok(true) => ParentDir::Existing,
        Ok(false) => match std::fs::create_dir_all(parent) {
            Ok(()) => {
                tracing::debug!("created save directory '{}'", parent.display());
                ParentDir::Created
            }
            Err(e) => {
                tracing::warn!("failed to create save directory '{}': {e}", parent.display());
                ParentDir::Failed
            }
        },
        Err(e) => {
            tracing::warn!("failed to create save directory '{}': {e}", parent.display());
            ParentDir::Failed
        }
    }
}
