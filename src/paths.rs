// ABOUTME: Path expansion helpers for session roots and window/pane paths
// Handles the leading "~/" home marker and joining fragments against a root

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("could not determine the current user's home directory")]
    HomeNotFound,
}

/// Resolve the current user's home directory.
pub fn home_dir() -> Result<PathBuf, PathError> {
    dirs::home_dir().ok_or(PathError::HomeNotFound)
}

/// Expand a leading `~/` marker to the user's home directory.
///
/// Paths without the marker are returned unchanged, so a second application
/// is a no-op once the marker is gone. Existence is never checked. If the
/// home directory cannot be determined, the expansion degrades to an empty
/// home with a warning rather than failing the run.
pub fn expand(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => match home_dir() {
            Ok(home) => home.join(rest),
            Err(e) => {
                warn!("{e}; expanding {path:?} against an empty home directory");
                PathBuf::from(rest)
            }
        },
        None => PathBuf::from(path),
    }
}

/// Join a relative fragment against an already-expanded root, then expand.
///
/// An empty fragment resolves to the root itself.
pub fn resolve(root: &Path, fragment: &str) -> PathBuf {
    if fragment.is_empty() {
        return root.to_path_buf();
    }

    expand(&root.join(fragment).to_string_lossy())
}
