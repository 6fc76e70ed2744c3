//! Home-directory expansion for user-supplied paths.
//!
//! Startup overrides are typed by people, so `~/themes/dark.html` has to work.
//! Only a leading `~` component is expanded; `~other-user/...` forms are left
//! alone.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Expands a leading `~` using the current user's home directory.
///
/// Only a bare `~` as the first path component is expanded (`~` or `~/...`).
/// A `~name/...` prefix is not a bare `~` component and is returned unchanged,
/// as are paths without a leading `~` and the empty path.
pub fn resolve_home_path(path: &Path) -> PathBuf {
    expand_home(path, dirs::home_dir().as_deref())
}

/// Expands a leading `~` using `home`.
///
/// When `home` is `None` the path cannot be expanded; it is returned unchanged
/// and a warning is logged so the resulting "file not found" is explainable.
pub fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    let Some(home) = home else {
        warn!("cannot expand {}: home directory is unknown", path.display());
        return path.to_path_buf();
    };

    if rest.as_os_str().is_empty() {
        home.to_path_buf()
    } else {
        home.join(rest)
    }
}
