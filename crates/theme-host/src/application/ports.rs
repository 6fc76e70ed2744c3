//! Collaborator ports used by the activation coordinator.
//!
//! The coordinator never touches the file system itself.  It asks a
//! [`PreferencesStore`] for the user's settings and a [`ThemeRegistry`] for the
//! installed themes, and both answer with an explicit `Result`.  A failure is
//! always a [`CollaboratorError`] whose `Display` is the collaborator's own
//! message, which is what ends up in the `{message}` of an error response.

use async_trait::async_trait;
use thiserror::Error;

use theme_core::{PersistedSettings, ThemeDescriptor};

/// Failure reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// Loading or storing the preferences failed.
    #[error("{0}")]
    Preferences(String),
    /// Loading the themes registry failed.
    #[error("{0}")]
    Registry(String),
}

impl CollaboratorError {
    /// The human-readable message sent back to the caller.
    pub fn message(&self) -> &str {
        match self {
            CollaboratorError::Preferences(message) | CollaboratorError::Registry(message) => {
                message
            }
        }
    }
}

/// Loads and stores the user's persisted settings.
///
/// `load` must return the latest committed settings on every call (no
/// caching); `store` must not return until the settings are durably written.
#[async_trait]
pub trait PreferencesStore: Send + Sync {
    /// Reads the current settings.
    async fn load(&self) -> Result<PersistedSettings, CollaboratorError>;

    /// Writes `settings`, replacing what was stored.
    async fn store(&self, settings: &PersistedSettings) -> Result<(), CollaboratorError>;
}

/// Reads the list of installed themes.
#[async_trait]
pub trait ThemeRegistry: Send + Sync {
    /// Returns the installed themes in registry order, or `None` when no
    /// registry exists yet.
    async fn load(&self) -> Result<Option<Vec<ThemeDescriptor>>, CollaboratorError>;
}
