//! JSON-file implementation of the [`PreferencesStore`] port.
//!
//! The settings file is the application's general preferences document, so
//! most of its keys are none of our business.  [`PersistedSettings`] keeps
//! every unknown key, which means a load → change theme → store cycle writes
//! the other preferences back untouched.
//!
//! A missing or empty file is a first run, not an error: it loads as empty
//! settings and the first store creates it (and its directory).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use theme_core::PersistedSettings;

use crate::application::ports::{CollaboratorError, PreferencesStore};

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl From<StorageError> for CollaboratorError {
    fn from(err: StorageError) -> Self {
        CollaboratorError::Preferences(err.to_string())
    }
}

/// Settings persisted as a pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonPreferencesStore {
    path: PathBuf,
}

impl JsonPreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the settings file, returning empty settings when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] for file-system errors other than "not
    /// found", and [`StorageError::Parse`] if the JSON is malformed.
    pub async fn read(&self) -> Result<PersistedSettings, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", self.path.display());
                return Ok(PersistedSettings::default());
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(PersistedSettings::default());
        }

        serde_json::from_str(&content).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes `settings`, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] for file-system failures or
    /// [`StorageError::Serialize`] if serialization fails.
    pub async fn write(&self, settings: &PersistedSettings) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| StorageError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        let content = serde_json::to_string_pretty(settings).map_err(StorageError::Serialize)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl PreferencesStore for JsonPreferencesStore {
    async fn load(&self) -> Result<PersistedSettings, CollaboratorError> {
        Ok(self.read().await?)
    }

    async fn store(&self, settings: &PersistedSettings) -> Result<(), CollaboratorError> {
        Ok(self.write(settings).await?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
