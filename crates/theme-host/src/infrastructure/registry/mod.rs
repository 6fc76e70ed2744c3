//! Themes-info registry file reader.
//!
//! The registry is a JSON array of theme descriptors written by the theme
//! installer:
//!
//! ```json
//! [
//!   {"id": "default-theme", "path": "default-theme", "main": "default-theme.html"},
//!   {"id": "anypoint-theme", "path": "/opt/themes/anypoint", "main": "anypoint.html",
//!    "title": "Anypoint"}
//! ]
//! ```
//!
//! A relative `path` is taken from the directory that holds the registry file,
//! so installers can write portable entries.  A leading `~` is expanded to the
//! user's home directory here, because the resolver joins descriptor paths
//! as-is.  Absolute paths are kept unchanged.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use theme_core::resolver::home::expand_home;
use theme_core::ThemeDescriptor;

use crate::application::ports::{CollaboratorError, ThemeRegistry};

/// Error type for registry file operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A file system I/O error occurred.
    #[error("I/O error reading themes registry at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The registry is not a JSON array of descriptors.
    #[error("failed to parse themes registry at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<RegistryError> for CollaboratorError {
    fn from(err: RegistryError) -> Self {
        CollaboratorError::Registry(err.to_string())
    }
}

/// [`ThemeRegistry`] reading a themes-info JSON file on every call.
#[derive(Debug, Clone)]
pub struct ThemesInfoRegistry {
    path: PathBuf,
}

impl ThemesInfoRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the registry, returning `None` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Io`] for file-system errors other than "not
    /// found", and [`RegistryError::Parse`] if the content is not a descriptor
    /// array.
    pub async fn read(&self) -> Result<Option<Vec<ThemeDescriptor>>, RegistryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no themes registry at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(RegistryError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut themes: Vec<ThemeDescriptor> =
            serde_json::from_str(&content).map_err(|source| RegistryError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let base = self.path.parent().unwrap_or(Path::new(""));
        let home = dirs::home_dir();
        for theme in &mut themes {
            theme.path = anchor_path(base, &theme.path, home.as_deref());
        }
        Ok(Some(themes))
    }
}

/// Expands a leading `~` against `home`, then joins a still-relative path
/// onto `base`.
fn anchor_path(base: &Path, path: &str, home: Option<&Path>) -> String {
    let candidate = Path::new(path);
    if candidate.starts_with("~") {
        return expand_home(candidate, home).to_string_lossy().into_owned();
    }
    if candidate.is_absolute() || base.as_os_str().is_empty() {
        return path.to_string();
    }
    base.join(candidate).to_string_lossy().into_owned()
}

#[async_trait]
impl ThemeRegistry for ThemesInfoRegistry {
    async fn load(&self) -> Result<Option<Vec<ThemeDescriptor>>, CollaboratorError> {
        Ok(self.read().await?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use theme_core::{PathResolver, PersistedSettings, StartupOverrides, ThemeCatalog};
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("theme_host_registry_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_missing_registry_is_none() {
        let registry = ThemesInfoRegistry::new(
            std::env::temp_dir()
                .join(format!("theme_host_registry_{}", Uuid::new_v4()))
                .join("themes-info.json"),
        );

        assert_eq!(registry.load().await, Ok(None));
    }

    #[tokio::test]
    async fn test_relative_paths_are_anchored_at_registry_directory() {
        // Arrange
        let dir = temp_dir();
        let file = dir.join("themes-info.json");
        std::fs::write(
            &file,
            r#"[
                {"id":"a","path":"default","main":"default.html","title":"Default"},
                {"id":"b","path":"/abs/anypoint","main":"anypoint.html"},
                {"id":"c","path":"~/themes/c","main":"c.html"}
            ]"#,
        )
        .unwrap();

        // Act
        let themes = ThemesInfoRegistry::new(&file)
            .load()
            .await
            .expect("load")
            .expect("present");

        // Assert
        assert_eq!(themes.len(), 3);
        assert_eq!(PathBuf::from(&themes[0].path), dir.join("default"));
        assert_eq!(themes[0].title.as_deref(), Some("Default"));
        assert_eq!(themes[1].path, "/abs/anypoint");
        assert_eq!(
            PathBuf::from(&themes[2].path),
            theme_core::resolve_home_path(Path::new("~/themes/c"))
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_malformed_registry_is_a_registry_error() {
        // Arrange
        let dir = temp_dir();
        let file = dir.join("themes-info.json");
        std::fs::write(&file, r#"{"id":"not-an-array"}"#).unwrap();

        // Act
        let err = ThemesInfoRegistry::new(&file)
            .load()
            .await
            .expect_err("must fail");

        // Assert
        assert!(matches!(err, CollaboratorError::Registry(_)));
        assert!(err.message().contains("failed to parse themes registry"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_empty_array_is_an_empty_registry() {
        let dir = temp_dir();
        let file = dir.join("themes-info.json");
        std::fs::write(&file, "[]").unwrap();

        let themes = ThemesInfoRegistry::new(&file).load().await.expect("load");

        assert_eq!(themes, Some(Vec::new()));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_anchor_path_without_base_keeps_path() {
        assert_eq!(anchor_path(Path::new(""), "themes/a", None), "themes/a");
    }

    #[test]
    fn test_anchor_path_expands_tilde_instead_of_joining() {
        let anchored = anchor_path(
            Path::new("/opt/app/themes"),
            "~/themes/c",
            Some(Path::new("/home/tester")),
        );
        assert_eq!(PathBuf::from(anchored), PathBuf::from("/home/tester/themes/c"));
    }

    #[test]
    fn test_anchor_path_with_unknown_home_keeps_tilde() {
        assert_eq!(
            anchor_path(Path::new("/opt/app/themes"), "~/themes/c", None),
            "~/themes/c"
        );
    }

    #[test]
    fn test_tilde_descriptor_resolves_to_loadable_theme_file() {
        // Arrange
        let mut theme = ThemeDescriptor::new("c", "~/themes/c", "c.html");
        theme.path = anchor_path(
            Path::new("/opt/app/themes"),
            &theme.path,
            Some(Path::new("/home/tester")),
        );
        let resolver = PathResolver::new(ThemeCatalog::default(), StartupOverrides::default());

        // Act
        let config = resolver.resolve_config(
            Some(&PersistedSettings::with_theme("c")),
            Some(std::slice::from_ref(&theme)),
        );

        // Assert
        assert_eq!(config.theme_file, PathBuf::from("/home/tester/themes/c/c.html"));
    }
}
