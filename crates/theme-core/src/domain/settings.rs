//! Inputs and output of path resolution.
//!
//! # The three inputs
//!
//! ```text
//! StartupOverrides   fixed for the process lifetime (command line / config)
//! PersistedSettings  loaded fresh for every request (user's last choice)
//! [ThemeDescriptor]  loaded fresh for every request (installed themes)
//! ```
//!
//! # The output
//!
//! [`ResolvedConfig`] is a value, not a singleton.  It is recomputed on every
//! request and never cached, so there is nothing to invalidate when the user
//! switches themes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Startup overrides ─────────────────────────────────────────────────────────

/// Caller-supplied paths that bypass resolution for one output field each.
///
/// A `Some` field is used verbatim (after `~` expansion) and every other source
/// is ignored for that field.  Built once at startup and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupOverrides {
    /// Replaces the theme definition file lookup.
    pub theme_file: Option<PathBuf>,
    /// Replaces the main import entry point.
    pub import_file: Option<PathBuf>,
    /// Replaces the search-window import entry point.
    pub search_file: Option<PathBuf>,
    /// Replaces the UI components directory.
    pub app_components: Option<PathBuf>,
}

impl StartupOverrides {
    /// Returns `true` when no override is set.
    pub fn is_empty(&self) -> bool {
        self.theme_file.is_none()
            && self.import_file.is_none()
            && self.search_file.is_none()
            && self.app_components.is_none()
    }
}

// ── Persisted settings ────────────────────────────────────────────────────────

/// The user's persisted preferences, as far as theme resolution cares.
///
/// Only `theme` is interpreted.  Every other key of the settings document is
/// kept in `other` so that writing the settings back after an activation does
/// not drop unrelated preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSettings {
    /// Identifier of the theme the user selected last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Unrelated preferences, preserved as-is.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl PersistedSettings {
    /// Settings with only the theme set.
    pub fn with_theme(theme: impl Into<String>) -> Self {
        Self {
            theme: Some(theme.into()),
            other: Map::new(),
        }
    }

    /// The stored theme id, treating an empty string as absent.
    pub fn theme_id(&self) -> Option<&str> {
        self.theme.as_deref().filter(|id| !id.is_empty())
    }
}

// ── Theme registry entries ────────────────────────────────────────────────────

/// One installed theme, as listed in the themes registry.
///
/// `path` joined with `main` is the theme's definition file.  The optional
/// descriptive fields are passed through to list-themes responses untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDescriptor {
    /// Opaque theme identifier.  Unique within a registry (not checked here).
    pub id: String,
    /// Directory containing the theme.
    pub path: String,
    /// Definition file name, relative to `path`.
    pub main: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ThemeDescriptor {
    /// Creates a descriptor with only the required fields set.
    pub fn new(id: impl Into<String>, path: impl Into<String>, main: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            main: main.into(),
            name: None,
            title: None,
            version: None,
            description: None,
        }
    }

    /// The theme's definition file: `path` joined with `main`.
    pub fn definition_file(&self) -> PathBuf {
        Path::new(&self.path).join(&self.main)
    }
}

// ── Resolved output ───────────────────────────────────────────────────────────

/// Every path the application loads at startup, plus the effective theme id.
///
/// Serialized with camelCase keys because the consumer on the other side of
/// the process boundary is the application's UI layer:
///
/// ```json
/// {"appComponents":"components/default","importDir":"/opt/app/components/default",
///  "importFile":"/opt/app/components/default/import.html",
///  "searchFile":"/opt/app/components/default/search.html",
///  "themeFile":"/opt/app/themes/default/default.html","theme":"default-theme"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub app_components: PathBuf,
    pub import_dir: PathBuf,
    pub import_file: PathBuf,
    pub search_file: PathBuf,
    pub theme_file: PathBuf,
    /// Effective theme identifier.
    pub theme: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_overrides_default_is_empty() {
        assert!(StartupOverrides::default().is_empty());
    }

    #[test]
    fn test_startup_overrides_with_one_field_is_not_empty() {
        let overrides = StartupOverrides {
            search_file: Some(PathBuf::from("/tmp/search.html")),
            ..StartupOverrides::default()
        };
        assert!(!overrides.is_empty());
    }

    #[test]
    fn test_theme_id_treats_empty_string_as_absent() {
        let settings = PersistedSettings::with_theme("");
        assert_eq!(settings.theme_id(), None);
    }

    #[test]
    fn test_settings_preserve_unrelated_keys_through_serde() {
        // Arrange
        let json = r#"{"theme":"dark","requestDefaultTimeout":45,"history":{"enabled":true}}"#;

        // Act
        let settings: PersistedSettings = serde_json::from_str(json).expect("deserialize");
        let written = serde_json::to_value(&settings).expect("serialize");

        // Assert
        assert_eq!(settings.theme_id(), Some("dark"));
        assert_eq!(written["requestDefaultTimeout"], 45);
        assert_eq!(written["history"]["enabled"], true);
        assert_eq!(written["theme"], "dark");
    }

    #[test]
    fn test_settings_without_theme_omit_the_key() {
        let settings: PersistedSettings = serde_json::from_str(r#"{"telemetry":false}"#).unwrap();
        let written = serde_json::to_value(&settings).unwrap();
        assert!(settings.theme.is_none());
        assert!(written.get("theme").is_none());
    }

    #[test]
    fn test_descriptor_definition_file_joins_path_and_main() {
        let theme = ThemeDescriptor::new("a", "default", "default.html");
        assert_eq!(theme.definition_file(), PathBuf::from("default/default.html"));
    }

    #[test]
    fn test_descriptor_optional_fields_default_to_none() {
        let theme: ThemeDescriptor =
            serde_json::from_str(r#"{"id":"a","path":"p","main":"m.html"}"#).unwrap();
        assert_eq!(theme, ThemeDescriptor::new("a", "p", "m.html"));
    }

    #[test]
    fn test_resolved_config_uses_camel_case_keys() {
        let config = ResolvedConfig {
            app_components: PathBuf::from("components/default"),
            import_dir: PathBuf::from("/app/components/default"),
            import_file: PathBuf::from("/app/components/default/import.html"),
            search_file: PathBuf::from("/app/components/default/search.html"),
            theme_file: PathBuf::from("/app/themes/default.html"),
            theme: "default-theme".to_string(),
        };

        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["appComponents"], "components/default");
        assert_eq!(value["importFile"], "/app/components/default/import.html");
        assert_eq!(value["themeFile"], "/app/themes/default.html");
        assert_eq!(value["theme"], "default-theme");
    }
}
