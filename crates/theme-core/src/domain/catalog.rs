//! The theme catalog: base paths and well-known theme identifiers.
//!
//! These values used to be module-level constants.  Keeping them in one plain
//! struct that is handed to the resolver means a deployment can point at a
//! different install root, and tests can substitute their own theme ids,
//! without touching any global state.
//!
//! The struct deserializes from the `[catalog]` table of the host's TOML
//! config.  Every field has a default, so an empty table is valid:
//!
//! ```toml
//! [catalog]
//! app_root = "/opt/themed-app"
//! layout = "multi-folder"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::policy::LayoutPolicy;

/// Base paths, file names, and theme ids used by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeCatalog {
    /// Application install root.  Import entry points live under it.
    #[serde(default = "default_app_root")]
    pub app_root: PathBuf,
    /// Base directory of the UI component bundles, relative to `app_root`.
    #[serde(default = "default_components_dir")]
    pub components_dir: PathBuf,
    /// File name of the main import entry point.
    #[serde(default = "default_import_file_name")]
    pub import_file_name: String,
    /// File name of the search-window import entry point.
    #[serde(default = "default_search_file_name")]
    pub search_file_name: String,
    /// Theme used when settings name none, and the second lookup tier.
    #[serde(default = "default_theme_id")]
    pub default_theme_id: String,
    /// Theme that selects the alternate component layout under
    /// [`LayoutPolicy::MultiFolder`].
    #[serde(default = "default_anypoint_theme_id")]
    pub anypoint_theme_id: String,
    /// Bundled theme file used when the registry cannot satisfy a lookup.
    /// Relative values are taken from `app_root`.
    #[serde(default = "default_fallback_theme_file")]
    pub fallback_theme_file: PathBuf,
    /// Folder-naming and reload policy for this deployment.
    #[serde(default)]
    pub layout: LayoutPolicy,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_app_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_components_dir() -> PathBuf {
    PathBuf::from("components")
}
fn default_import_file_name() -> String {
    "import.html".to_string()
}
fn default_search_file_name() -> String {
    "search.html".to_string()
}
fn default_theme_id() -> String {
    "default-theme".to_string()
}
fn default_anypoint_theme_id() -> String {
    "anypoint-theme".to_string()
}
fn default_fallback_theme_file() -> PathBuf {
    PathBuf::from("themes").join("default-theme").join("default-theme.html")
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self {
            app_root: default_app_root(),
            components_dir: default_components_dir(),
            import_file_name: default_import_file_name(),
            search_file_name: default_search_file_name(),
            default_theme_id: default_theme_id(),
            anypoint_theme_id: default_anypoint_theme_id(),
            fallback_theme_file: default_fallback_theme_file(),
            layout: LayoutPolicy::default(),
        }
    }
}

impl ThemeCatalog {
    /// Returns a catalog rooted at `app_root` with every other field defaulted.
    pub fn rooted_at(app_root: impl Into<PathBuf>) -> Self {
        Self {
            app_root: app_root.into(),
            ..Self::default()
        }
    }

    /// Sets the layout policy.
    pub fn with_layout(mut self, layout: LayoutPolicy) -> Self {
        self.layout = layout;
        self
    }

    /// Absolute (or `app_root`-relative) location of the bundled fallback theme.
    pub fn fallback_theme_path(&self) -> PathBuf {
        // `join` keeps an absolute `fallback_theme_file` as-is.
        self.app_root.join(&self.fallback_theme_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_file_names() {
        let catalog = ThemeCatalog::default();
        assert_eq!(catalog.import_file_name, "import.html");
        assert_eq!(catalog.search_file_name, "search.html");
        assert_eq!(catalog.components_dir, PathBuf::from("components"));
    }

    #[test]
    fn test_default_catalog_theme_ids_differ() {
        let catalog = ThemeCatalog::default();
        assert_ne!(catalog.default_theme_id, catalog.anypoint_theme_id);
    }

    #[test]
    fn test_fallback_theme_path_is_relative_to_app_root() {
        let catalog = ThemeCatalog::rooted_at("/opt/app");
        assert_eq!(
            catalog.fallback_theme_path(),
            PathBuf::from("/opt/app/themes/default-theme/default-theme.html")
        );
    }

    #[test]
    fn test_absolute_fallback_theme_file_ignores_app_root() {
        let catalog = ThemeCatalog {
            fallback_theme_file: PathBuf::from("/usr/share/themes/base.html"),
            ..ThemeCatalog::rooted_at("/opt/app")
        };
        assert_eq!(
            catalog.fallback_theme_path(),
            PathBuf::from("/usr/share/themes/base.html")
        );
    }

    #[test]
    fn test_empty_json_object_deserializes_to_defaults() {
        let catalog: ThemeCatalog = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(catalog, ThemeCatalog::default());
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let catalog: ThemeCatalog =
            serde_json::from_str(r#"{"default_theme_id":"light","layout":"multi-folder"}"#)
                .expect("deserialize");
        assert_eq!(catalog.default_theme_id, "light");
        assert_eq!(catalog.layout, LayoutPolicy::MultiFolder);
        assert_eq!(catalog.import_file_name, "import.html");
    }
}
