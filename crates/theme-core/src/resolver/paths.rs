//! PathResolver: computes a [`ResolvedConfig`] from overrides, settings, and
//! the theme registry.
//!
//! # Precedence (for each output field)
//!
//! ```text
//! app_components  override  →  components_dir / <folder>
//! import_dir                    app_root / components_dir / <folder>   (never overridden)
//! import_file     override  →  import_dir / import_file_name
//! search_file     override  →  import_dir / search_file_name
//! theme_file      override  →  registry[effective id]
//!                           →  registry[default id]
//!                           →  app_root / fallback_theme_file
//! ```
//!
//! `<folder>` comes from the catalog's [`crate::LayoutPolicy`].
//!
//! # Purity
//!
//! The resolver holds only immutable inputs (catalog, overrides, home
//! directory).  Calling [`PathResolver::resolve_config`] twice with the same
//! settings and registry returns the same record.  Nothing here fails: every
//! missing input degrades to a default, and a theme missing from the registry
//! is logged and recovered.

use std::path::{Path, PathBuf};

use tracing::error;

use crate::domain::catalog::ThemeCatalog;
use crate::domain::settings::{PersistedSettings, ResolvedConfig, StartupOverrides, ThemeDescriptor};
use crate::resolver::home::expand_home;

/// Looks up a theme by exact id.  The first match wins.
pub fn find_theme<'a>(registry: &'a [ThemeDescriptor], id: &str) -> Option<&'a ThemeDescriptor> {
    registry.iter().find(|theme| theme.id == id)
}

/// Resolves startup paths for one process.
///
/// Built once at startup and shared (it is `Send + Sync`) by every request
/// handler.
#[derive(Debug, Clone)]
pub struct PathResolver {
    catalog: ThemeCatalog,
    overrides: StartupOverrides,
    home_dir: Option<PathBuf>,
}

impl PathResolver {
    /// Creates a resolver that expands `~` with the current user's home
    /// directory.
    pub fn new(catalog: ThemeCatalog, overrides: StartupOverrides) -> Self {
        Self {
            catalog,
            overrides,
            home_dir: dirs::home_dir(),
        }
    }

    /// Replaces the home directory used for `~` expansion.
    pub fn with_home_dir(mut self, home_dir: Option<PathBuf>) -> Self {
        self.home_dir = home_dir;
        self
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    pub fn overrides(&self) -> &StartupOverrides {
        &self.overrides
    }

    /// Expands a leading `~` with this resolver's home directory.
    pub fn resolve_home_path(&self, path: &Path) -> PathBuf {
        expand_home(path, self.home_dir.as_deref())
    }

    /// The theme id in force: the persisted choice, or the catalog default.
    pub fn effective_theme_id<'a>(&'a self, settings: &'a PersistedSettings) -> &'a str {
        settings
            .theme_id()
            .unwrap_or(self.catalog.default_theme_id.as_str())
    }

    /// Components sub-folder for the effective theme.
    pub fn theme_folder_name(&self, settings: &PersistedSettings) -> &'static str {
        self.catalog.layout.folder_name(
            self.effective_theme_id(settings),
            &self.catalog.anypoint_theme_id,
        )
    }

    /// UI components directory.
    pub fn resolve_components_dir(&self, settings: &PersistedSettings) -> PathBuf {
        if let Some(dir) = &self.overrides.app_components {
            return self.resolve_home_path(dir);
        }
        self.catalog
            .components_dir
            .join(self.theme_folder_name(settings))
    }

    /// Directory holding the import entry points.  Always derived.
    pub fn resolve_import_dir(&self, settings: &PersistedSettings) -> PathBuf {
        self.catalog
            .app_root
            .join(&self.catalog.components_dir)
            .join(self.theme_folder_name(settings))
    }

    /// Main import entry point.
    pub fn resolve_import_file(&self, settings: &PersistedSettings) -> PathBuf {
        if let Some(file) = &self.overrides.import_file {
            return self.resolve_home_path(file);
        }
        self.resolve_import_dir(settings)
            .join(&self.catalog.import_file_name)
    }

    /// Search-window import entry point.
    pub fn resolve_search_file(&self, settings: &PersistedSettings) -> PathBuf {
        if let Some(file) = &self.overrides.search_file {
            return self.resolve_home_path(file);
        }
        self.resolve_import_dir(settings)
            .join(&self.catalog.search_file_name)
    }

    /// Theme definition file, applying the four-tier fallback.
    pub fn resolve_theme_file(
        &self,
        settings: &PersistedSettings,
        registry: &[ThemeDescriptor],
    ) -> PathBuf {
        if let Some(file) = &self.overrides.theme_file {
            return self.resolve_home_path(file);
        }

        let requested = self.effective_theme_id(settings);
        if let Some(theme) = find_theme(registry, requested) {
            return theme.definition_file();
        }
        error!("theme {requested} is not installed, falling back to the default theme");

        let default_id = self.catalog.default_theme_id.as_str();
        if let Some(theme) = find_theme(registry, default_id) {
            return theme.definition_file();
        }
        error!("default theme {default_id} is not installed, using the bundled theme file");

        self.catalog.fallback_theme_path()
    }

    /// Resolves every startup path.
    ///
    /// `None` settings or registry are treated as empty.
    pub fn resolve_config(
        &self,
        settings: Option<&PersistedSettings>,
        registry: Option<&[ThemeDescriptor]>,
    ) -> ResolvedConfig {
        let empty = PersistedSettings::default();
        let settings = settings.unwrap_or(&empty);
        let registry = registry.unwrap_or(&[]);

        ResolvedConfig {
            app_components: self.resolve_components_dir(settings),
            import_dir: self.resolve_import_dir(settings),
            import_file: self.resolve_import_file(settings),
            search_file: self.resolve_search_file(settings),
            theme_file: self.resolve_theme_file(settings, registry),
            theme: self.effective_theme_id(settings).to_string(),
        }
    }

    /// Whether switching from `previous` to `requested` needs a UI reload, as
    /// decided by the catalog's layout policy.
    pub fn reload_required(&self, previous: &str, requested: &str) -> Option<bool> {
        self.catalog
            .layout
            .reload_required(previous, requested, &self.catalog.anypoint_theme_id)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
