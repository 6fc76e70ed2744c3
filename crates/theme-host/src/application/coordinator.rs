//! ActivationCoordinator: the asynchronous half of theme resolution.
//!
//! Each operation is one stateless request.  It loads whatever it needs from
//! the collaborators, hands the values to the pure [`PathResolver`], and
//! returns the result.  No state is kept between requests apart from what the
//! preferences store persists.
//!
//! # Activation ordering
//!
//! ```text
//! load settings ─▶ compute reload flag ─▶ set theme ─▶ store ─▶ load registry ─▶ resolve
//! ```
//!
//! The store must be acknowledged before the config is recomputed, so no
//! caller can ever see a config for the new theme while the old theme id is
//! still the committed one.  A failed load returns before anything is stored.
//!
//! # Concurrency
//!
//! Requests do not lock each other out.  Two activations racing each other
//! both run to completion and the last store wins.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use theme_core::{find_theme, PathResolver, ResolvedConfig, ThemeDescriptor};

use crate::application::ports::{CollaboratorError, PreferencesStore, ThemeRegistry};

/// The theme currently in force and its registry entry, if installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveThemeInfo {
    /// Effective theme id (persisted choice or the catalog default).
    pub id: String,
    /// Registry entry for `id`; `None` when the theme is not installed.
    pub descriptor: Option<ThemeDescriptor>,
}

/// Result of a successful activation.
///
/// Serializes as the resolved config with an optional `reload` key next to it:
///
/// ```json
/// {"appComponents":"components/anypoint", "...": "...", "theme":"anypoint-theme","reload":true}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationOutcome {
    #[serde(flatten)]
    pub config: ResolvedConfig,
    /// Present only when the deployment's layout policy tracks reloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reload: Option<bool>,
}

/// Mediates theme requests between a remote caller and the collaborators.
pub struct ActivationCoordinator {
    resolver: Arc<PathResolver>,
    preferences: Arc<dyn PreferencesStore>,
    registry: Arc<dyn ThemeRegistry>,
}

impl ActivationCoordinator {
    pub fn new(
        resolver: Arc<PathResolver>,
        preferences: Arc<dyn PreferencesStore>,
        registry: Arc<dyn ThemeRegistry>,
    ) -> Self {
        Self {
            resolver,
            preferences,
            registry,
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Returns every installed theme in registry order.
    pub async fn list_themes(&self) -> Result<Vec<ThemeDescriptor>, CollaboratorError> {
        let themes = self.load_registry().await?;
        debug!("listing {} installed themes", themes.len());
        Ok(themes)
    }

    /// Returns the effective theme id and its descriptor.
    ///
    /// Settings and registry are loaded concurrently.  Unlike path resolution
    /// there is no fallback here: a theme that is not installed yields `None`.
    pub async fn active_theme_info(&self) -> Result<ActiveThemeInfo, CollaboratorError> {
        let (settings, themes) = tokio::try_join!(self.preferences.load(), self.load_registry())?;

        let id = self.resolver.effective_theme_id(&settings).to_string();
        let descriptor = find_theme(&themes, &id).cloned();
        Ok(ActiveThemeInfo { id, descriptor })
    }

    /// Makes `theme_id` the active theme and returns the new config.
    pub async fn activate_theme(
        &self,
        theme_id: &str,
    ) -> Result<ActivationOutcome, CollaboratorError> {
        let mut settings = self.preferences.load().await?;

        let previous = self.resolver.effective_theme_id(&settings).to_string();
        let reload = self.resolver.reload_required(&previous, theme_id);

        settings.theme = Some(theme_id.to_string());
        self.preferences.store(&settings).await?;
        info!("active theme changed from {previous} to {theme_id}");

        let themes = self.load_registry().await?;
        let config = self.resolver.resolve_config(Some(&settings), Some(themes.as_slice()));
        Ok(ActivationOutcome { config, reload })
    }

    /// Resolves the startup config from the current settings and registry.
    pub async fn app_config(&self) -> Result<ResolvedConfig, CollaboratorError> {
        let (settings, themes) = tokio::try_join!(self.preferences.load(), self.load_registry())?;
        Ok(self.resolver.resolve_config(Some(&settings), Some(themes.as_slice())))
    }

    /// Loads the registry, treating "no registry" as "no themes".
    async fn load_registry(&self) -> Result<Vec<ThemeDescriptor>, CollaboratorError> {
        Ok(self.registry.load().await?.unwrap_or_default())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
