//! TOML configuration for the theme host process.
//!
//! Read from `--config` when given, otherwise from the platform config
//! directory (via `dirs::config_dir()`):
//! - Windows:  `%APPDATA%\theme-host\config.toml`
//! - Linux:    `~/.config/theme-host/config.toml`
//! - macOS:    `~/Library/Application Support/theme-host/config.toml`
//!
//! ```toml
//! [host]
//! log_level = "debug"
//!
//! [paths]
//! settings_file = "~/.config/themed-app/settings.json"
//! themes_file = "/opt/themed-app/themes/themes-info.json"
//!
//! [overrides]
//! theme_file = "~/dev/my-theme/my-theme.html"
//!
//! [catalog]
//! app_root = "/opt/themed-app"
//! layout = "multi-folder"
//! ```
//!
//! Every field has a `#[serde(default = ...)]`, so a missing file, an empty
//! file, or a file written for an older version all load cleanly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use theme_core::{StartupOverrides, ThemeCatalog};

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "theme-host";

/// Error type for host configuration file operations.
#[derive(Debug, Error)]
pub enum HostConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level host configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    #[serde(default)]
    pub host: HostSection,
    #[serde(default)]
    pub paths: PathsSection,
    /// Startup overrides handed to the resolver.
    #[serde(default)]
    pub overrides: StartupOverrides,
    /// Install root, theme ids, and layout policy.
    #[serde(default)]
    pub catalog: ThemeCatalog,
}

/// General process settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostSection {
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Locations of the files the host reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathsSection {
    /// The JSON settings document holding the active theme id.
    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,
    /// The JSON themes-info registry.
    #[serde(default = "default_themes_file")]
    pub themes_file: PathBuf,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_settings_file() -> PathBuf {
    default_data_dir().join("settings.json")
}
fn default_themes_file() -> PathBuf {
    default_data_dir().join("themes-info.json")
}

/// Where the default settings and registry live.  Falls back to a relative
/// directory on platforms without a config directory.
fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            settings_file: default_settings_file(),
            themes_file: default_themes_file(),
        }
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

/// Resolves the default path of the config file.
///
/// # Errors
///
/// Returns [`HostConfigError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn config_file_path() -> Result<PathBuf, HostConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
        .ok_or(HostConfigError::NoPlatformConfigDir)
}

/// Loads [`HostConfig`] from `path`, returning the default config if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`HostConfigError::Io`] for file-system errors other than "not
/// found", and [`HostConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<HostConfig, HostConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HostConfig::default()),
        Err(source) => Err(HostConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
