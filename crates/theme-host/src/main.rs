//! Theme host: entry point.
//!
//! Serves theme requests over stdin/stdout as line-delimited JSON.  The
//! application's UI process spawns this binary, writes one request per line,
//! and reads one response per line.  Logs go to stderr so they never mix with
//! the protocol.
//!
//! # Usage
//!
//! ```text
//! theme-host [OPTIONS]
//!
//! Options:
//!   --config <FILE>          Host config file [default: platform config dir]
//!   --app-root <DIR>         Application install root
//!   --settings-file <FILE>   Settings JSON holding the active theme
//!   --themes-file <FILE>     Themes-info registry JSON
//!   --theme-file <FILE>      Override the theme definition file
//!   --import-file <FILE>     Override the main import entry point
//!   --search-file <FILE>     Override the search-window import entry point
//!   --app-components <DIR>   Override the UI components directory
//! ```
//!
//! Every option can also be set through the `THEME_HOST_*` environment
//! variable of the same name.  Options win over the config file.
//!
//! # Architecture overview
//!
//! ```text
//! UI process  (JSON lines over stdio)
//!       ↕
//! theme-host  ← this process
//!   infrastructure/ipc/      messages, dispatcher, stdio loop
//!   application/             ActivationCoordinator + ports
//!   infrastructure/storage/  settings JSON, host TOML config
//!   infrastructure/registry/ themes-info JSON
//!       ↓
//! theme-core  (pure path resolution)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use theme_core::{resolve_home_path, PathResolver};
use theme_host::application::coordinator::ActivationCoordinator;
use theme_host::infrastructure::ipc::serve;
use theme_host::infrastructure::registry::ThemesInfoRegistry;
use theme_host::infrastructure::storage::config::{config_file_path, load_config, HostConfig};
use theme_host::infrastructure::storage::preferences::JsonPreferencesStore;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Theme path resolution and activation host.
#[derive(Debug, Parser)]
#[command(
    name = "theme-host",
    about = "Resolves theme paths and activates themes over a JSON-lines stdio protocol",
    version
)]
struct Cli {
    /// Host config file.  Defaults to `<config dir>/theme-host/config.toml`.
    #[arg(long, env = "THEME_HOST_CONFIG")]
    config: Option<PathBuf>,

    /// Application install root.
    #[arg(long, env = "THEME_HOST_APP_ROOT")]
    app_root: Option<PathBuf>,

    /// Settings JSON file holding the active theme id.
    #[arg(long, env = "THEME_HOST_SETTINGS_FILE")]
    settings_file: Option<PathBuf>,

    /// Themes-info registry file.
    #[arg(long, env = "THEME_HOST_THEMES_FILE")]
    themes_file: Option<PathBuf>,

    /// Use this theme definition file instead of the registry's.
    #[arg(long, env = "THEME_HOST_THEME_FILE")]
    theme_file: Option<PathBuf>,

    /// Use this main import entry point.
    #[arg(long, env = "THEME_HOST_IMPORT_FILE")]
    import_file: Option<PathBuf>,

    /// Use this search-window import entry point.
    #[arg(long, env = "THEME_HOST_SEARCH_FILE")]
    search_file: Option<PathBuf>,

    /// Use this UI components directory.
    #[arg(long, env = "THEME_HOST_APP_COMPONENTS")]
    app_components: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file and layers the command-line values over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    fn load_host_config(&self) -> anyhow::Result<HostConfig> {
        let path = self.config.clone().or_else(|| config_file_path().ok());
        let mut config = match path {
            Some(path) => load_config(&path)
                .with_context(|| format!("failed to load host config from {}", path.display()))?,
            None => HostConfig::default(),
        };
        self.apply_to(&mut config);
        Ok(config)
    }

    fn apply_to(&self, config: &mut HostConfig) {
        if let Some(app_root) = &self.app_root {
            config.catalog.app_root = app_root.clone();
        }
        if let Some(settings_file) = &self.settings_file {
            config.paths.settings_file = settings_file.clone();
        }
        if let Some(themes_file) = &self.themes_file {
            config.paths.themes_file = themes_file.clone();
        }

        let overrides = &mut config.overrides;
        for (flag, slot) in [
            (&self.theme_file, &mut overrides.theme_file),
            (&self.import_file, &mut overrides.import_file),
            (&self.search_file, &mut overrides.search_file),
            (&self.app_components, &mut overrides.app_components),
        ] {
            if flag.is_some() {
                slot.clone_from(flag);
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_host_config()?;

    // `RUST_LOG` wins; otherwise the config's level.  Stdout is the protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.host.log_level)),
        )
        .init();

    let settings_file = resolve_home_path(&config.paths.settings_file);
    let themes_file = resolve_home_path(&config.paths.themes_file);
    let mut catalog = config.catalog;
    catalog.app_root = resolve_home_path(&catalog.app_root);

    info!(
        "theme host starting: app_root={}, settings={}, themes={}",
        catalog.app_root.display(),
        settings_file.display(),
        themes_file.display()
    );

    let resolver = PathResolver::new(catalog, config.overrides);
    let coordinator = Arc::new(ActivationCoordinator::new(
        Arc::new(resolver),
        Arc::new(JsonPreferencesStore::new(settings_file)),
        Arc::new(ThemesInfoRegistry::new(themes_file)),
    ));

    serve(
        coordinator,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
    .context("theme request transport failed")?;

    info!("input closed, theme host stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_leave_everything_unset() {
        // Arrange / Act
        let cli = Cli::parse_from(["theme-host"]);

        // Assert
        assert!(cli.config.is_none());
        assert!(cli.app_root.is_none());
        assert!(cli.theme_file.is_none());
    }

    #[test]
    fn test_cli_config_path_override() {
        let cli = Cli::parse_from(["theme-host", "--config", "/etc/theme-host.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/theme-host.toml")));
    }

    #[test]
    fn test_apply_to_without_flags_keeps_file_values() {
        // Arrange
        let cli = Cli::parse_from(["theme-host"]);
        let mut config = HostConfig::default();
        config.catalog.app_root = PathBuf::from("/from/file");
        config.overrides.theme_file = Some(PathBuf::from("/file/theme.html"));
        let expected = config.clone();

        // Act
        cli.apply_to(&mut config);

        // Assert
        assert_eq!(config, expected);
    }

    #[test]
    fn test_flags_take_precedence_over_file_values() {
        // Arrange
        let cli = Cli::parse_from([
            "theme-host",
            "--app-root",
            "/opt/app",
            "--settings-file",
            "/tmp/settings.json",
            "--theme-file",
            "~/dev/theme.html",
            "--app-components",
            "/dev/components",
        ]);
        let mut config = HostConfig::default();
        config.catalog.app_root = PathBuf::from("/from/file");
        config.overrides.theme_file = Some(PathBuf::from("/file/theme.html"));
        config.overrides.search_file = Some(PathBuf::from("/file/search.html"));

        // Act
        cli.apply_to(&mut config);

        // Assert
        assert_eq!(config.catalog.app_root, PathBuf::from("/opt/app"));
        assert_eq!(config.paths.settings_file, PathBuf::from("/tmp/settings.json"));
        assert_eq!(config.overrides.theme_file, Some(PathBuf::from("~/dev/theme.html")));
        assert_eq!(config.overrides.app_components, Some(PathBuf::from("/dev/components")));
        assert_eq!(config.overrides.search_file, Some(PathBuf::from("/file/search.html")));
        assert!(config.overrides.import_file.is_none());
    }

    #[test]
    fn test_load_host_config_with_missing_file_uses_defaults() {
        let missing = std::env::temp_dir()
            .join(format!("theme_host_main_{}", std::process::id()))
            .join("absent.toml");
        let cli = Cli::parse_from(["theme-host", "--config", missing.to_str().unwrap()]);

        let config = cli.load_host_config().expect("defaults");

        assert_eq!(config.host.log_level, "info");
    }
}
