//! # theme-core
//!
//! Startup path resolution for a desktop application with swappable visual
//! themes.
//!
//! At startup the application needs four things: the UI component bundle, the
//! main import entry point, the search-window import entry point, and the
//! active theme's definition file.  This crate computes them from three layered
//! sources:
//!
//! 1. **Startup overrides** passed once on the command line.  A set override
//!    wins for its field, no questions asked.
//! 2. **Persisted settings**, where the user's last theme choice lives.
//! 3. The **theme registry**, an ordered list of installed themes.
//!
//! The crate performs no I/O and has no async code.  Loading settings and the
//! registry is the host's job (see the `theme-host` crate); this crate only
//! turns already-loaded values into a [`ResolvedConfig`].
//!
//! # Modules
//!
//! - **`domain`** – Plain data: overrides, settings, theme descriptors, the
//!   resolved record, the [`ThemeCatalog`] of base paths and well-known ids,
//!   and the [`LayoutPolicy`] that decides folder naming and reloads.
//!
//! - **`resolver`** – The [`PathResolver`], which applies the precedence and
//!   fallback rules, plus home-directory (`~`) expansion.

pub mod domain;
pub mod resolver;

// Re-export the most-used types at the crate root so callers can write
// `theme_core::PathResolver` instead of `theme_core::resolver::paths::PathResolver`.
pub use domain::catalog::ThemeCatalog;
pub use domain::policy::LayoutPolicy;
pub use domain::settings::{PersistedSettings, ResolvedConfig, StartupOverrides, ThemeDescriptor};
pub use resolver::home::resolve_home_path;
pub use resolver::paths::{find_theme, PathResolver};
