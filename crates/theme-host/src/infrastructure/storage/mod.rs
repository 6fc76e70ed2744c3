//! Storage infrastructure: settings and host configuration files.
//!
//! - **`preferences`** – The JSON settings document shared with the rest of
//!   the application.  Implements the `PreferencesStore` port.
//! - **`config`** – The host's own TOML configuration (file locations,
//!   startup overrides, theme catalog, log level).
//!
//! Keeping file formats here means the application layer never learns whether
//! settings live in JSON, TOML, or a database.

pub mod config;
pub mod preferences;
