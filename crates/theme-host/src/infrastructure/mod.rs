//! Infrastructure layer for the theme host.
//!
//! Concrete adapters for the application ports and the process's outer
//! surface:
//!
//! - **`storage`** – JSON settings file (`PreferencesStore`) and the host's
//!   TOML configuration.
//! - **`registry`** – Themes-info JSON file (`ThemeRegistry`).
//! - **`memory`** – In-memory collaborators for tests and embedding.
//! - **`ipc`** – Request/response messages, dispatcher, and stdio transport.

pub mod ipc;
pub mod memory;
pub mod registry;
pub mod storage;
