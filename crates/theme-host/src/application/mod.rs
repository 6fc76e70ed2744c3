//! Application layer for the theme host.
//!
//! Use cases here orchestrate the pure resolver from `theme-core` with the
//! collaborators that load and store data.  They depend on the traits in
//! [`ports`] only; concrete file-backed implementations live in the
//! infrastructure layer and are injected at construction time, which keeps
//! every use case unit-testable with in-memory doubles.
//!
//! # Sub-modules
//!
//! - **`ports`**       – The `PreferencesStore` and `ThemeRegistry` traits and
//!   the `CollaboratorError` they report.
//!
//! - **`coordinator`** – The `ActivationCoordinator`: list themes, report the
//!   active theme, activate a theme, and compute the startup config.

pub mod coordinator;
pub mod ports;
