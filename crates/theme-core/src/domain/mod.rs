//! Domain types for theme path resolution.
//!
//! Everything in this module is plain data with no I/O.  The types derive
//! `Serialize`/`Deserialize` because the host process reads them from disk
//! and sends them across the process boundary, but nothing here knows about
//! files or sockets.

/// Base paths and well-known theme identifiers.
pub mod catalog;

/// The versioned folder-naming / reload policy.
pub mod policy;

/// Overrides, persisted settings, registry entries, and the resolved record.
pub mod settings;
