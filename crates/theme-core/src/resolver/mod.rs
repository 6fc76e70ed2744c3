//! Path resolution.
//!
//! - **`home`**  – `~` expansion for user-supplied paths.
//! - **`paths`** – [`paths::PathResolver`], the precedence and fallback rules
//!   that turn overrides + settings + registry into a
//!   [`crate::ResolvedConfig`].

pub mod home;
pub mod paths;
