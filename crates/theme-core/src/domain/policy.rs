//! Versioned theme layout policy.
//!
//! Two generations of the application disagree on two questions:
//!
//! | Question                          | `MultiFolder`                     | `SingleFolder` |
//! |-----------------------------------|-----------------------------------|----------------|
//! | Components sub-folder             | `anypoint` for the anypoint theme, else `default` | always `default` |
//! | Does switching themes reload?     | yes when entering or leaving the anypoint theme | no flag at all |
//!
//! Neither answer is "right"; a deployment picks one in its catalog config and
//! the resolver never mixes them.

use serde::{Deserialize, Serialize};

/// Components sub-folder used by every theme except the anypoint one.
pub const DEFAULT_FOLDER: &str = "default";

/// Components sub-folder used by the anypoint theme under
/// [`LayoutPolicy::MultiFolder`].
pub const ANYPOINT_FOLDER: &str = "anypoint";

/// How component folders are chosen and when activation requires a reload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPolicy {
    /// Two component layouts; the anypoint theme has its own folder.
    MultiFolder,
    /// One component layout shared by every theme.
    #[default]
    SingleFolder,
}

impl LayoutPolicy {
    /// Components sub-folder for the effective theme id.
    pub fn folder_name(self, theme_id: &str, anypoint_theme_id: &str) -> &'static str {
        match self {
            LayoutPolicy::MultiFolder if theme_id == anypoint_theme_id => ANYPOINT_FOLDER,
            LayoutPolicy::MultiFolder | LayoutPolicy::SingleFolder => DEFAULT_FOLDER,
        }
    }

    /// Whether moving from `previous` to `requested` swaps the component layout.
    ///
    /// `None` means the policy has no notion of a reload and callers should not
    /// report one.
    pub fn reload_required(
        self,
        previous: &str,
        requested: &str,
        anypoint_theme_id: &str,
    ) -> Option<bool> {
        match self {
            LayoutPolicy::MultiFolder => {
                Some(requested == anypoint_theme_id || previous == anypoint_theme_id)
            }
            LayoutPolicy::SingleFolder => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANYPOINT: &str = "anypoint-theme";

    #[test]
    fn test_multi_folder_uses_anypoint_folder_for_anypoint_theme() {
        assert_eq!(
            LayoutPolicy::MultiFolder.folder_name(ANYPOINT, ANYPOINT),
            ANYPOINT_FOLDER
        );
    }

    #[test]
    fn test_multi_folder_uses_default_folder_for_other_themes() {
        assert_eq!(
            LayoutPolicy::MultiFolder.folder_name("dark", ANYPOINT),
            DEFAULT_FOLDER
        );
    }

    #[test]
    fn test_single_folder_always_uses_default_folder() {
        assert_eq!(
            LayoutPolicy::SingleFolder.folder_name(ANYPOINT, ANYPOINT),
            DEFAULT_FOLDER
        );
        assert_eq!(
            LayoutPolicy::SingleFolder.folder_name("dark", ANYPOINT),
            DEFAULT_FOLDER
        );
    }

    #[test]
    fn test_multi_folder_reload_when_entering_anypoint() {
        assert_eq!(
            LayoutPolicy::MultiFolder.reload_required("dark", ANYPOINT, ANYPOINT),
            Some(true)
        );
    }

    #[test]
    fn test_multi_folder_reload_when_leaving_anypoint() {
        assert_eq!(
            LayoutPolicy::MultiFolder.reload_required(ANYPOINT, "dark", ANYPOINT),
            Some(true)
        );
    }

    #[test]
    fn test_multi_folder_no_reload_between_regular_themes() {
        assert_eq!(
            LayoutPolicy::MultiFolder.reload_required("dark", "light", ANYPOINT),
            Some(false)
        );
    }

    #[test]
    fn test_single_folder_never_reports_reload() {
        assert_eq!(
            LayoutPolicy::SingleFolder.reload_required("dark", ANYPOINT, ANYPOINT),
            None
        );
    }

    #[test]
    fn test_policy_deserializes_from_kebab_case() {
        let policy: LayoutPolicy = serde_json::from_str(r#""multi-folder""#).unwrap();
        assert_eq!(policy, LayoutPolicy::MultiFolder);
        let policy: LayoutPolicy = serde_json::from_str(r#""single-folder""#).unwrap();
        assert_eq!(policy, LayoutPolicy::SingleFolder);
    }
}
