//! JSON message types for the theme request/response protocol.
//!
//! Every message is a JSON object with a `"type"` field naming the variant and
//! a `"correlation_id"` chosen by the caller.  Responses echo the id of the
//! request they answer, so a caller with several requests in flight can match
//! them up even when responses arrive out of order.
//!
//! ```json
//! {"type":"activate-theme","correlation_id":"7","theme":"anypoint-theme"}
//! {"type":"theme-activated","correlation_id":"7","config":{"themeFile":"…","reload":true}}
//! {"type":"error","correlation_id":"8","message":"settings file is read-only"}
//! ```

use serde::{Deserialize, Serialize};

use theme_core::{ResolvedConfig, ThemeDescriptor};

use crate::application::coordinator::{ActivationOutcome, ActiveThemeInfo};

// ── Requests ──────────────────────────────────────────────────────────────────

/// Requests accepted by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ThemeRequest {
    /// List every installed theme.
    ListThemes { correlation_id: String },

    /// Report the effective theme id and its registry entry.
    ActiveThemeInfo { correlation_id: String },

    /// Persist `theme` as the active theme and return the new configuration.
    ActivateTheme {
        correlation_id: String,
        theme: String,
    },

    /// Return the configuration for the currently selected theme.
    AppConfig { correlation_id: String },
}

impl ThemeRequest {
    pub fn correlation_id(&self) -> &str {
        match self {
            ThemeRequest::ListThemes { correlation_id }
            | ThemeRequest::ActiveThemeInfo { correlation_id }
            | ThemeRequest::ActivateTheme { correlation_id, .. }
            | ThemeRequest::AppConfig { correlation_id } => correlation_id,
        }
    }

    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ThemeRequest::ListThemes { .. } => "list-themes",
            ThemeRequest::ActiveThemeInfo { .. } => "active-theme-info",
            ThemeRequest::ActivateTheme { .. } => "activate-theme",
            ThemeRequest::AppConfig { .. } => "app-config",
        }
    }
}

// ── Responses ─────────────────────────────────────────────────────────────────

/// Responses emitted by the host.  Exactly one per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ThemeResponse {
    /// Answer to [`ThemeRequest::ListThemes`], in registry order.
    ThemesList {
        correlation_id: String,
        themes: Vec<ThemeDescriptor>,
    },

    /// Answer to [`ThemeRequest::ActiveThemeInfo`].
    ActiveThemeInfo {
        correlation_id: String,
        info: ActiveThemeInfo,
    },

    /// Answer to [`ThemeRequest::ActivateTheme`].
    ThemeActivated {
        correlation_id: String,
        config: ActivationOutcome,
    },

    /// Answer to [`ThemeRequest::AppConfig`].
    AppConfig {
        correlation_id: String,
        config: ResolvedConfig,
    },

    /// Any request that failed.
    Error {
        correlation_id: String,
        message: String,
    },
}

impl ThemeResponse {
    pub fn correlation_id(&self) -> &str {
        match self {
            ThemeResponse::ThemesList { correlation_id, .. }
            | ThemeResponse::ActiveThemeInfo { correlation_id, .. }
            | ThemeResponse::ThemeActivated { correlation_id, .. }
            | ThemeResponse::AppConfig { correlation_id, .. }
            | ThemeResponse::Error { correlation_id, .. } => correlation_id,
        }
    }

    pub fn error(correlation_id: impl Into<String>, message: impl Into<String>) -> Self {
        ThemeResponse::Error {
            correlation_id: correlation_id.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ThemeResponse::Error { .. })
    }
}

/// Pulls a `correlation_id` string out of a line that did not parse as a
/// [`ThemeRequest`], so the caller can still be told what went wrong.
pub fn recover_correlation_id(line: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(line).ok()?;
    value
        .get("correlation_id")?
        .as_str()
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_request_parses_from_json() {
        // Arrange
        let json = r#"{"type":"activate-theme","correlation_id":"7","theme":"dark"}"#;

        // Act
        let request: ThemeRequest = serde_json::from_str(json).expect("parse");

        // Assert
        assert_eq!(
            request,
            ThemeRequest::ActivateTheme {
                correlation_id: "7".to_string(),
                theme: "dark".to_string(),
            }
        );
        assert_eq!(request.correlation_id(), "7");
        assert_eq!(request.kind(), "activate-theme");
    }

    #[test]
    fn test_unit_like_requests_parse() {
        for (json, kind) in [
            (r#"{"type":"list-themes","correlation_id":"a"}"#, "list-themes"),
            (r#"{"type":"active-theme-info","correlation_id":"a"}"#, "active-theme-info"),
            (r#"{"type":"app-config","correlation_id":"a"}"#, "app-config"),
        ] {
            let request: ThemeRequest = serde_json::from_str(json).expect(json);
            assert_eq!(request.kind(), kind);
        }
    }

    #[test]
    fn test_activate_without_theme_is_rejected() {
        let result: Result<ThemeRequest, _> =
            serde_json::from_str(r#"{"type":"activate-theme","correlation_id":"1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_response_serializes_with_type_tag() {
        // Arrange
        let response = ThemeResponse::error("9", "disk full");

        // Act
        let json = serde_json::to_value(&response).expect("serialize");

        // Assert
        assert_eq!(
            json,
            serde_json::json!({"type":"error","correlation_id":"9","message":"disk full"})
        );
        assert!(response.is_error());
    }

    #[test]
    fn test_active_theme_info_response_carries_null_descriptor() {
        let response = ThemeResponse::ActiveThemeInfo {
            correlation_id: "1".to_string(),
            info: ActiveThemeInfo {
                id: "ghost".to_string(),
                descriptor: None,
            },
        };

        let json = serde_json::to_value(&response).expect("serialize");

        assert_eq!(json["type"], "active-theme-info");
        assert_eq!(json["info"]["id"], "ghost");
        assert!(json["info"]["descriptor"].is_null());
    }

    #[test]
    fn test_recover_correlation_id() {
        assert_eq!(
            recover_correlation_id(r#"{"type":"bogus","correlation_id":"x1"}"#),
            Some("x1".to_string())
        );
        assert_eq!(recover_correlation_id(r#"{"type":"list-themes"}"#), None);
        assert_eq!(recover_correlation_id("not json"), None);
        assert_eq!(recover_correlation_id(r#"{"correlation_id":5}"#), None);
    }
}
