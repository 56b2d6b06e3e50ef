//! Configuration handling for the TUI

use crate::api::{
    ApiConfig, DEFAULT_API_BASE, DEFAULT_FORMS_ENDPOINT, DEFAULT_FORM_DEFINITIONS_ENDPOINT,
};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Environment variable overriding the API base address
pub const ENV_API_BASE: &str = "FORM_ADMIN_API_BASE";
/// Environment variable overriding the CSRF token
pub const ENV_CSRF_TOKEN: &str = "FORM_ADMIN_CSRF_TOKEN";
/// Environment variable naming the form to edit
pub const ENV_FORM_UUID: &str = "FORM_ADMIN_FORM_UUID";
pub const ENV_FORM_NAME: &str = "FORM_ADMIN_FORM_NAME";
pub const ENV_FORM_SLUG: &str = "FORM_ADMIN_FORM_SLUG";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "form-admin", "form-admin-tui")
}

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AdminConfig {
    /// Base address of the forms API
    pub api_base: Option<String>,
    /// Path of the form management endpoint
    pub forms_endpoint: Option<String>,
    /// Path of the form definitions listing
    pub form_definitions_endpoint: Option<String>,
    /// Token sent along with mutating requests
    pub csrf_token: Option<String>,
}

impl AdminConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Where the TUI writes its log, if a data directory is available
    pub fn log_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().join("form-admin.log"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Overlay values from `lookup` (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.is_empty()) {
            self.api_base = Some(base);
        }
        if let Some(token) = lookup(ENV_CSRF_TOKEN).filter(|v| !v.is_empty()) {
            self.csrf_token = Some(token);
        }
    }

    /// Resolve the connection settings handed to the API client
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            forms_endpoint: self
                .forms_endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_FORMS_ENDPOINT.to_string()),
            form_definitions_endpoint: self
                .form_definitions_endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_FORM_DEFINITIONS_ENDPOINT.to_string()),
            csrf_token: self.csrf_token.clone(),
        }
    }
}

/// Which form this editing session works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    pub form_uuid: Uuid,
    pub name: String,
    pub slug: String,
    /// No form with this uuid exists server-side yet
    pub is_new: bool,
}

impl SessionParams {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(ENV_FORM_UUID).ok(),
            std::env::var(ENV_FORM_NAME).ok(),
            std::env::var(ENV_FORM_SLUG).ok(),
        )
    }

    /// A missing or unparsable uuid starts a new form under a fresh uuid
    pub fn from_values(uuid: Option<String>, name: Option<String>, slug: Option<String>) -> Self {
        let existing = uuid.as_deref().and_then(|s| Uuid::parse_str(s.trim()).ok());
        Self {
            form_uuid: existing.unwrap_or_else(Uuid::new_v4),
            name: name.unwrap_or_default(),
            slug: slug.unwrap_or_default(),
            is_new: existing.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AdminConfig::default();
        assert!(config.api_base.is_none());
        assert!(config.forms_endpoint.is_none());
        assert!(config.form_definitions_endpoint.is_none());
        assert!(config.csrf_token.is_none());
    }

    #[test]
    fn test_default_api_config() {
        assert_eq!(AdminConfig::default().api_config(), ApiConfig::default());
    }

    #[test]
    fn test_serialization() {
        let config = AdminConfig {
            api_base: Some("https://forms.example.org".to_string()),
            forms_endpoint: Some("/admin/_manage_forms".to_string()),
            form_definitions_endpoint: Some("/api/v2/form-definitions".to_string()),
            csrf_token: Some("abc".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AdminConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let api = parsed.api_config();
        assert_eq!(api.base_url, "https://forms.example.org");
        assert_eq!(api.forms_endpoint, "/admin/_manage_forms");
        assert_eq!(api.csrf_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: AdminConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, AdminConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"api_base": "http://localhost:9000", "unknown_field": "value"}"#;
        let parsed: AdminConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.api_base, Some("http://localhost:9000".to_string()));
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let env: HashMap<&str, &str> = [
            (ENV_API_BASE, "http://override:8000"),
            (ENV_CSRF_TOKEN, "from-env"),
        ]
        .into_iter()
        .collect();

        let mut config = AdminConfig {
            api_base: Some("http://file:8000".to_string()),
            forms_endpoint: Some("/forms".to_string()),
            ..Default::default()
        };
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_base.as_deref(), Some("http://override:8000"));
        assert_eq!(config.csrf_token.as_deref(), Some("from-env"));
        assert_eq!(config.forms_endpoint.as_deref(), Some("/forms"));
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let mut config = AdminConfig {
            api_base: Some("http://file:8000".to_string()),
            ..Default::default()
        };
        config.apply_overrides(|_| Some(String::new()));
        assert_eq!(config.api_base.as_deref(), Some("http://file:8000"));
        assert!(config.csrf_token.is_none());
    }

    #[test]
    fn test_log_path_returns_option() {
        // Just test that the function doesn't panic
        let _path = AdminConfig::log_path();
    }

    #[test]
    fn test_session_for_existing_form() {
        let uuid = Uuid::new_v4();
        let session = SessionParams::from_values(
            Some(uuid.to_string()),
            Some("Intake".to_string()),
            Some("intake".to_string()),
        );
        assert_eq!(session.form_uuid, uuid);
        assert!(!session.is_new);
        assert_eq!(session.name, "Intake");
        assert_eq!(session.slug, "intake");
    }

    #[test]
    fn test_session_without_uuid_is_new() {
        let session = SessionParams::from_values(None, None, None);
        assert!(session.is_new);
        assert!(session.name.is_empty());
        assert_ne!(session.form_uuid, Uuid::nil());
    }

    #[test]
    fn test_session_with_invalid_uuid_is_new() {
        let session = SessionParams::from_values(Some("not-a-uuid".to_string()), None, None);
        assert!(session.is_new);
    }
}
