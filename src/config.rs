//! Configuration management for the HubSpot deal-flow client.
//!
//! Configuration is loaded once from environment variables (and an optional
//! `.env` file) and handed to the client at construction. Nothing here is
//! read again after that.

use crate::error::{ConfigError, ConfigResult};
use std::env;

pub const DEFAULT_API_BASE_URL: &str = "https://api.hubapi.com";
pub const DEFAULT_APP_BASE_URL: &str = "https://app.hubspot.com";

/// How the credential is attached to each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Legacy API key as the `hapikey` query parameter
    #[default]
    QueryParam,

    /// Private app token as an `Authorization: Bearer` header
    Bearer,
}

/// Settings for creating deal-flow cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealFlowSettings {
    /// Stage new cards start in
    pub starting_stage: String,

    /// Pipeline new cards are created in
    pub pipeline: String,

    /// HubSpot owner assigned to new cards
    pub owner_id: String,
}

/// Configuration for the HubSpot client.
#[derive(Debug, Clone)]
pub struct Config {
    /// HubSpot API base URL
    pub api_base_url: String,

    /// HubSpot app base URL, used to build file preview links
    pub app_base_url: String,

    /// API key or private app token
    pub api_key: String,

    pub auth_mode: AuthMode,

    /// Portal (hub) id; required for file uploads
    pub portal_id: Option<String>,

    /// Default form for submission searches
    pub form_id: Option<String>,

    /// Required for deal-flow card creation
    pub deal_flow: Option<DealFlowSettings>,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Upper bound on pages fetched by one submission search (default: 200)
    pub max_submission_pages: usize,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Create a configuration with defaults for everything but the credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            ..Config::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `HUBSPOT_API_KEY`: API key or private app token
    ///
    /// Optional environment variables:
    /// - `HUBSPOT_AUTH_MODE`: `hapikey` or `bearer` (default: `hapikey`)
    /// - `HUBSPOT_API_BASE_URL`: API base URL (default: `https://api.hubapi.com`)
    /// - `HUBSPOT_APP_BASE_URL`: app base URL (default: `https://app.hubspot.com`)
    /// - `HUBSPOT_PORTAL_ID`: portal id used in file preview links
    /// - `HUBSPOT_FORM_ID`: default form for submission searches
    /// - `DEALFLOW_STARTING_STAGE`, `DEALFLOW_PIPELINE_NAME`, `DEALFLOW_OWNER_ID`:
    ///   deal-flow card settings, all or none
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `HUBSPOT_MAX_SUBMISSION_PAGES`: page ceiling for submission searches (default: 200)
    /// - `LOG_LEVEL`: logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_vars()
    }

    /// Read configuration from the process environment without touching `.env`.
    pub fn from_vars() -> ConfigResult<Self> {
        let api_key = env::var("HUBSPOT_API_KEY")
            .map_err(|_| ConfigError::MissingVar("HUBSPOT_API_KEY".to_string()))?;

        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "HUBSPOT_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let auth_mode = match env::var("HUBSPOT_AUTH_MODE") {
            Ok(mode) => Self::parse_auth_mode(&mode)?,
            Err(_) => AuthMode::default(),
        };

        let api_base_url = Self::parse_url("HUBSPOT_API_BASE_URL", DEFAULT_API_BASE_URL)?;
        let app_base_url = Self::parse_url("HUBSPOT_APP_BASE_URL", DEFAULT_APP_BASE_URL)?;

        let portal_id = Self::optional_var("HUBSPOT_PORTAL_ID");
        let form_id = Self::optional_var("HUBSPOT_FORM_ID");
        let deal_flow = Self::parse_deal_flow()?;

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let max_submission_pages = Self::parse_env_usize("HUBSPOT_MAX_SUBMISSION_PAGES", 200)?;

        if max_submission_pages == 0 {
            return Err(ConfigError::InvalidValue {
                var: "HUBSPOT_MAX_SUBMISSION_PAGES".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_base_url,
            app_base_url,
            api_key,
            auth_mode,
            portal_id,
            form_id,
            deal_flow,
            request_timeout,
            max_submission_pages,
            log_level,
        })
    }

    /// Portal id, or the error to surface when an operation needs it.
    pub fn require_portal_id(&self) -> ConfigResult<&str> {
        self.portal_id
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("HUBSPOT_PORTAL_ID".to_string()))
    }

    /// Deal-flow settings, or the error to surface when an operation needs them.
    pub fn require_deal_flow(&self) -> ConfigResult<&DealFlowSettings> {
        self.deal_flow
            .as_ref()
            .ok_or_else(|| ConfigError::MissingVar("DEALFLOW_STARTING_STAGE".to_string()))
    }

    fn parse_auth_mode(value: &str) -> ConfigResult<AuthMode> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hapikey" | "query" => Ok(AuthMode::QueryParam),
            "bearer" | "token" => Ok(AuthMode::Bearer),
            other => Err(ConfigError::InvalidValue {
                var: "HUBSPOT_AUTH_MODE".to_string(),
                reason: format!("Must be 'hapikey' or 'bearer', got: {}", other),
            }),
        }
    }

    fn parse_url(var_name: &str, default: &str) -> ConfigResult<String> {
        let url = env::var(var_name).unwrap_or_else(|_| default.to_string());
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(url)
    }

    fn parse_deal_flow() -> ConfigResult<Option<DealFlowSettings>> {
        const VARS: [&str; 3] = [
            "DEALFLOW_STARTING_STAGE",
            "DEALFLOW_PIPELINE_NAME",
            "DEALFLOW_OWNER_ID",
        ];

        if VARS.iter().all(|var| Self::optional_var(var).is_none()) {
            return Ok(None);
        }

        // Partially configured deal flow is an error rather than silently disabled
        let required =
            |var: &str| Self::optional_var(var).ok_or_else(|| ConfigError::MissingVar(var.to_string()));

        Ok(Some(DealFlowSettings {
            starting_stage: required(VARS[0])?,
            pipeline: required(VARS[1])?,
            owner_id: required(VARS[2])?,
        }))
    }

    fn optional_var(var_name: &str) -> Option<String> {
        env::var(var_name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            app_base_url: DEFAULT_APP_BASE_URL.to_string(),
            api_key: String::new(),
            auth_mode: AuthMode::default(),
            portal_id: None,
            form_id: None,
            deal_flow: None,
            request_timeout: 10,
            max_submission_pages: 200,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const ALL_VARS: [&str; 12] = [
        "HUBSPOT_API_KEY",
        "HUBSPOT_AUTH_MODE",
        "HUBSPOT_API_BASE_URL",
        "HUBSPOT_APP_BASE_URL",
        "HUBSPOT_PORTAL_ID",
        "HUBSPOT_FORM_ID",
        "DEALFLOW_STARTING_STAGE",
        "DEALFLOW_PIPELINE_NAME",
        "DEALFLOW_OWNER_ID",
        "REQUEST_TIMEOUT",
        "HUBSPOT_MAX_SUBMISSION_PAGES",
        "LOG_LEVEL",
    ];

    // Clears every variable on creation and on drop
    struct EnvGuard;

    impl EnvGuard {
        fn new() -> Self {
            for var in ALL_VARS {
                env::remove_var(var);
            }
            EnvGuard
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in ALL_VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://api.hubapi.com");
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.max_submission_pages, 200);
        assert_eq!(config.auth_mode, AuthMode::QueryParam);
        assert!(config.portal_id.is_none());
    }

    #[test]
    #[serial]
    fn test_config_missing_api_key() {
        let _guard = EnvGuard::new();

        match Config::from_vars() {
            Err(ConfigError::MissingVar(var)) => assert_eq!(var, "HUBSPOT_API_KEY"),
            other => panic!("Expected MissingVar error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_empty_api_key() {
        let mut guard = EnvGuard::new();
        guard.set("HUBSPOT_API_KEY", "   ");

        match Config::from_vars() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "HUBSPOT_API_KEY"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("HUBSPOT_API_KEY", "key");
        guard.set("HUBSPOT_API_BASE_URL", "not-a-url");

        match Config::from_vars() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "HUBSPOT_API_BASE_URL"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_valid() {
        let mut guard = EnvGuard::new();
        guard.set("HUBSPOT_API_KEY", "key-123");
        guard.set("HUBSPOT_AUTH_MODE", "Bearer");
        guard.set("HUBSPOT_PORTAL_ID", "8458264");
        guard.set("HUBSPOT_MAX_SUBMISSION_PAGES", "25");
        guard.set("DEALFLOW_STARTING_STAGE", "stage");
        guard.set("DEALFLOW_PIPELINE_NAME", "pipeline");
        guard.set("DEALFLOW_OWNER_ID", "owner");

        let config = Config::from_vars().unwrap();
        assert_eq!(config.api_key, "key-123");
        assert_eq!(config.auth_mode, AuthMode::Bearer);
        assert_eq!(config.portal_id.as_deref(), Some("8458264"));
        assert_eq!(config.max_submission_pages, 25);
        assert_eq!(
            config.deal_flow,
            Some(DealFlowSettings {
                starting_stage: "stage".to_string(),
                pipeline: "pipeline".to_string(),
                owner_id: "owner".to_string(),
            })
        );
        assert_eq!(config.require_portal_id().unwrap(), "8458264");
    }

    #[test]
    #[serial]
    fn test_config_partial_deal_flow() {
        let mut guard = EnvGuard::new();
        guard.set("HUBSPOT_API_KEY", "key");
        guard.set("DEALFLOW_STARTING_STAGE", "stage");

        match Config::from_vars() {
            Err(ConfigError::MissingVar(var)) => assert_eq!(var, "DEALFLOW_PIPELINE_NAME"),
            other => panic!("Expected MissingVar error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_auth_mode_and_page_limit() {
        let mut guard = EnvGuard::new();
        guard.set("HUBSPOT_API_KEY", "key");
        guard.set("HUBSPOT_AUTH_MODE", "oauth");
        assert!(matches!(
            Config::from_vars(),
            Err(ConfigError::InvalidValue { ref var, .. }) if var == "HUBSPOT_AUTH_MODE"
        ));

        guard.set("HUBSPOT_AUTH_MODE", "hapikey");
        guard.set("HUBSPOT_MAX_SUBMISSION_PAGES", "0");
        assert!(matches!(
            Config::from_vars(),
            Err(ConfigError::InvalidValue { ref var, .. }) if var == "HUBSPOT_MAX_SUBMISSION_PAGES"
        ));
    }

    #[test]
    fn test_require_missing_settings() {
        let config = Config::new("key");
        assert!(config.require_portal_id().is_err());
        assert!(config.require_deal_flow().is_err());
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("REQUEST_TIMEOUT", "42");
        assert_eq!(Config::parse_env_u64("REQUEST_TIMEOUT", 10).unwrap(), 42);

        guard.set("REQUEST_TIMEOUT", "not-a-number");
        assert!(Config::parse_env_u64("REQUEST_TIMEOUT", 10).is_err());

        env::remove_var("REQUEST_TIMEOUT");
        assert_eq!(Config::parse_env_u64("REQUEST_TIMEOUT", 10).unwrap(), 10);
    }
}
