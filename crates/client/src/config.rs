//! Runtime configuration
//!
//! Values come from `CAREADMIN_*` environment variables; `main` lets
//! command-line flags override a few of them. Every value has a default
//! except the optional request timeout and registry file.

use careadmin_core::{AdminError, AdminResult, Validatable};
use envconfig::Envconfig;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Default backend origin
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Default notification lifetime in milliseconds
pub const DEFAULT_NOTIFY_MS: u64 = 3000;

/// Admin panel configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    /// Backend origin every endpoint path is appended to
    pub api_base: String,
    /// How long a notification stays visible
    pub notify_ms: u64,
    /// Per-request timeout; none means wait indefinitely
    pub request_timeout: Option<Duration>,
    /// Registry file replacing the built-in tables
    pub schema_file: Option<PathBuf>,
    pub window_title: String,
    pub window_width: f64,
    pub window_height: f64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            notify_ms: DEFAULT_NOTIFY_MS,
            request_timeout: None,
            schema_file: None,
            window_title: "Care Admin".to_string(),
            window_width: 1280.0,
            window_height: 800.0,
        }
    }
}

/// Raw `CAREADMIN_*` variables as read from the environment
#[derive(Envconfig)]
struct EnvSettings {
    #[envconfig(from = "CAREADMIN_API_BASE", default = "http://127.0.0.1:8000")]
    api_base: String,

    #[envconfig(from = "CAREADMIN_NOTIFY_MS", default = "3000")]
    notify_ms: u64,

    #[envconfig(from = "CAREADMIN_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    #[envconfig(from = "CAREADMIN_SCHEMA_FILE")]
    schema_file: Option<PathBuf>,

    #[envconfig(from = "CAREADMIN_WINDOW_TITLE", default = "Care Admin")]
    window_title: String,

    #[envconfig(from = "CAREADMIN_WINDOW_WIDTH", default = "1280")]
    window_width: f64,

    #[envconfig(from = "CAREADMIN_WINDOW_HEIGHT", default = "800")]
    window_height: f64,
}

impl From<EnvSettings> for AdminConfig {
    fn from(env: EnvSettings) -> Self {
        Self {
            api_base: env.api_base.trim().trim_end_matches('/').to_string(),
            notify_ms: env.notify_ms,
            request_timeout: env.request_timeout_secs.map(Duration::from_secs),
            schema_file: env.schema_file.filter(|p| !p.as_os_str().is_empty()),
            window_title: env.window_title,
            window_width: env.window_width,
            window_height: env.window_height,
        }
    }
}

fn invalid(e: envconfig::Error) -> AdminError {
    AdminError::InvalidConfig(e.to_string())
}

impl AdminConfig {
    /// Read configuration from the process environment
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `CAREADMIN_API_BASE` | `http://127.0.0.1:8000` |
    /// | `CAREADMIN_NOTIFY_MS` | `3000` |
    /// | `CAREADMIN_REQUEST_TIMEOUT_SECS` | none |
    /// | `CAREADMIN_SCHEMA_FILE` | none (built-in tables) |
    /// | `CAREADMIN_WINDOW_TITLE` | `Care Admin` |
    /// | `CAREADMIN_WINDOW_WIDTH` / `_HEIGHT` | `1280` / `800` |
    pub fn from_env() -> AdminResult<Self> {
        let config: Self = EnvSettings::init_from_env().map_err(invalid)?.into();
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a map of variables instead of the environment
    pub fn from_vars(vars: &HashMap<String, String>) -> AdminResult<Self> {
        let config: Self = EnvSettings::init_from_hashmap(vars).map_err(invalid)?.into();
        config.validate()?;
        Ok(config)
    }
}

impl Validatable for AdminConfig {
    fn validate(&self) -> AdminResult<()> {
        let url = reqwest::Url::parse(&self.api_base).map_err(|e| {
            AdminError::InvalidConfig(format!("CAREADMIN_API_BASE '{}': {}", self.api_base, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AdminError::InvalidConfig(format!(
                "CAREADMIN_API_BASE must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        if self.notify_ms == 0 {
            return Err(AdminError::InvalidConfig(
                "CAREADMIN_NOTIFY_MS must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(AdminError::InvalidConfig(
                "CAREADMIN_REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        if self.window_width <= 0.0 || self.window_height <= 0.0 {
            return Err(AdminError::InvalidConfig(
                "window size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AdminConfig::from_vars(&vars(&[])).unwrap();
        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.notify_ms, DEFAULT_NOTIFY_MS);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_overrides() {
        let config = AdminConfig::from_vars(&vars(&[
            ("CAREADMIN_API_BASE", "https://care.example.kz/api/"),
            ("CAREADMIN_NOTIFY_MS", "1500"),
            ("CAREADMIN_REQUEST_TIMEOUT_SECS", "20"),
            ("CAREADMIN_SCHEMA_FILE", "tables.json"),
            ("CAREADMIN_WINDOW_WIDTH", "1024"),
        ]))
        .unwrap();

        assert_eq!(config.api_base, "https://care.example.kz/api");
        assert_eq!(config.notify_ms, 1500);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(20)));
        assert_eq!(config.schema_file, Some(PathBuf::from("tables.json")));
        assert_eq!(config.window_width, 1024.0);
        assert_eq!(config.window_height, 800.0);
    }

    #[test]
    fn test_parse_errors() {
        let err = AdminConfig::from_vars(&vars(&[("CAREADMIN_NOTIFY_MS", "soon")])).unwrap_err();
        assert!(matches!(err, AdminError::InvalidConfig(ref m) if m.contains("CAREADMIN_NOTIFY_MS")));

        let err = AdminConfig::from_vars(&vars(&[("CAREADMIN_API_BASE", "ftp://files")])).unwrap_err();
        assert!(matches!(err, AdminError::InvalidConfig(_)));

        let err =
            AdminConfig::from_vars(&vars(&[("CAREADMIN_REQUEST_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }
}
