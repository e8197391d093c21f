use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Admin credentials for the management commands. Optional: the public
/// lookup and booking commands never need them.
#[derive(Debug, Default, Deserialize)]
pub struct AdminConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Load configuration from config.toml and environment variables
pub fn load() -> Config {
    Figment::new()
        .merge(Toml::file("config.toml"))
        // Use double-underscore nesting for snake_case keys
        .merge(Env::prefixed("JYOTISH_").split("__"))
        .extract()
        .expect("Failed to load configuration")
}

/// Validate configuration and return a user-friendly error
pub fn validate(config: &Config) -> Result<(), String> {
    let api = &config.api;

    if api.base_url.trim().is_empty() {
        return Err("api.base_url is required".into());
    }

    if !api.base_url.starts_with("http://") && !api.base_url.starts_with("https://") {
        return Err("api.base_url must start with http:// or https://".into());
    }

    if api.timeout_seconds == 0 {
        return Err("api.timeout_seconds must be greater than 0".into());
    }

    Ok(())
}

/// A sanitized view of AdminConfig safe for logging
#[derive(Debug)]
#[allow(dead_code)]
pub struct SanitizedAdminConfig {
    pub username: String,
    pub password: String,
}

impl AdminConfig {
    pub fn sanitized_for_log(&self) -> SanitizedAdminConfig {
        SanitizedAdminConfig {
            username: self.username.clone().unwrap_or_else(|| "<not set>".into()),
            password: if self.password.is_some() {
                "******".into()
            } else {
                "<not set>".into()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            api: ApiConfig::default(),
            admin: AdminConfig::default(),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&base_config()).is_ok());
    }

    #[test]
    fn rejects_empty_base_url() {
        let mut config = base_config();
        config.api.base_url = "  ".into();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = base_config();
        config.api.base_url = "localhost:5000".into();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = base_config();
        config.api.timeout_seconds = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn log_view_masks_password() {
        let admin = AdminConfig {
            username: Some("admin".into()),
            password: Some("hunter2".into()),
        };

        let sanitized = admin.sanitized_for_log();
        assert_eq!(sanitized.username, "admin");
        assert_eq!(sanitized.password, "******");
    }
}
