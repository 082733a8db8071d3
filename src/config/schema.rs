//! Configuration schema definitions

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// When set, CORS allows exactly this origin and sends credentials.
    /// When unset, any origin is accepted and cookies stay same-origin.
    #[serde(default)]
    pub cors_origin: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: None,
        }
    }
}

/// Token and session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign access tokens
    #[serde(default = "default_access_secret")]
    pub access_secret: String,

    /// Secret used to sign refresh tokens, independent of the access secret
    #[serde(default = "default_refresh_secret")]
    pub refresh_secret: String,

    /// Access token time-to-live in minutes
    #[serde(default = "default_access_ttl_minutes")]
    pub access_ttl_minutes: i64,

    /// Refresh token time-to-live in days
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_ttl_days: i64,

    /// Optional admin account seeded at server startup.
    /// Registration only ever creates regular users.
    #[serde(default)]
    pub admin_email: Option<String>,

    #[serde(default)]
    pub admin_password: Option<String>,
}

fn default_access_secret() -> String {
    "bookshelf-access-secret-change-in-production".to_string()
}

fn default_refresh_secret() -> String {
    "bookshelf-refresh-secret-change-in-production".to_string()
}

fn default_access_ttl_minutes() -> i64 {
    15
}

fn default_refresh_ttl_days() -> i64 {
    7
}

impl AuthConfig {
    /// Access token lifetime
    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_ttl_minutes)
    }

    /// Refresh token lifetime
    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_ttl_days)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: default_access_secret(),
            refresh_secret: default_refresh_secret(),
            access_ttl_minutes: default_access_ttl_minutes(),
            refresh_ttl_days: default_refresh_ttl_days(),
            admin_email: None,
            admin_password: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.auth.access_ttl_minutes, 15);
        assert_eq!(config.auth.refresh_ttl_days, 7);
        assert!(config.auth.admin_email.is_none());
    }

    #[test]
    fn test_distinct_default_secrets() {
        let config = Config::default();
        assert_ne!(config.auth.access_secret, config.auth.refresh_secret);
    }

    #[test]
    fn test_ttl_conversion() {
        let auth = AuthConfig::default();
        assert_eq!(auth.access_ttl(), Duration::minutes(15));
        assert_eq!(auth.refresh_ttl(), Duration::days(7));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize config");
        let parsed: Config = toml::from_str(&toml_str).expect("Failed to parse config");
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.auth.access_secret, config.auth.access_secret);
    }
}
