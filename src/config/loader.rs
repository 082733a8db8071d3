//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;

use super::Config;

const CONFIG_FILENAME: &str = "bookshelf.toml";

/// Load configuration from bookshelf.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<std::path::PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a starter configuration file with the given signing secrets
pub fn default_config_content(access_secret: &str, refresh_secret: &str) -> String {
    format!(
        r#"# Bookshelf Configuration

[server]
host = "0.0.0.0"
port = 4000
# Allow a browser frontend to send the refresh cookie cross-origin:
# cors_origin = "http://localhost:3000"

[auth]
# Secrets may also be supplied through the environment:
# access_secret = "${{ACCESS_TOKEN_SECRET}}"
# refresh_secret = "${{REFRESH_TOKEN_SECRET}}"
access_secret = "{access_secret}"
refresh_secret = "{refresh_secret}"
access_ttl_minutes = 15
refresh_ttl_days = 7

# Seed an admin account at startup (registration only creates regular users)
# admin_email = "admin@example.com"
# admin_password = "change-me"
"#
    )
}
