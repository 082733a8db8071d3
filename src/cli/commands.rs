//! CLI command implementations

use anyhow::Result;
use rand::distr::Alphanumeric;
use rand::RngExt;
use std::fs;

use crate::api;
use crate::cli::{error, info, success, warn};
use crate::config;

/// Initialize a new bookshelf.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("bookshelf.toml");

    if config_path.exists() {
        warn("bookshelf.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content(&generate_secret(), &generate_secret());
    fs::write(config_path, content)?;

    success("Created bookshelf.toml with fresh signing secrets");
    info("Run 'bookshelf serve' to start the API");

    Ok(())
}

/// Run the HTTP API server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = config::load_config()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting server on {}:{}", host, port));

    if let Err(e) = api::run_server(config, &host, port).await {
        error(&format!("Server error: {}", e));
        return Err(e.into());
    }

    Ok(())
}

/// Generate a random signing secret for the starter config
fn generate_secret() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}
