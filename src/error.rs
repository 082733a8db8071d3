//! Error types for Bookshelf

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found. Run 'bookshelf init' first.")]
    ConfigNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("You need to login")]
    MissingCredential,

    #[error("Invalid authorization header")]
    MalformedCredential,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Not authorized")]
    NotAuthorized,

    #[error("Unknown identity")]
    UnknownIdentity,

    #[error("User '{0}' already exists")]
    DuplicateIdentity(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Refresh token does not match the current session")]
    RefreshRejected,

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
