//! API server configuration.

use thiserror::Error;

/// Configuration errors raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be defined")]
    MissingSecret,
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// JWT signing secret.
    pub jwt_secret: String,
}

impl ApiConfig {
    /// Builds a config, rejecting an empty signing secret.
    pub fn new(
        bind_addr: impl Into<String>,
        jwt_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(Self {
            bind_addr: bind_addr.into(),
            jwt_secret,
        })
    }

    /// Signing secret as raw bytes for token operations.
    pub fn secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}
