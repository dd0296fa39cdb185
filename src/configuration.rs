//! Environment-driven configuration.

use std::env;
use std::net::SocketAddr;

use serde::Deserialize;
use thiserror::Error;

const LISTEN_ADDRESS_VAR: &str = "LISTEN_ADDRESS";
const JWT_SECRET_VAR: &str = "JWT_SECRET";
const SYSTEM_SECRET_VAR: &str = "SYSTEM_SECRET";

#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The signing secret has no safe default.
    #[error("`JWT_SECRET` must be set in the environment")]
    MissingJwtSecret,

    #[error("invalid listen address `{value}`: {error}")]
    InvalidListenAddress {
        value: String,
        error: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    /// Address the GraphQL endpoint binds to.
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// HS256 secret for credential signing and verification.
    pub jwt_secret: String,
    /// The single fixed password accepted at credential issuance.
    #[serde(default = "default_system_secret")]
    pub system_secret: String,
}

impl Configuration {
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let listen = match env::var(LISTEN_ADDRESS_VAR) {
            Ok(value) => value
                .parse()
                .map_err(|error| ConfigurationError::InvalidListenAddress { value, error })?,
            Err(_) => default_listen(),
        };
        let jwt_secret =
            env::var(JWT_SECRET_VAR).map_err(|_| ConfigurationError::MissingJwtSecret)?;
        let system_secret = env::var(SYSTEM_SECRET_VAR).unwrap_or_else(|_| default_system_secret());
        Ok(Self {
            listen,
            jwt_secret,
            system_secret,
        })
    }
}

fn default_listen() -> SocketAddr {
    ([127, 0, 0, 1], 4000).into()
}

fn default_system_secret() -> String {
    "secret".to_string()
}
