//! Environment-driven configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Deployment configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Path of the embedded record database.
    pub db_path: PathBuf,
    /// Shared secret signing admin tokens.
    pub token_secret: String,
    /// The administrator's username.
    pub admin_username: String,
    /// The administrator's password, as an argon2 PHC hash.
    pub admin_password_hash: String,
    /// Allowed cross-origin caller, if restricted.
    pub allowed_origin: Option<String>,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `SATCHEL_TOKEN_SECRET`, `SATCHEL_ADMIN_USERNAME`, and
    /// `SATCHEL_ADMIN_PASSWORD_HASH` are required; everything else has a
    /// default.
    pub fn from_env() -> Result<Self> {
        let bind_addr = optional("SATCHEL_BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:5000".to_string())
            .parse()
            .map_err(|e| Error::Config {
                message: format!("SATCHEL_BIND_ADDR is not a socket address: {e}"),
            })?;

        Ok(Self {
            bind_addr,
            db_path: optional("SATCHEL_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("satchel.redb")),
            token_secret: required("SATCHEL_TOKEN_SECRET")?,
            admin_username: required("SATCHEL_ADMIN_USERNAME")?,
            admin_password_hash: required("SATCHEL_ADMIN_PASSWORD_HASH")?,
            allowed_origin: optional("SATCHEL_ALLOWED_ORIGIN"),
        })
    }
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn required(name: &'static str) -> Result<String> {
    optional(name).ok_or(Error::Config {
        message: format!("{name} must be set"),
    })
}
