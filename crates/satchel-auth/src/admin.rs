//! Administrator identity and credential verification.

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::AuthError;

/// An authenticated administrator identity, extracted from a validated token.
///
/// Stored in HTTP request extensions by the auth middleware and available to
/// downstream handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    /// The administrator's username (from the token's `sub` claim).
    pub username: String,
}

/// The single configured administrator identity.
///
/// The password is held only as an argon2 PHC hash, supplied through
/// configuration; plaintext never reaches this type outside of `verify`.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password_hash: String,
}

impl AdminCredentials {
    /// Build from the configured username and PHC-format password hash.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Check a login attempt. Both the username and the password must match;
    /// an unparsable configured hash fails closed.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }
        let parsed = match PasswordHash::new(&self.password_hash) {
            Ok(hash) => hash,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Hash a plaintext password into PHC format, for provisioning the
    /// configured hash.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::InvalidHash(e.to_string()))
    }
}
