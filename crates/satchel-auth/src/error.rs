//! Auth-specific error types.

/// Errors that can occur during authentication.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// No Authorization header or bearer token present.
    #[error("missing authentication token")]
    MissingToken,

    /// Token format is invalid (not a valid JWT for this issuer).
    #[error("invalid token format: {0}")]
    InvalidFormat(String),

    /// Token signature verification failed.
    #[error("invalid token signature: {0}")]
    InvalidSignature(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Username/password pair did not match the configured administrator.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The configured password hash is not a valid PHC string.
    #[error("invalid password hash: {0}")]
    InvalidHash(String),

    /// Token signing failed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Whether this error should result in a 401 (vs. a 500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidFormat(_)
                | AuthError::InvalidSignature(_)
                | AuthError::Expired
                | AuthError::InvalidCredentials
        )
    }
}
