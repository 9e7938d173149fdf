//! Authentication primitives for Satchel.
//!
//! Provides:
//! - [`AdminCredentials`] — The single configured administrator identity
//! - [`AuthenticatedAdmin`] — Identity extracted from a validated token
//! - [`TokenIssuer`] / [`HsTokenValidator`] — HS256 tokens with a two-hour window
//! - [`TokenValidator`] — Trait for async token validation
//! - [`AuthLayer`] / [`AuthService`] — Tower middleware parameterised over `TokenValidator`
//! - [`AuthError`] — Auth-specific error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod admin;
mod error;
mod middleware;
mod token;

pub use admin::{AdminCredentials, AuthenticatedAdmin};
pub use error::AuthError;
pub use middleware::{AuthLayer, AuthService};
pub use token::{HsTokenValidator, TOKEN_TTL_SECS, TokenIssuer};

/// Trait for validating bearer tokens and extracting the admin identity.
///
/// The middleware calls `validate()` with the bearer token and forwards the
/// request with the authenticated identity attached on success.
pub trait TokenValidator: Send + Sync + 'static {
    /// Validate a token and return the authenticated admin.
    fn validate(
        &self,
        token: &str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<AuthenticatedAdmin, AuthError>> + Send + '_>,
    >;
}
