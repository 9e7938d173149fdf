//! HS256 token issuing and validation.
//!
//! Tokens are ordinary JWTs signed with the deployment's shared secret and
//! carry a two-hour validity window.

use std::future::Future;
use std::pin::Pin;

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::admin::AuthenticatedAdmin;
use crate::error::AuthError;
use crate::TokenValidator;

/// Token validity window: two hours.
pub const TOKEN_TTL_SECS: i64 = 2 * 60 * 60;

/// Issuer claim stamped into and required of every token.
const ISSUER: &str = "satchel";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Issues signed admin tokens.
pub struct TokenIssuer {
    key: EncodingKey,
}

impl TokenIssuer {
    /// Create an issuer from the shared signing secret.
    pub fn new(secret: &str) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a token for the given administrator, valid for two hours.
    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: username.to_string(),
            iss: ISSUER.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}

/// Validates HS256 tokens signed with the shared secret.
pub struct HsTokenValidator {
    key: DecodingKey,
}

impl HsTokenValidator {
    /// Create a validator from the shared signing secret.
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    fn check(&self, token: &str) -> Result<AuthenticatedAdmin, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);

        let data = decode::<Claims>(token, &self.key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidIssuer => AuthError::InvalidFormat("invalid issuer".to_string()),
            ErrorKind::InvalidToken => AuthError::InvalidFormat(e.to_string()),
            _ => AuthError::InvalidSignature(e.to_string()),
        })?;

        Ok(AuthenticatedAdmin {
            username: data.claims.sub,
        })
    }
}

impl TokenValidator for HsTokenValidator {
    fn validate(
        &self,
        token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<AuthenticatedAdmin, AuthError>> + Send + '_>> {
        let result = self.check(token);
        Box::pin(async move { result })
    }
}
