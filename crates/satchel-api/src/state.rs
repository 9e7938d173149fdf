//! Shared application state.

use satchel_auth::{AdminCredentials, TokenIssuer};
use satchel_store::RecordStore;

/// State shared by all request handlers, behind an `Arc`.
pub struct AppState {
    /// The student record store.
    pub store: RecordStore,
    /// Issues admin tokens after a successful login.
    pub issuer: TokenIssuer,
    /// The configured administrator identity.
    pub credentials: AdminCredentials,
}
