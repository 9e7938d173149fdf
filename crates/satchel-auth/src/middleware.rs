//! Tower authentication middleware.
//!
//! `AuthLayer` and `AuthService` wrap any inner service with bearer-token
//! validation. Generic over `TokenValidator` — plug in any token scheme.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::{Request, StatusCode};
use tower::{Layer, Service};

use crate::TokenValidator;

/// Tower `Layer` that wraps services with bearer-token authentication.
pub struct AuthLayer<V: TokenValidator> {
    validator: Arc<V>,
}

impl<V: TokenValidator> Clone for AuthLayer<V> {
    fn clone(&self) -> Self {
        Self {
            validator: self.validator.clone(),
        }
    }
}

impl<V: TokenValidator> AuthLayer<V> {
    /// Create a new auth layer with the given validator.
    pub fn new(validator: Arc<V>) -> Self {
        Self { validator }
    }
}

impl<V: TokenValidator, S> Layer<S> for AuthLayer<V> {
    type Service = AuthService<V, S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            validator: self.validator.clone(),
        }
    }
}

/// Tower `Service` that validates bearer tokens before forwarding requests.
///
/// On successful validation, inserts [`crate::AuthenticatedAdmin`] into
/// request extensions where it's available to downstream handlers.
pub struct AuthService<V: TokenValidator, S> {
    inner: S,
    validator: Arc<V>,
}

impl<V: TokenValidator, S: Clone> Clone for AuthService<V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            validator: self.validator.clone(),
        }
    }
}

impl<V, S> Service<Request<Body>> for AuthService<V, S>
where
    V: TokenValidator,
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let validator = self.validator.clone();

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(t) => t.to_string(),
                None => return Ok(unauthorized_response("missing or invalid bearer token")),
            };

            match validator.validate(&token).await {
                Ok(admin) => {
                    req.extensions_mut().insert(admin);
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                Err(auth_err) => {
                    log::warn!("authentication failed: {auth_err}");
                    Ok(unauthorized_response(&auth_err.to_string()))
                }
            }
        })
    }
}

/// Extract the bearer token from the Authorization header.
fn extract_bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Build a 401 Unauthorized response with a JSON error body.
fn unauthorized_response(message: &str) -> axum::response::Response {
    let body = serde_json::json!({
        "error": {
            "category": "authentication",
            "message": message,
        }
    });

    (
        StatusCode::UNAUTHORIZED,
        [(http::header::CONTENT_TYPE, "application/json")],
        serde_json::to_string(&body).unwrap_or_default(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AuthError, AuthenticatedAdmin};
    use std::sync::Mutex;
    use tower::ServiceExt;

    // A simple test validator that accepts "valid-token" and rejects everything else.
    struct TestValidator;

    impl TokenValidator for TestValidator {
        fn validate(
            &self,
            token: &str,
        ) -> Pin<Box<dyn Future<Output = Result<AuthenticatedAdmin, AuthError>> + Send + '_>>
        {
            let token = token.to_string();
            Box::pin(async move {
                if token == "valid-token" {
                    Ok(AuthenticatedAdmin {
                        username: "admin".to_string(),
                    })
                } else {
                    Err(AuthError::InvalidSignature("bad token".to_string()))
                }
            })
        }
    }

    /// Mock inner service that captures the AuthenticatedAdmin.
    #[derive(Clone)]
    struct MockService {
        captured_admin: Arc<Mutex<Option<AuthenticatedAdmin>>>,
    }

    impl MockService {
        fn new() -> Self {
            Self {
                captured_admin: Arc::new(Mutex::new(None)),
            }
        }
    }

    impl Service<Request<Body>> for MockService {
        type Response = axum::response::Response;
        type Error = Infallible;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<Body>) -> Self::Future {
            let captured = self.captured_admin.clone();
            Box::pin(async move {
                let admin = req.extensions().get::<AuthenticatedAdmin>().cloned();
                *captured.lock().unwrap() = admin;
                Ok((StatusCode::OK, "ok").into_response())
            })
        }
    }

    #[test]
    fn test_extract_bearer_token_valid() {
        let req = Request::builder()
            .header("Authorization", "Bearer my-token-123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract_bearer_token(&req), Some("my-token-123"));
    }

    #[test]
    fn test_extract_bearer_token_missing() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(extract_bearer_token(&req), None);
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        let req = Request::builder()
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract_bearer_token(&req), None);
    }

    #[test]
    fn test_unauthorized_response_status() {
        let resp = unauthorized_response("test error");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_middleware_missing_token_returns_401() {
        let mock = MockService::new();
        let layer = AuthLayer::new(Arc::new(TestValidator));
        let service = layer.layer(mock);

        let req = Request::builder().body(Body::empty()).unwrap();
        let resp = service.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_middleware_invalid_token_returns_401() {
        let mock = MockService::new();
        let layer = AuthLayer::new(Arc::new(TestValidator));
        let service = layer.layer(mock);

        let req = Request::builder()
            .header("Authorization", "Bearer bad-token")
            .body(Body::empty())
            .unwrap();
        let resp = service.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_middleware_valid_token_passes_and_injects_admin() {
        let mock = MockService::new();
        let captured = mock.captured_admin.clone();
        let layer = AuthLayer::new(Arc::new(TestValidator));
        let service = layer.layer(mock);

        let req = Request::builder()
            .header("Authorization", "Bearer valid-token")
            .body(Body::empty())
            .unwrap();
        let resp = service.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let admin = captured.lock().unwrap();
        let admin = admin.as_ref().expect("AuthenticatedAdmin should be present");
        assert_eq!(admin.username, "admin");
    }
}
