//! Router assembly and server entry point.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use satchel_auth::{AdminCredentials, AuthLayer, HsTokenValidator, TokenIssuer};
use satchel_store::RecordStore;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::routes;
use crate::state::AppState;

/// Build the application router.
///
/// The upload and bulk-download routes sit behind the bearer-token layer;
/// login, single-student report retrieval, and liveness do not.
pub fn build_router(
    state: Arc<AppState>,
    validator: Arc<HsTokenValidator>,
    allowed_origin: Option<&str>,
) -> Result<Router> {
    let cors = match allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>().map_err(|e| Error::Config {
                message: format!("allowed origin is not a valid header value: {e}"),
            })?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    };

    let protected = Router::new()
        .route("/upload", post(routes::upload))
        .route(
            "/api/bulkDownload/{class}/{section}",
            get(routes::bulk_download),
        )
        .layer(AuthLayer::new(validator));

    Ok(Router::new()
        .route("/", get(routes::health))
        .route("/admin/login", post(routes::login))
        .route("/getReport", post(routes::get_report))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

/// Open the store, assemble the router, and serve until shutdown.
pub async fn run(config: Config) -> Result<()> {
    let store = RecordStore::open(&config.db_path)?;
    let state = Arc::new(AppState {
        store,
        issuer: TokenIssuer::new(&config.token_secret),
        credentials: AdminCredentials::new(
            config.admin_username.clone(),
            config.admin_password_hash.clone(),
        ),
    });
    let validator = Arc::new(HsTokenValidator::new(&config.token_secret));

    let app = build_router(state, validator, config.allowed_origin.as_deref())?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
