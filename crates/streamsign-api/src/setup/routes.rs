//! Route configuration and setup.

use crate::error::log_error;
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use streamsign_core::{AppError, Config};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeader;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::trace::TraceLayer;
use tracing::Span;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Anything not matched below is a file under the static directory.
    let static_files = SetResponseHeader::overriding(
        ServeDir::new(config.static_dir()),
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );

    let app = Router::new()
        .route("/playlist", get(handlers::playlist::get_playlist))
        .route("/video", get(handlers::player::watch_video))
        .route("/stream", get(handlers::player::stream_page))
        .route("/health", get(handlers::health::liveness_check))
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http().on_failure(on_response_failure))
        .with_state(state);

    Ok(app)
}

/// Failures that surface after the handler has returned: the response body errored while
/// being sent. 5xx statuses are already logged by `HttpAppError`.
fn response_failure(failure: ServerErrorsFailureClass) -> Option<AppError> {
    match failure {
        ServerErrorsFailureClass::StatusCode(_) => None,
        ServerErrorsFailureClass::Error(reason) => Some(AppError::WriteFailed(reason)),
    }
}

fn on_response_failure(failure: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    if let Some(err) = response_failure(failure) {
        tracing::debug!(latency_ms = latency.as_millis() as u64, "Response failed after headers");
        log_error(&err);
    }
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
