// ============================================================================
// Middlewares HTTP
// ============================================================================
// - Métriques : durée de chaque requête dans l'histogramme Prometheus
// - Trace : un span par requête + une ligne de log avec statut et latence
// - CORS : lecture de l'API depuis une page d'une autre origine
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::http::Method;
use axum::middleware;
use axum::response::Response;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, Span};

use crate::api::STOCKS_PATH;
use crate::server::metrics::{track_metrics, HttpMetrics};

/// Ajoute les middlewares de métriques, de trace et de CORS au routeur
pub fn apply(router: Router, metrics: Arc<HttpMetrics>) -> Router {
    router
        .layer(middleware::from_fn_with_state(metrics, track_metrics))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %generalize_path(request.uri().path())
                    )
                })
                .on_response(|response: &Response, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_secs_f64() * 1000.0,
                        "Request completed"
                    );
                }),
        )
        .layer(create_cors())
}

/// CORS : toutes origines, lecture seule
pub fn create_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
}

/// Regroupe les chemins d'un même endpoint : /api/stocks/42 -> /api/stocks/*
///
/// Sert d'étiquette `path` à l'histogramme : une série par endpoint, pas par id
pub fn generalize_path(path: &str) -> &str {
    match path.strip_prefix(STOCKS_PATH) {
        Some(rest) if rest.len() > 1 && rest.starts_with('/') => "/api/stocks/*",
        _ => path,
    }
}
