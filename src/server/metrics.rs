// ============================================================================
// Métriques Prometheus
// ============================================================================
// Un histogramme des durées de requêtes HTTP, étiqueté par méthode, chemin
// généralisé (/api/stocks/42 -> /api/stocks/*) et statut.
//
// Exposé au format texte Prometheus sur GET /metrics, par exemple :
//   http_request_duration_seconds_bucket{method="POST",path="/api/stocks",status="201",le="0.5"} 1
//
// CONCEPTS RUST :
// 1. Registry propre à chaque HttpMetrics, pas le registre global
// 2. Middleware axum::middleware::from_fn_with_state : mesure autour de next.run()
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{Encoder, HistogramOpts, HistogramVec, Registry, TextEncoder};
use tracing::trace;

use crate::server::layers::generalize_path;

/// Nom de la série exposée
pub const REQUEST_DURATION_METRIC: &str = "http_request_duration_seconds";

/// Étiquettes de l'histogramme, dans l'ordre de `with_label_values`
const LABELS: [&str; 3] = ["method", "path", "status"];

/// Bornes des buckets : 1, 2 et 5 fois 10^-4 .. 10 secondes
pub fn duration_buckets() -> Vec<f64> {
    [0.0001, 0.001, 0.01, 0.1, 1.0, 10.0]
        .iter()
        .flat_map(|scale| [1.0, 2.0, 5.0].map(|factor| scale * factor))
        .collect()
}

/// Registre et histogramme des requêtes HTTP
#[derive(Clone)]
pub struct HttpMetrics {
    registry: Registry,
    request_duration: HistogramVec,
}

impl fmt::Debug for HttpMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpMetrics")
            .field("metric", &REQUEST_DURATION_METRIC)
            .finish()
    }
}

impl HttpMetrics {
    pub fn new() -> Result<Self> {
        let opts = HistogramOpts::new(
            REQUEST_DURATION_METRIC,
            "Duration of HTTP request in seconds",
        )
        .buckets(duration_buckets());
        let request_duration =
            HistogramVec::new(opts, &LABELS).context("Histogramme des requêtes invalide")?;

        let registry = Registry::new();
        registry
            .register(Box::new(request_duration.clone()))
            .context("Échec de l'enregistrement de l'histogramme")?;

        Ok(Self {
            registry,
            request_duration,
        })
    }

    /// Enregistre la durée d'une requête
    pub fn observe(&self, method: &str, path: &str, status: u16, seconds: f64) {
        let status = status.to_string();
        self.request_duration
            .with_label_values(&[method, path, status.as_str()])
            .observe(seconds);
    }

    /// Nombre de requêtes enregistrées pour ces étiquettes
    pub fn request_count(&self, method: &str, path: &str, status: u16) -> u64 {
        let status = status.to_string();
        self.request_duration
            .with_label_values(&[method, path, status.as_str()])
            .get_sample_count()
    }

    /// Sérialise le registre au format texte Prometheus
    pub fn encode(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("Échec de l'encodage des métriques")?;
        String::from_utf8(buffer).context("Métriques non UTF-8")
    }
}

/// Middleware : mesure chaque requête et l'ajoute à l'histogramme
pub async fn track_metrics(
    State(metrics): State<Arc<HttpMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = generalize_path(request.uri().path()).to_string();

    let response = next.run(request).await;

    let seconds = start.elapsed().as_secs_f64();
    metrics.observe(&method, &path, response.status().as_u16(), seconds);
    trace!(%method, %path, seconds, "Request duration recorded");

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_buckets() {
        let buckets = duration_buckets();

        assert_eq!(buckets.len(), 18);
        assert_eq!(buckets[0], 0.0001);
        assert_eq!(buckets[17], 50.0);
        assert!(buckets.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_observe_counts_per_series() {
        let metrics = HttpMetrics::new().unwrap();

        metrics.observe("GET", "/api/stocks/*", 200, 0.003);
        metrics.observe("GET", "/api/stocks/*", 200, 0.004);
        metrics.observe("GET", "/api/stocks/*", 404, 0.001);

        assert_eq!(metrics.request_count("GET", "/api/stocks/*", 200), 2);
        assert_eq!(metrics.request_count("GET", "/api/stocks/*", 404), 1);
        assert_eq!(metrics.request_count("POST", "/api/stocks", 201), 0);
    }

    #[test]
    fn test_encode_text_format() {
        let metrics = HttpMetrics::new().unwrap();
        metrics.observe("POST", "/api/stocks", 201, 0.3);

        let text = metrics.encode().unwrap();

        assert!(text.contains("# TYPE http_request_duration_seconds histogram"));
        assert!(text.contains(r#"method="POST""#));
        assert!(text.contains(r#"path="/api/stocks""#));
        assert!(text.contains(r#"status="201""#));
        assert!(text.contains(r#"le="0.5""#));
    }
}
