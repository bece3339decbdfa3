// ============================================================================
// Module : server
// ============================================================================
// L'API REST des stocks consommée par le front-end, et la page d'accueil
// qui monte le front-end côté serveur.
//
// ROUTES :
//   GET  /                  page HTML avec le tableau
//   GET  /api-health        200
//   GET  /metrics           histogramme Prometheus des durées de requêtes
//   GET  /api/stocks        liste
//   POST /api/stocks        création (201)
//   GET  /api/stocks/{id}   lecture (404 si absent)
//   PUT  /api/stocks/{id}   mise à jour (404 si absent)
// ============================================================================

pub mod error;    // ApiError
pub mod handlers; // Un handler par route
pub mod layers;   // Trace + CORS
pub mod local;    // LocalClient (collaborateur HTTP en mémoire)
pub mod metrics;  // HttpMetrics (Prometheus)
pub mod service;  // StockService (stockage en mémoire)

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::ui::DateTimeFormat;

pub use error::ApiError;
pub use local::LocalClient;
pub use metrics::HttpMetrics;
pub use service::StockService;

/// État partagé par les handlers
///
/// CONCEPT RUST : Clone bon marché
/// - axum clone l'état pour chaque requête ; le service est derrière un Arc
#[derive(Debug, Clone)]
pub struct ServerState {
    pub service: Arc<StockService>,

    /// Format des dates de la page d'accueil
    pub format: DateTimeFormat,

    /// Titre de la page d'accueil
    pub title: String,

    /// Durées des requêtes, servies sur /metrics
    pub metrics: Arc<HttpMetrics>,
}

impl ServerState {
    pub fn new(
        service: Arc<StockService>,
        format: DateTimeFormat,
        title: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            service,
            format,
            title: title.into(),
            metrics: Arc::new(HttpMetrics::new()?),
        })
    }
}

/// Construit le routeur avec toutes les routes et les middlewares
pub fn router(state: ServerState) -> Router {
    let metrics = state.metrics.clone();
    let router = Router::new()
        .route("/", get(handlers::index))
        .route("/api-health", get(handlers::health_api))
        .route("/metrics", get(handlers::metrics))
        .route(
            "/api/stocks",
            get(handlers::list_stocks).post(handlers::create_stock),
        )
        .route(
            "/api/stocks/{id}",
            get(handlers::get_stock).put(handlers::update_stock),
        )
        .with_state(state);

    layers::apply(router, metrics)
}

/// Sert l'API sur le listener jusqu'à Ctrl+C
pub async fn serve(listener: TcpListener, state: ServerState) -> Result<()> {
    let address = listener
        .local_addr()
        .context("Adresse du listener introuvable")?;
    info!(%address, "Server started, now accepting connections");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Erreur du serveur HTTP")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!(error = ?e, "Failed to listen for the shutdown signal"),
    }
}

// ============================================================================
// Tests : serveur réel sur un port éphémère
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{HttpClient, Request, RestClient};
    use crate::app::App;
    use crate::ui::datetime::{Locale, Zone};
    use crate::ui::stock_list::data_rows;
    use serde_json::json;

    fn pinned() -> DateTimeFormat {
        DateTimeFormat::new(Locale::EnUs, Zone::utc())
    }

    /// Lance le serveur en tâche de fond et renvoie son URL de base
    async fn spawn_server(init_size: u32) -> (String, Arc<StockService>) {
        let (base_url, state) = spawn_server_with_state(init_size).await;
        (base_url, state.service)
    }

    async fn spawn_server_with_state(init_size: u32) -> (String, ServerState) {
        let service = Arc::new(StockService::seeded(init_size));
        let state = ServerState::new(service, pinned(), "Stocks").unwrap();
        let handle = state.clone();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });

        (format!("http://{}", address), handle)
    }

    #[tokio::test]
    async fn test_list_route() {
        let (base_url, _) = spawn_server(3).await;
        let client = HttpClient::new(base_url).unwrap();

        let response = client.call(Request::get("/api/stocks")).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.entity.as_array().unwrap().len(), 3);
        assert_eq!(response.entity[1]["currentPrice"], 2.66);
    }

    #[tokio::test]
    async fn test_get_route() {
        let (base_url, _) = spawn_server(1).await;
        let client = HttpClient::new(base_url).unwrap();

        let response = client.call(Request::get("/api/stocks/1")).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.entity["name"], "name_1");

        let response = client.call(Request::get("/api/stocks/99")).await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.entity["error"], "Stock not found for 99");
    }

    #[tokio::test]
    async fn test_create_route_sets_location() {
        let (base_url, service) = spawn_server(0).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/stocks", base_url))
            .json(&json!({"name": "ACME", "currentPrice": 12.5}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 201);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/api/stocks/1"
        );
        assert_eq!(service.get(1).unwrap().name, "ACME");
    }

    #[tokio::test]
    async fn test_create_route_rejects_invalid_body() {
        let (base_url, service) = spawn_server(0).await;
        let client = HttpClient::new(base_url).unwrap();

        let body = json!({"name": "ACME", "currentPrice": -1.0});
        let response = client.call(Request::post("/api/stocks", body)).await.unwrap();

        assert_eq!(response.status, 400);
        assert!(service.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_json_bad_request() {
        let (base_url, service) = spawn_server(0).await;
        let http = HttpClient::new(base_url).unwrap();
        let local = LocalClient::new(service.clone());

        for body in [
            json!({"currentPrice": 1.0}),
            json!({"name": "ACME"}),
            json!({"name": "ACME", "currentPrice": "cheap"}),
        ] {
            let over_http = http.call(Request::post("/api/stocks", body.clone())).await.unwrap();
            let in_process = local.call(Request::post("/api/stocks", body)).await.unwrap();

            assert_eq!(over_http.status, 400);
            assert_eq!(in_process.status, 400);
            assert!(over_http.entity["error"].is_string());
            assert!(in_process.entity["error"].is_string());
        }
        assert!(service.is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_a_json_bad_request() {
        let (base_url, service) = spawn_server(1).await;
        let http = HttpClient::new(base_url).unwrap();
        let local = LocalClient::new(service);
        let body = json!({"name": "ACME", "currentPrice": 1.0});

        let over_http = http.call(Request::put("/api/stocks/abc", body.clone())).await.unwrap();
        let in_process = local.call(Request::put("/api/stocks/abc", body)).await.unwrap();
        assert_eq!(over_http.status, 400);
        assert_eq!(in_process.status, 400);
        assert!(over_http.entity["error"].is_string());

        let over_http = http.call(Request::get("/api/stocks/abc")).await.unwrap();
        assert_eq!(over_http.status, 400);
        assert!(over_http.entity["error"].is_string());
    }

    #[tokio::test]
    async fn test_metrics_route_counts_requests() {
        let (base_url, state) = spawn_server_with_state(1).await;
        let client = HttpClient::new(base_url.clone()).unwrap();

        client.call(Request::get("/api/stocks/1")).await.unwrap();
        client.call(Request::get("/api/stocks/42")).await.unwrap();
        client.call(Request::get("/api/stocks")).await.unwrap();

        assert_eq!(state.metrics.request_count("GET", "/api/stocks/*", 200), 1);
        assert_eq!(state.metrics.request_count("GET", "/api/stocks/*", 404), 1);
        assert_eq!(state.metrics.request_count("GET", "/api/stocks", 200), 1);

        let response = reqwest::get(format!("{}/metrics", base_url)).await.unwrap();
        assert!(response.status().is_success());
        let text = response.text().await.unwrap();
        assert!(text.contains("http_request_duration_seconds_bucket"));
        assert!(text.contains(r#"path="/api/stocks/*""#));
        assert!(text.contains(r#"status="404""#));
    }

    #[tokio::test]
    async fn test_update_route() {
        let (base_url, _) = spawn_server(1).await;
        let client = HttpClient::new(base_url).unwrap();

        let body = json!({"name": "renamed", "currentPrice": 5.5});
        let response = client.call(Request::put("/api/stocks/1", body.clone())).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.entity["name"], "renamed");

        let response = client.call(Request::put("/api/stocks/2", body)).await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_health_route() {
        let (base_url, _) = spawn_server(0).await;
        let response = reqwest::get(format!("{}/api-health", base_url)).await.unwrap();
        assert!(response.status().is_success());
    }

    #[tokio::test]
    async fn test_index_page_renders_table() {
        let (base_url, _) = spawn_server(2).await;

        let page = reqwest::get(format!("{}/", base_url))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(page.contains("<div id=\"react\"><table><tbody>"));
        assert!(page.contains("<th>LastUpdate</th>"));
        assert!(page.contains("<td>name_1</td><td>1.66</td>"));
        assert!(page.contains("<td>name_2</td><td>2.66</td>"));
    }

    #[tokio::test]
    async fn test_app_mounted_against_server() {
        let (base_url, _) = spawn_server(0).await;
        let client = Arc::new(HttpClient::new(base_url).unwrap());

        let body = json!({"name": "ACME", "currentPrice": 12.5});
        client.call(Request::post("/api/stocks", body)).await.unwrap();

        let mut app = App::new(pinned());
        app.component_did_mount(client);
        assert!(app.settle().await);

        let table = app.render();
        let rows = data_rows(&table);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key(), Some("1"));
        assert_eq!(app.stocks()[0].name, "ACME");
    }

    #[tokio::test]
    async fn test_app_with_unreachable_server_stays_empty() {
        let client = Arc::new(HttpClient::new("http://127.0.0.1:1").unwrap());

        let mut app = App::new(pinned());
        app.component_did_mount(client);
        assert!(!app.settle().await);
        assert!(data_rows(&app.render()).is_empty());
    }
}
