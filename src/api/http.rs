// ============================================================================
// API Client : HTTP (reqwest)
// ============================================================================
// Implémentation réseau du collaborateur HTTP
//
// CONCEPTS RUST :
// 1. async/await : la requête ne bloque pas le thread
// 2. anyhow::Context : chaque étape qui peut échouer ajoute son contexte
// 3. #[instrument] : chaque appel a son span (méthode + chemin)
// ============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::api::client::{Method, Request, Response, RestClient};

/// Client HTTP pointant vers une URL de base (ex: "http://127.0.0.1:8080")
///
/// CONCEPT RUST : Clone bon marché
/// - reqwest::Client contient un Arc interne (pool de connexions partagé)
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    /// Crée un client pour l'URL de base donnée
    ///
    /// Aucun timeout n'est configuré : la requête attend sa réponse
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("stockview/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Construit l'URL complète à partir du chemin de la requête
    fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
    }
}

#[async_trait]
impl RestClient for HttpClient {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn call(&self, request: Request) -> Result<Response> {
        let url = self.build_url(&request.path);
        debug!(url = %url, "Sending HTTP request");

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("Échec de la requête HTTP vers {}", url))?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        let bytes = response
            .bytes()
            .await
            .context("Échec de la lecture du corps de la réponse")?;

        // Corps vide -> null ; corps non JSON -> erreur seulement si succès
        // (une page d'erreur HTML garde son texte brut)
        let entity = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(e) if status.is_success() => {
                    return Err(e).context("Échec du parsing JSON de la réponse");
                }
                Err(_) => {
                    warn!(status = %status, "Non-JSON error body");
                    serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
                }
            }
        };

        Ok(Response::new(status.as_u16(), entity))
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = HttpClient::new("http://localhost:8080").unwrap();
        assert_eq!(client.build_url("/api/stocks"), "http://localhost:8080/api/stocks");

        let client = HttpClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.build_url("/api/stocks"), "http://localhost:8080/api/stocks");
        assert_eq!(client.build_url("api/stocks/1"), "http://localhost:8080/api/stocks/1");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        // Port 1 : rien n'écoute, la connexion est refusée
        let client = HttpClient::new("http://127.0.0.1:1").unwrap();
        let result = client.call(Request::get("/api/stocks")).await;
        assert!(result.is_err());
    }
}
