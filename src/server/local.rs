// ============================================================================
// LocalClient : collaborateur HTTP en mémoire
// ============================================================================
// Côté serveur, la page d'accueil monte le même App que le front-end, mais
// ses requêtes sont servies directement par le StockService, sans réseau.
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::api::{Method, Request, Response, RestClient, STOCKS_PATH};
use crate::models::StockRequest;
use crate::server::error::ApiError;
use crate::server::service::StockService;

/// Client qui répond aux requêtes de l'API depuis le service local
#[derive(Debug, Clone)]
pub struct LocalClient {
    service: Arc<StockService>,
}

impl LocalClient {
    pub fn new(service: Arc<StockService>) -> Self {
        Self { service }
    }

    fn dispatch(&self, request: Request) -> Response {
        let path = request.path.trim_end_matches('/');

        if path == STOCKS_PATH {
            return match request.method {
                Method::Get => ok(StatusCode::OK, &self.service.list()),
                Method::Post => match parse_body(request.body) {
                    Ok(body) => into_response(StatusCode::CREATED, self.service.create(body)),
                    Err(e) => error(e),
                },
                Method::Put => method_not_allowed(),
            };
        }

        let Some(id) = path
            .strip_prefix(STOCKS_PATH)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return not_found(path);
        };
        let Ok(id) = id.parse::<i64>() else {
            return error(ApiError::Invalid(format!("'{}' is not a stock id", id)));
        };

        match request.method {
            Method::Get => into_response(StatusCode::OK, self.service.get(id)),
            Method::Put => match parse_body(request.body) {
                Ok(body) => into_response(StatusCode::OK, self.service.update(id, body)),
                Err(e) => error(e),
            },
            Method::Post => method_not_allowed(),
        }
    }
}

#[async_trait]
impl RestClient for LocalClient {
    async fn call(&self, request: Request) -> anyhow::Result<Response> {
        debug!(method = %request.method, path = %request.path, "Dispatching local request");
        Ok(self.dispatch(request))
    }
}

fn parse_body(body: Option<serde_json::Value>) -> Result<StockRequest, ApiError> {
    let body = body.ok_or_else(|| ApiError::Invalid("missing request body".to_string()))?;
    serde_json::from_value(body).map_err(|e| ApiError::Invalid(e.to_string()))
}

fn ok<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_value(value) {
        Ok(entity) => Response::new(status.as_u16(), entity),
        Err(e) => Response::new(
            StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            json!({ "error": e.to_string() }),
        ),
    }
}

fn into_response<T: Serialize>(status: StatusCode, result: Result<T, ApiError>) -> Response {
    match result {
        Ok(value) => ok(status, &value),
        Err(e) => error(e),
    }
}

fn error(e: ApiError) -> Response {
    Response::new(e.status().as_u16(), e.body())
}

fn not_found(path: &str) -> Response {
    Response::new(
        StatusCode::NOT_FOUND.as_u16(),
        json!({ "error": format!("No route for {}", path) }),
    )
}

fn method_not_allowed() -> Response {
    Response::new(
        StatusCode::METHOD_NOT_ALLOWED.as_u16(),
        json!({ "error": "Method not allowed" }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> LocalClient {
        LocalClient::new(Arc::new(StockService::seeded(2)))
    }

    #[tokio::test]
    async fn test_list() {
        let response = client().call(Request::get("/api/stocks")).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.entity.as_array().unwrap().len(), 2);
        assert_eq!(response.entity[0]["name"], "name_1");
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let client = client();

        let response = client.call(Request::get("/api/stocks/2")).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.entity["id"], 2);

        let response = client.call(Request::get("/api/stocks/9")).await.unwrap();
        assert_eq!(response.status, 404);

        let response = client.call(Request::get("/api/stocks/abc")).await.unwrap();
        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn test_create_and_update() {
        let client = client();

        let body = json!({"name": "ACME", "currentPrice": 12.5});
        let response = client.call(Request::post("/api/stocks", body)).await.unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.entity["id"], 3);

        let body = json!({"name": "ACME", "currentPrice": 13.0});
        let response = client.call(Request::put("/api/stocks/3", body)).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.entity["currentPrice"], 13.0);

        let body = json!({"name": "bad name", "currentPrice": 1.0});
        let response = client.call(Request::post("/api/stocks", body)).await.unwrap();
        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = client().call(Request::get("/api/other")).await.unwrap();
        assert_eq!(response.status, 404);

        let body = json!({"name": "ACME", "currentPrice": 1.0});
        let response = client().call(Request::put("/api/stocks", body)).await.unwrap();
        assert_eq!(response.status, 405);
    }
}
