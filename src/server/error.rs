// ============================================================================
// Erreurs de l'API
// ============================================================================
// CONCEPT RUST : Enum d'erreurs typée
// - Chaque variante correspond à un statut HTTP
// - Display + std::error::Error : utilisable avec ? et anyhow
// - IntoResponse : axum la convertit directement en réponse
// - From<*Rejection> : un corps ou un id illisible suit le même contrat
//   (400 + {"error": ...}) qu'une requête refusée par la validation
// ============================================================================

use std::fmt;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Erreurs renvoyées par le service des stocks
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Aucun stock avec cet id
    NotFound(i64),

    /// Corps ou paramètre de requête refusé (illisible ou invalide)
    Invalid(String),

    /// Échec interne du serveur
    Internal(String),
}

impl ApiError {
    /// Statut HTTP associé
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Corps JSON `{"error": message}`
    pub fn body(&self) -> serde_json::Value {
        json!({ "error": self.to_string() })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(id) => write!(f, "Stock not found for {}", id),
            ApiError::Invalid(message) => write!(f, "Invalid stock: {}", message),
            ApiError::Internal(message) => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Invalid(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Invalid(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
