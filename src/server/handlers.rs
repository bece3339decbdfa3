// ============================================================================
// Handlers HTTP
// ============================================================================
// Un handler par route ; la logique est dans StockService, les erreurs sont
// converties en réponse par ApiError.
//
// CONCEPT RUST : Result<Extracteur, Rejection>
// - Json et Path sont extraits en Result : un corps ou un id illisible devient
//   ApiError::Invalid (400 + {"error": ...}) au lieu du rejet texte d'axum
// ============================================================================

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Json;
use tracing::debug;

use crate::api::STOCKS_PATH;
use crate::app::App;
use crate::models::{Stock, StockRequest};
use crate::server::error::ApiError;
use crate::server::local::LocalClient;
use crate::server::ServerState;
use crate::ui::render_page;

/// En-tête Location d'un stock
type Location = [(header::HeaderName, String); 1];

fn location(stock: &Stock) -> Location {
    [(header::LOCATION, format!("{}/{}", STOCKS_PATH, stock.id))]
}

/// GET /api/stocks
pub async fn list_stocks(State(state): State<ServerState>) -> Json<Vec<Stock>> {
    Json(state.service.list())
}

/// GET /api/stocks/{id}
pub async fn get_stock(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Stock>, ApiError> {
    let Path(id) = id?;
    state.service.get(id).map(Json)
}

/// POST /api/stocks -> 201 + Location
pub async fn create_stock(
    State(state): State<ServerState>,
    request: Result<Json<StockRequest>, JsonRejection>,
) -> Result<(StatusCode, Location, Json<Stock>), ApiError> {
    let Json(request) = request?;
    let stock = state.service.create(request)?;
    Ok((StatusCode::CREATED, location(&stock), Json(stock)))
}

/// PUT /api/stocks/{id} -> 200 + Location
///
/// Le corps est validé avant l'existence du stock, comme pour la création
pub async fn update_stock(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<StockRequest>, JsonRejection>,
) -> Result<(Location, Json<Stock>), ApiError> {
    let Path(id) = id?;
    let Json(request) = request?;
    let stock = state.service.update(id, request)?;
    Ok((location(&stock), Json(stock)))
}

/// GET / : page hôte avec le tableau des stocks
///
/// Monte un App sur le service local, attend sa réponse, puis sérialise la
/// page complète.
pub async fn index(State(state): State<ServerState>) -> Html<String> {
    let mut app = App::new(state.format);
    app.component_did_mount(Arc::new(LocalClient::new(state.service.clone())));
    app.settle().await;

    debug!(rows = app.stocks().len(), "Rendering index page");
    Html(render_page(&state.title, app.render()))
}

/// GET /metrics : histogramme des requêtes au format texte Prometheus
pub async fn metrics(
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ApiError> {
    let body = state
        .metrics
        .encode()
        .map_err(|e| ApiError::Internal(format!("{:#}", e)))?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}

/// GET /api-health
pub async fn health_api() -> StatusCode {
    StatusCode::OK
}
