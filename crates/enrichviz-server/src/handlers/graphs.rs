//! Graph management handlers (create, list, delete, query settings).

use axum::extract::{Path, State};
use axum::Json;

use enrichviz_core::{GraphId, QuerySettings};
use enrichviz_storage::GraphInfo;

use crate::error::ApiError;
use crate::schema::graphs::{CreateGraphRequest, GraphListResponse};
use crate::state::AppState;

/// Lists all graphs.
///
/// `GET /graphs`
pub async fn list_graphs(
    State(state): State<AppState>,
) -> Result<Json<GraphListResponse>, ApiError> {
    let service = state.service.lock().await;
    let graphs = service.list_graphs()?;
    Ok(Json(GraphListResponse { graphs }))
}

/// Stores a new graph.
///
/// `POST /graphs`
pub async fn create_graph(
    State(state): State<AppState>,
    Json(req): Json<CreateGraphRequest>,
) -> Result<Json<GraphInfo>, ApiError> {
    let mut service = state.service.lock().await;
    let info = service.create_graph(req)?;
    Ok(Json(info))
}

/// Deletes a graph by ID.
///
/// `DELETE /graphs/{id}`
pub async fn delete_graph(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut service = state.service.lock().await;
    service.delete_graph(GraphId(id))?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// `GET /graphs/{id}/settings`
pub async fn get_settings(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<QuerySettings>, ApiError> {
    let service = state.service.lock().await;
    Ok(Json(service.settings(GraphId(id))?))
}

/// Replaces the graph's query settings.
///
/// `PUT /graphs/{id}/settings`
pub async fn put_settings(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(settings): Json<QuerySettings>,
) -> Result<Json<QuerySettings>, ApiError> {
    let mut service = state.service.lock().await;
    service.set_settings(GraphId(id), &settings)?;
    Ok(Json(settings))
}
