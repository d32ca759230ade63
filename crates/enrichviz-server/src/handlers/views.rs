//! Render view handlers.

use axum::extract::{Path, State};
use axum::Json;

use enrichviz_core::GraphId;

use crate::error::ApiError;
use crate::schema::views::ViewResponse;
use crate::state::AppState;

/// Opens (or returns) the graph's render view.
///
/// `POST /graphs/{id}/view`
pub async fn open_view(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ViewResponse>, ApiError> {
    let service = state.service.lock().await;
    let view = service.open_view(GraphId(id))?;
    Ok(Json(ViewResponse { view }))
}

/// Reads view state without taking the service lock.
///
/// `GET /graphs/{id}/view`
pub async fn get_view(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ViewResponse>, ApiError> {
    let graph = GraphId(id);
    let view = state
        .views
        .get(graph)
        .ok_or_else(|| ApiError::NotFound(format!("no view open for {}", graph)))?;
    Ok(Json(ViewResponse { view }))
}
