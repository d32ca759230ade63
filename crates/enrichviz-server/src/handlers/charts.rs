//! Chart handlers (draw, reset, summary, per-node chart, palettes).

use axum::extract::{Path, Query, State};
use axum::Json;

use enrichviz_core::palette::DEFAULT_PALETTE_PROVIDER;
use enrichviz_core::{GraphId, NodeId, Palette};

use crate::error::ApiError;
use crate::schema::charts::{
    DrawChartsRequest, DrawChartsResponse, NodeChartResponse, ResetChartsResponse,
    SetPaletteRequest, SummaryResponse,
};
use crate::schema::enrichment::TableQuery;
use crate::service::default_table;
use crate::state::AppState;

/// Draws charts for an ordered term selection.
///
/// `POST /graphs/{id}/charts`
pub async fn draw_charts(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<DrawChartsRequest>,
) -> Result<Json<DrawChartsResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let outcome = service.draw_charts(GraphId(id), &req)?;
    Ok(Json(outcome.into()))
}

/// Clears chart columns and term colors.
///
/// `DELETE /graphs/{id}/charts`
pub async fn reset_charts(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ResetChartsResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let outcome = service.reset_charts(GraphId(id))?;
    Ok(Json(outcome.into()))
}

/// `GET /graphs/{id}/charts/summary`
pub async fn chart_summary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let service = state.service.lock().await;
    let summary = service.chart_summary(GraphId(id))?;
    Ok(Json(SummaryResponse { summary }))
}

/// `GET /graphs/{id}/nodes/{node_id}/chart`
pub async fn node_chart(
    State(state): State<AppState>,
    Path((id, node_id)): Path<(i64, u32)>,
) -> Result<Json<NodeChartResponse>, ApiError> {
    let node = NodeId(node_id);
    let service = state.service.lock().await;
    let encoding = service.node_chart(GraphId(id), node)?;
    Ok(Json(NodeChartResponse { node, encoding }))
}

/// Palette in effect for a term table.
///
/// `GET /graphs/{id}/palette?table=`
pub async fn get_palette(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<TableQuery>,
) -> Result<Json<Palette>, ApiError> {
    let table = query.table.unwrap_or_else(default_table);
    let service = state.service.lock().await;
    Ok(Json(service.palette(GraphId(id), &table)?))
}

/// Records a palette for a term table.
///
/// `PUT /graphs/{id}/palette?table=`
pub async fn put_palette(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<TableQuery>,
    Json(req): Json<SetPaletteRequest>,
) -> Result<Json<Palette>, ApiError> {
    let table = query.table.unwrap_or_else(default_table);
    let provider = req.provider.as_deref().unwrap_or(DEFAULT_PALETTE_PROVIDER);
    let mut service = state.service.lock().await;
    Ok(Json(service.set_palette(GraphId(id), &table, provider, &req.name)?))
}
