//! Enrichment query and term-table handlers.

use axum::extract::{Path, Query, State};
use axum::Json;

use enrichviz_core::GraphId;

use crate::error::ApiError;
use crate::schema::enrichment::{EnrichmentRequest, EnrichmentResponse, TableQuery, TermsResponse};
use crate::service::default_table;
use crate::state::AppState;

/// Runs an enrichment query and stores the results as term tables.
///
/// `POST /graphs/{id}/enrichment`
///
/// The service lock is released while the remote request is in flight.
pub async fn run_enrichment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<EnrichmentRequest>,
) -> Result<Json<EnrichmentResponse>, ApiError> {
    let graph = GraphId(id);
    let inputs = {
        let service = state.service.lock().await;
        service.enrichment_inputs(graph, req.nodes.as_deref())?
    };

    let response = state
        .engine
        .profile(&inputs.network, &inputs.settings, &inputs.query_genes, req.background)
        .await
        .inspect_err(|err| tracing::warn!(%graph, error = %err, "enrichment request failed"))?;
    let terms = response.into_terms(&inputs.network, inputs.settings.gene_id_column.as_deref());
    let term_count = terms.len();

    let mut service = state.service.lock().await;
    let tables = service.store_enrichment(graph, terms)?;
    Ok(Json(EnrichmentResponse {
        terms: term_count,
        tables,
    }))
}

/// Lists the rows of a term table.
///
/// `GET /graphs/{id}/terms?table=`
pub async fn list_terms(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<TableQuery>,
) -> Result<Json<TermsResponse>, ApiError> {
    let table = query.table.unwrap_or_else(default_table);
    let service = state.service.lock().await;
    let rows = service.terms(GraphId(id), &table)?;
    Ok(Json(TermsResponse { table, rows }))
}
