//! Router assembly for the enrichviz HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Graph management
        .route(
            "/graphs",
            get(handlers::graphs::list_graphs).post(handlers::graphs::create_graph),
        )
        .route(
            "/graphs/{id}",
            axum::routing::delete(handlers::graphs::delete_graph),
        )
        .route(
            "/graphs/{id}/settings",
            get(handlers::graphs::get_settings).put(handlers::graphs::put_settings),
        )
        // Enrichment queries and term tables
        .route(
            "/graphs/{id}/enrichment",
            post(handlers::enrichment::run_enrichment),
        )
        .route("/graphs/{id}/terms", get(handlers::enrichment::list_terms))
        // Charts
        .route(
            "/graphs/{id}/charts",
            post(handlers::charts::draw_charts).delete(handlers::charts::reset_charts),
        )
        .route(
            "/graphs/{id}/charts/summary",
            get(handlers::charts::chart_summary),
        )
        .route(
            "/graphs/{id}/nodes/{node_id}/chart",
            get(handlers::charts::node_chart),
        )
        .route(
            "/graphs/{id}/palette",
            get(handlers::charts::get_palette).put(handlers::charts::put_palette),
        )
        // Render views
        .route(
            "/graphs/{id}/view",
            get(handlers::views::get_view).post(handlers::views::open_view),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
