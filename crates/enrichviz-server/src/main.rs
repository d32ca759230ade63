//! Binary entrypoint for the enrichviz HTTP server.
//!
//! Reads configuration from environment variables:
//! - `ENRICHVIZ_DB_PATH`: SQLite database file path (default: "enrichviz.db")
//! - `ENRICHVIZ_PORT`: Server listen port (default: "3000")
//! - `ENRICHVIZ_SERVICE_URL`: enrichment service root (default: public g:Profiler)

use enrichviz_server::request_engine::DEFAULT_SERVICE_URL;
use enrichviz_server::router::build_router;
use enrichviz_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let db_path = std::env::var("ENRICHVIZ_DB_PATH")
        .unwrap_or_else(|_| "enrichviz.db".to_string());
    let port = std::env::var("ENRICHVIZ_PORT")
        .unwrap_or_else(|_| "3000".to_string());
    let service_url = std::env::var("ENRICHVIZ_SERVICE_URL")
        .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string());

    let state = AppState::new(&db_path, &service_url)?;
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!(service = %service_url, "enrichviz server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
