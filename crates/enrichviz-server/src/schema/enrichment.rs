//! Enrichment query and term-table types.

use enrichviz_storage::TermResultRow;
use serde::{Deserialize, Serialize};

/// Request to run an enrichment query for a graph.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichmentRequest {
    /// Query nodes by id; all nodes when absent.
    #[serde(default)]
    pub nodes: Option<Vec<u32>>,
    /// Send the graph's nodes as a custom statistical background.
    #[serde(default)]
    pub background: bool,
}

/// Row count of one stored term table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrichmentResponse {
    /// Number of terms the service returned.
    pub terms: usize,
    pub tables: Vec<TableCount>,
}

/// Selects a term table; defaults to the aggregate table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    pub table: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TermsResponse {
    pub table: String,
    pub rows: Vec<TermResultRow>,
}
