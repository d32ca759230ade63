//! Row types owned by the storage layer.
//!
//! These are the typed replacements for the host's dynamically typed table
//! columns: one [`NodeEncoding`] per node row, one [`GraphSummary`] per graph
//! metadata row, and [`TermResultRow`]s in the per-source term tables.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use enrichviz_core::{EnrichmentTerm, GraphId};

use crate::error::StorageError;

/// Summary of a stored graph (for listing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphInfo {
    pub id: GraphId,
    pub name: String,
    pub node_count: usize,
}

/// The three chart columns of one node row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEncoding {
    /// One flag per selected term, in selection order.
    pub term_flags: Vec<u8>,
    /// Term name where the flag was set by membership, `""` elsewhere.
    pub term_names: Vec<String>,
    /// Renderer directive; `None` for nodes outside every selected term.
    pub glyph_spec: Option<String>,
}

/// Derived record of what the graph's chart currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub shown_term_names: Vec<String>,
    /// Parallel to `shown_term_names`.
    pub shown_colors: Vec<String>,
}

/// One row of a term-result table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermResultRow {
    pub term: EnrichmentTerm,
    /// Color the user assigned for charting; `""` when none.
    #[serde(default)]
    pub chart_color: String,
}

impl TermResultRow {
    pub fn new(term: EnrichmentTerm) -> Self {
        TermResultRow {
            term,
            chart_color: String::new(),
        }
    }
}

/// Fails on the first term id that repeats within `rows`.
pub(crate) fn ensure_unique_terms(
    graph: GraphId,
    table: &str,
    rows: &[TermResultRow],
) -> Result<(), StorageError> {
    let mut seen = HashSet::with_capacity(rows.len());
    match rows.iter().find(|row| !seen.insert(row.term.id())) {
        Some(row) => Err(StorageError::DuplicateTerm {
            graph: graph.0,
            table: table.to_string(),
            term: row.term.id().to_string(),
        }),
        None => Ok(()),
    }
}
