//! Storage error types for enrichviz-storage.
//!
//! [`StorageError`] covers all anticipated failure modes in the storage layer:
//! serialization of JSON columns, the SQLite driver and its migrations, and
//! entity-not-found variants for each addressable row.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The SQLite driver reported an error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// A graph with the given ID was not found.
    #[error("graph not found: {0}")]
    GraphNotFound(i64),

    /// A node was not found in the given graph.
    #[error("node not found: graph={graph}, node={node}")]
    NodeNotFound { graph: i64, node: u32 },

    /// A term row was not found in the given term table.
    #[error("term not found: graph={graph}, table='{table}', term={term}")]
    TermNotFound {
        graph: i64,
        table: String,
        term: String,
    },

    /// A term id appears more than once in rows saved to one term table.
    #[error("duplicate term: graph={graph}, table='{table}', term={term}")]
    DuplicateTerm {
        graph: i64,
        table: String,
        term: String,
    },
}
