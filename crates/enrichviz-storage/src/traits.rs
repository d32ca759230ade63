//! The [`GraphStore`] trait defining the storage contract for enrichment
//! sessions.
//!
//! A store holds, per graph:
//! - the network itself,
//! - the node table's three chart columns ([`NodeEncoding`]),
//! - the graph metadata row ([`GraphSummary`]),
//! - term-result tables keyed by table name ([`TermResultRow`]),
//! - session state: recorded palettes and query settings.
//!
//! All backends (InMemoryStore, SqliteStore) implement this trait, so the
//! chart pipeline runs unchanged against either.

use enrichviz_core::{GraphId, NetworkGraph, NodeId, Palette, QuerySettings, TermId};

use crate::error::StorageError;
use crate::types::{GraphInfo, GraphSummary, NodeEncoding, TermResultRow};

/// The storage contract for enrichment sessions.
///
/// The trait is synchronous (not async); callers serialize access per graph.
pub trait GraphStore {
    // -------------------------------------------------------------------
    // Graphs
    // -------------------------------------------------------------------

    /// Stores a new graph and returns its allocated [`GraphId`].
    fn create_graph(&mut self, name: &str, graph: &NetworkGraph) -> Result<GraphId, StorageError>;

    fn load_graph(&self, id: GraphId) -> Result<NetworkGraph, StorageError>;

    /// Deletes a graph and every row derived from it.
    fn delete_graph(&mut self, id: GraphId) -> Result<(), StorageError>;

    fn list_graphs(&self) -> Result<Vec<GraphInfo>, StorageError>;

    // -------------------------------------------------------------------
    // Node table chart columns
    // -------------------------------------------------------------------

    /// Drops and recreates the chart columns: every node's encoding is
    /// discarded.
    fn replace_chart_columns(&mut self, graph: GraphId) -> Result<(), StorageError>;

    /// Writes one node's chart columns. The node must exist in the graph.
    fn set_node_encoding(
        &mut self,
        graph: GraphId,
        node: NodeId,
        encoding: &NodeEncoding,
    ) -> Result<(), StorageError>;

    /// Writes the chart columns of many nodes at once. Every node must exist
    /// in the graph; otherwise nothing is written.
    fn set_node_encodings(
        &mut self,
        graph: GraphId,
        rows: &[(NodeId, NodeEncoding)],
    ) -> Result<(), StorageError>;

    /// Reads one node's chart columns; `None` when never written since the
    /// last column replacement.
    fn get_node_encoding(
        &self,
        graph: GraphId,
        node: NodeId,
    ) -> Result<Option<NodeEncoding>, StorageError>;

    /// All written encodings, in ascending node order.
    fn node_encodings(&self, graph: GraphId) -> Result<Vec<(NodeId, NodeEncoding)>, StorageError>;

    // -------------------------------------------------------------------
    // Graph metadata row
    // -------------------------------------------------------------------

    fn set_graph_summary(
        &mut self,
        graph: GraphId,
        summary: &GraphSummary,
    ) -> Result<(), StorageError>;

    fn get_graph_summary(&self, graph: GraphId) -> Result<Option<GraphSummary>, StorageError>;

    // -------------------------------------------------------------------
    // Term-result tables
    // -------------------------------------------------------------------

    /// Replaces the content of a term table with `rows`, keeping their order.
    /// An empty `rows` drops the table. Term ids must be unique within the
    /// table; a repeated id fails with [`StorageError::DuplicateTerm`] and
    /// leaves the table unchanged.
    fn save_term_results(
        &mut self,
        graph: GraphId,
        table: &str,
        rows: &[TermResultRow],
    ) -> Result<(), StorageError>;

    /// Rows of a term table in stored order; empty when the table does not exist.
    fn list_term_results(
        &self,
        graph: GraphId,
        table: &str,
    ) -> Result<Vec<TermResultRow>, StorageError>;

    /// Names of the graph's term tables, sorted.
    fn term_tables(&self, graph: GraphId) -> Result<Vec<String>, StorageError>;

    /// Sets the chart color of one term row.
    fn set_chart_color(
        &mut self,
        graph: GraphId,
        table: &str,
        term: &TermId,
        color: &str,
    ) -> Result<(), StorageError>;

    // -------------------------------------------------------------------
    // Session state
    // -------------------------------------------------------------------

    fn set_session_palette(
        &mut self,
        graph: GraphId,
        table: &str,
        palette: &Palette,
    ) -> Result<(), StorageError>;

    fn get_session_palette(
        &self,
        graph: GraphId,
        table: &str,
    ) -> Result<Option<Palette>, StorageError>;

    fn set_query_settings(
        &mut self,
        graph: GraphId,
        settings: &QuerySettings,
    ) -> Result<(), StorageError>;

    /// Settings recorded for the graph, or defaults when none were recorded.
    fn get_query_settings(&self, graph: GraphId) -> Result<QuerySettings, StorageError>;
}
