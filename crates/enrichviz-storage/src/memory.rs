//! In-memory implementation of [`GraphStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests, ephemeral sessions,
//! and anywhere persistence isn't needed. It keeps everything in maps with
//! the same semantics as the SQLite backend.

use std::collections::{BTreeMap, HashMap};

use enrichviz_core::{GraphId, NetworkGraph, NodeId, Palette, QuerySettings, TermId};

use crate::error::StorageError;
use crate::traits::GraphStore;
use crate::types::{ensure_unique_terms, GraphInfo, GraphSummary, NodeEncoding, TermResultRow};

/// Data stored for a single graph in the in-memory backend.
#[derive(Debug, Clone)]
struct StoredGraph {
    name: String,
    graph: NetworkGraph,
    /// Node chart columns, keyed by node
    encodings: BTreeMap<NodeId, NodeEncoding>,
    /// Graph metadata row
    summary: Option<GraphSummary>,
    /// Term-result tables by name
    term_tables: BTreeMap<String, Vec<TermResultRow>>,
    /// Session palettes by term table name
    palettes: HashMap<String, Palette>,
    settings: Option<QuerySettings>,
}

impl StoredGraph {
    fn new(name: &str, graph: &NetworkGraph) -> Self {
        StoredGraph {
            name: name.to_string(),
            graph: graph.clone(),
            encodings: BTreeMap::new(),
            summary: None,
            term_tables: BTreeMap::new(),
            palettes: HashMap::new(),
            settings: None,
        }
    }
}

/// In-memory implementation of [`GraphStore`].
#[derive(Debug)]
pub struct InMemoryStore {
    graphs: HashMap<GraphId, StoredGraph>,
    next_graph_id: i64,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        InMemoryStore {
            graphs: HashMap::new(),
            next_graph_id: 1,
        }
    }

    /// Returns a reference to the stored graph, or error if not found.
    fn get_stored(&self, id: GraphId) -> Result<&StoredGraph, StorageError> {
        self.graphs.get(&id).ok_or(StorageError::GraphNotFound(id.0))
    }

    /// Returns a mutable reference to the stored graph, or error if not found.
    fn get_stored_mut(&mut self, id: GraphId) -> Result<&mut StoredGraph, StorageError> {
        self.graphs
            .get_mut(&id)
            .ok_or(StorageError::GraphNotFound(id.0))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore for InMemoryStore {
    fn create_graph(&mut self, name: &str, graph: &NetworkGraph) -> Result<GraphId, StorageError> {
        let id = GraphId(self.next_graph_id);
        self.next_graph_id += 1;
        self.graphs.insert(id, StoredGraph::new(name, graph));
        Ok(id)
    }

    fn load_graph(&self, id: GraphId) -> Result<NetworkGraph, StorageError> {
        Ok(self.get_stored(id)?.graph.clone())
    }

    fn delete_graph(&mut self, id: GraphId) -> Result<(), StorageError> {
        self.graphs
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::GraphNotFound(id.0))
    }

    fn list_graphs(&self) -> Result<Vec<GraphInfo>, StorageError> {
        let mut infos: Vec<GraphInfo> = self
            .graphs
            .iter()
            .map(|(&id, stored)| GraphInfo {
                id,
                name: stored.name.clone(),
                node_count: stored.graph.node_count(),
            })
            .collect();
        infos.sort_by_key(|info| info.id);
        Ok(infos)
    }

    fn replace_chart_columns(&mut self, graph: GraphId) -> Result<(), StorageError> {
        self.get_stored_mut(graph)?.encodings.clear();
        Ok(())
    }

    fn set_node_encoding(
        &mut self,
        graph: GraphId,
        node: NodeId,
        encoding: &NodeEncoding,
    ) -> Result<(), StorageError> {
        let stored = self.get_stored_mut(graph)?;
        if !stored.graph.contains(node) {
            return Err(StorageError::NodeNotFound {
                graph: graph.0,
                node: node.0,
            });
        }
        stored.encodings.insert(node, encoding.clone());
        Ok(())
    }

    fn set_node_encodings(
        &mut self,
        graph: GraphId,
        rows: &[(NodeId, NodeEncoding)],
    ) -> Result<(), StorageError> {
        let stored = self.get_stored_mut(graph)?;
        if let Some(&(node, _)) = rows.iter().find(|(node, _)| !stored.graph.contains(*node)) {
            return Err(StorageError::NodeNotFound {
                graph: graph.0,
                node: node.0,
            });
        }
        stored
            .encodings
            .extend(rows.iter().map(|(node, encoding)| (*node, encoding.clone())));
        Ok(())
    }

    fn get_node_encoding(
        &self,
        graph: GraphId,
        node: NodeId,
    ) -> Result<Option<NodeEncoding>, StorageError> {
        Ok(self.get_stored(graph)?.encodings.get(&node).cloned())
    }

    fn node_encodings(&self, graph: GraphId) -> Result<Vec<(NodeId, NodeEncoding)>, StorageError> {
        Ok(self
            .get_stored(graph)?
            .encodings
            .iter()
            .map(|(&id, enc)| (id, enc.clone()))
            .collect())
    }

    fn set_graph_summary(
        &mut self,
        graph: GraphId,
        summary: &GraphSummary,
    ) -> Result<(), StorageError> {
        self.get_stored_mut(graph)?.summary = Some(summary.clone());
        Ok(())
    }

    fn get_graph_summary(&self, graph: GraphId) -> Result<Option<GraphSummary>, StorageError> {
        Ok(self.get_stored(graph)?.summary.clone())
    }

    fn save_term_results(
        &mut self,
        graph: GraphId,
        table: &str,
        rows: &[TermResultRow],
    ) -> Result<(), StorageError> {
        let tables = &mut self.get_stored_mut(graph)?.term_tables;
        ensure_unique_terms(graph, table, rows)?;
        if rows.is_empty() {
            tables.remove(table);
        } else {
            tables.insert(table.to_string(), rows.to_vec());
        }
        Ok(())
    }

    fn list_term_results(
        &self,
        graph: GraphId,
        table: &str,
    ) -> Result<Vec<TermResultRow>, StorageError> {
        Ok(self
            .get_stored(graph)?
            .term_tables
            .get(table)
            .cloned()
            .unwrap_or_default())
    }

    fn term_tables(&self, graph: GraphId) -> Result<Vec<String>, StorageError> {
        Ok(self.get_stored(graph)?.term_tables.keys().cloned().collect())
    }

    fn set_chart_color(
        &mut self,
        graph: GraphId,
        table: &str,
        term: &TermId,
        color: &str,
    ) -> Result<(), StorageError> {
        let not_found = || StorageError::TermNotFound {
            graph: graph.0,
            table: table.to_string(),
            term: term.to_string(),
        };
        let row = self
            .get_stored_mut(graph)?
            .term_tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|row| row.term.id() == term))
            .ok_or_else(not_found)?;
        row.chart_color = color.to_string();
        Ok(())
    }

    fn set_session_palette(
        &mut self,
        graph: GraphId,
        table: &str,
        palette: &Palette,
    ) -> Result<(), StorageError> {
        self.get_stored_mut(graph)?
            .palettes
            .insert(table.to_string(), palette.clone());
        Ok(())
    }

    fn get_session_palette(
        &self,
        graph: GraphId,
        table: &str,
    ) -> Result<Option<Palette>, StorageError> {
        Ok(self.get_stored(graph)?.palettes.get(table).cloned())
    }

    fn set_query_settings(
        &mut self,
        graph: GraphId,
        settings: &QuerySettings,
    ) -> Result<(), StorageError> {
        self.get_stored_mut(graph)?.settings = Some(settings.clone());
        Ok(())
    }

    fn get_query_settings(&self, graph: GraphId) -> Result<QuerySettings, StorageError> {
        Ok(self.get_stored(graph)?.settings.clone().unwrap_or_default())
    }
}
