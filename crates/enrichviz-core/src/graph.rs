//! NetworkGraph: the node-and-edge graph enrichment results are drawn on.
//!
//! Nodes carry a display name plus free-form string attributes (identifier
//! columns imported with the network). The graph itself is a petgraph
//! `StableGraph`, so node IDs stay valid when other nodes are removed.
//!
//! Iteration over nodes is always in ascending [`NodeId`] order; the chart
//! pipeline relies on this for deterministic output.

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use petgraph::stable_graph::StableGraph;
use petgraph::Undirected;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::NodeId;

/// A node of the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkNode {
    /// Display name; also the gene identifier when no identifier column is
    /// configured.
    pub name: String,
    /// Extra columns, e.g. `"ensembl" -> "ENSG00000170312"`.
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

impl NetworkNode {
    pub fn named(name: impl Into<String>) -> Self {
        NetworkNode {
            name: name.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// An interaction between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(default)]
    pub kind: Option<String>,
}

/// The network graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkGraph {
    inner: StableGraph<NetworkNode, Interaction, Undirected, u32>,
}

impl NetworkGraph {
    pub fn new() -> Self {
        NetworkGraph::default()
    }

    pub fn add_node(&mut self, node: NetworkNode) -> NodeId {
        self.inner.add_node(node).into()
    }

    /// Connects two existing nodes.
    pub fn add_interaction(
        &mut self,
        a: NodeId,
        b: NodeId,
        kind: Option<String>,
    ) -> Result<(), CoreError> {
        for id in [a, b] {
            if !self.contains(id) {
                return Err(CoreError::NodeNotFound { id });
            }
        }
        self.inner.add_edge(a.into(), b.into(), Interaction { kind });
        Ok(())
    }

    pub fn remove_node(&mut self, id: NodeId) -> Option<NetworkNode> {
        self.inner.remove_node(id.into())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.contains_node(id.into())
    }

    pub fn node(&self, id: NodeId) -> Option<&NetworkNode> {
        self.inner.node_weight(id.into())
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// All node IDs in ascending order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.inner.node_indices().map(NodeId::from).collect();
        ids.sort();
        ids
    }

    /// All edges as `(a, b)` pairs.
    pub fn interactions(&self) -> Vec<(NodeId, NodeId)> {
        self.inner
            .edge_indices()
            .filter_map(|e| self.inner.edge_endpoints(e))
            .map(|(a, b)| (a.into(), b.into()))
            .collect()
    }

    /// Gene identifier for a node: the `gene_id_column` attribute when one is
    /// configured, else the node name.
    pub fn canonical_name(&self, id: NodeId, gene_id_column: Option<&str>) -> Option<&str> {
        let node = self.node(id)?;
        match gene_id_column {
            Some(column) => node.attributes.get(column).map(String::as_str),
            None => Some(node.name.as_str()),
        }
    }

    /// Distinct canonical names usable as a statistical background: non-empty
    /// and without whitespace. Sorted.
    pub fn background_genes(&self, gene_id_column: Option<&str>) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .node_ids()
            .into_iter()
            .filter_map(|id| self.canonical_name(id, gene_id_column))
            .filter(|name| !name.is_empty() && !name.contains(char::is_whitespace))
            .collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// Map from canonical name to the nodes carrying it.
    pub fn nodes_by_canonical_name(
        &self,
        gene_id_column: Option<&str>,
    ) -> HashMap<String, Vec<NodeId>> {
        let mut map: HashMap<String, Vec<NodeId>> = HashMap::new();
        for id in self.node_ids() {
            if let Some(name) = self.canonical_name(id, gene_id_column) {
                map.entry(name.to_string()).or_default().push(id);
            }
        }
        map
    }
}
