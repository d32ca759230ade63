//! Graph management request/response types.

use std::collections::BTreeMap;

use enrichviz_storage::GraphInfo;
use serde::{Deserialize, Serialize};

/// Request to store a new graph.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGraphRequest {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub interactions: Vec<InteractionSpec>,
}

/// A node to create. Node ids are assigned in list order, starting at 0.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    /// Extra node-table columns, e.g. an alternative gene identifier.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// An undirected interaction between two nodes, by position in `nodes`.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionSpec {
    pub source: usize,
    pub target: usize,
    #[serde(default)]
    pub kind: Option<String>,
}

/// Response for listing all graphs.
#[derive(Debug, Clone, Serialize)]
pub struct GraphListResponse {
    pub graphs: Vec<GraphInfo>,
}
