//! Core error types for enrichviz-core.
//!
//! Uses `thiserror` for structured, matchable error variants. Everything here
//! is a caller contract violation: the core never coerces bad input.

use crate::id::{NodeId, TermId};
use thiserror::Error;

/// Core errors produced by the enrichviz-core crate.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A chart type name outside the closed set `FULL`, `PIE`, `SPLIT_PIE`, `TEETH`.
    #[error("unknown chart type: '{name}'")]
    UnknownChartType { name: String },

    /// A term source name the enrichment service does not publish.
    #[error("unknown term source: '{name}'")]
    UnknownTermSource { name: String },

    /// Color and membership vectors handed to the encoder differ in length.
    #[error("length mismatch: {colors} colors for {flags} membership flags")]
    LengthMismatch { colors: usize, flags: usize },

    /// A node index was not found in the graph.
    #[error("node not found: NodeId({id})", id = id.0)]
    NodeNotFound { id: NodeId },

    /// A term was not part of the selection or result set.
    #[error("term not found: {id}")]
    TermNotFound { id: TermId },
}
