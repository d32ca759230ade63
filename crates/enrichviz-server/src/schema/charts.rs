//! Chart drawing, reset, and palette types.

use enrichviz_chart::{ProjectOutcome, ResetOutcome};
use enrichviz_core::{NodeId, TermId};
use enrichviz_storage::{GraphSummary, NodeEncoding};
use serde::{Deserialize, Serialize};

/// Request to draw charts for an ordered term selection.
#[derive(Debug, Clone, Deserialize)]
pub struct DrawChartsRequest {
    /// One of FULL, PIE, SPLIT_PIE, TEETH (case-insensitive).
    pub chart_type: String,
    /// Selected terms in slice order.
    pub terms: Vec<TermChoice>,
    /// Term table the ids refer to; defaults to the aggregate table.
    #[serde(default)]
    pub table: Option<String>,
}

/// A selected term. Without a color, the table's palette assigns one by
/// position.
#[derive(Debug, Clone, Deserialize)]
pub struct TermChoice {
    pub id: TermId,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawChartsResponse {
    pub projected: bool,
    pub nodes: usize,
    pub glyphs: usize,
    pub view_refreshed: bool,
}

impl From<ProjectOutcome> for DrawChartsResponse {
    fn from(outcome: ProjectOutcome) -> Self {
        match outcome {
            ProjectOutcome::Skipped => DrawChartsResponse {
                projected: false,
                nodes: 0,
                glyphs: 0,
                view_refreshed: false,
            },
            ProjectOutcome::Projected {
                nodes,
                glyphs,
                view_refreshed,
            } => DrawChartsResponse {
                projected: true,
                nodes,
                glyphs,
                view_refreshed,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetChartsResponse {
    pub reset: bool,
    pub colors_cleared: usize,
    pub model_notified: bool,
}

impl From<ResetOutcome> for ResetChartsResponse {
    fn from(outcome: ResetOutcome) -> Self {
        match outcome {
            ResetOutcome::Skipped => ResetChartsResponse {
                reset: false,
                colors_cleared: 0,
                model_notified: false,
            },
            ResetOutcome::Reset {
                colors_cleared,
                model_notified,
            } => ResetChartsResponse {
                reset: true,
                colors_cleared,
                model_notified,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    /// `None` until charts were drawn once.
    pub summary: Option<GraphSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeChartResponse {
    pub node: NodeId,
    /// `None` when the node has no chart columns since the last reset.
    pub encoding: Option<NodeEncoding>,
}

/// Request to record a palette for a term table.
#[derive(Debug, Clone, Deserialize)]
pub struct SetPaletteRequest {
    #[serde(default)]
    pub provider: Option<String>,
    pub name: String,
}
