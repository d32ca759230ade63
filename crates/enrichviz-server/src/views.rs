//! Per-graph render views.
//!
//! [`ViewRegistry`] tracks at most one view per graph. A view records which
//! node column feeds its custom-graphics slot and counts refreshes and
//! term-table redraws, which is what a client polls to know it must re-read
//! chart data.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use enrichviz_chart::{TableModel, ViewRefresher};
use enrichviz_core::GraphId;

/// Unique view identifier (UUID v4 newtype).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(pub Uuid);

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of one graph's render view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderView {
    pub id: ViewId,
    pub graph: GraphId,
    /// Node column bound to the custom-graphics slot, if charts are shown.
    pub glyph_column: Option<String>,
    /// Times node data was re-read into the view.
    pub refreshes: u64,
    /// Times the term tables signalled a redraw.
    pub table_revision: u64,
}

/// Registry of render views, keyed by graph.
///
/// Backed by `DashMap` so handlers can read view state without taking the
/// service lock.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: DashMap<GraphId, RenderView>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        ViewRegistry {
            views: DashMap::new(),
        }
    }

    /// Opens a view for `graph`, or returns the one already open.
    pub fn open(&self, graph: GraphId) -> RenderView {
        self.views
            .entry(graph)
            .or_insert_with(|| RenderView {
                id: ViewId(Uuid::new_v4()),
                graph,
                glyph_column: None,
                refreshes: 0,
                table_revision: 0,
            })
            .clone()
    }

    pub fn get(&self, graph: GraphId) -> Option<RenderView> {
        self.views.get(&graph).map(|entry| entry.clone())
    }

    /// Closes the graph's view. Returns `true` if one was open.
    pub fn close(&self, graph: GraphId) -> bool {
        self.views.remove(&graph).is_some()
    }

    /// Table model that redraws the graph's view, if one is open.
    pub fn table_model(&self, graph: GraphId) -> Option<ViewTableModel<'_>> {
        self.views
            .contains_key(&graph)
            .then_some(ViewTableModel { registry: self, graph })
    }
}

impl ViewRefresher for &ViewRegistry {
    fn show_charts(&mut self, graph: GraphId, glyph_column: &str, show: bool) -> bool {
        match self.views.get_mut(&graph) {
            Some(mut view) => {
                view.glyph_column = show.then(|| glyph_column.to_string());
                true
            }
            None => false,
        }
    }

    fn refresh(&mut self, graph: GraphId) -> bool {
        match self.views.get_mut(&graph) {
            Some(mut view) => {
                view.refreshes += 1;
                true
            }
            None => false,
        }
    }
}

/// Term-table model of one graph's view.
pub struct ViewTableModel<'a> {
    registry: &'a ViewRegistry,
    graph: GraphId,
}

impl TableModel for ViewTableModel<'_> {
    fn table_data_changed(&mut self) {
        if let Some(mut view) = self.registry.views.get_mut(&self.graph) {
            view.table_revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_is_idempotent_per_graph() {
        let registry = ViewRegistry::new();
        let first = registry.open(GraphId(1));
        let again = registry.open(GraphId(1));
        let other = registry.open(GraphId(2));
        assert_eq!(first.id, again.id);
        assert_ne!(first.id, other.id);
    }

    #[test]
    fn refresher_reports_missing_view() {
        let registry = ViewRegistry::new();
        let mut refresher = &registry;
        assert!(!refresher.show_charts(GraphId(1), "glyph", true));
        assert!(!refresher.refresh(GraphId(1)));
        assert!(registry.table_model(GraphId(1)).is_none());
    }

    #[test]
    fn refresher_binds_column_and_counts() {
        let registry = ViewRegistry::new();
        registry.open(GraphId(1));
        let mut refresher = &registry;
        assert!(refresher.show_charts(GraphId(1), "glyph", true));
        assert!(refresher.refresh(GraphId(1)));
        let view = registry.get(GraphId(1)).unwrap();
        assert_eq!(view.glyph_column.as_deref(), Some("glyph"));
        assert_eq!(view.refreshes, 1);

        refresher.show_charts(GraphId(1), "glyph", false);
        assert_eq!(registry.get(GraphId(1)).unwrap().glyph_column, None);
    }

    #[test]
    fn table_model_bumps_revision() {
        let registry = ViewRegistry::new();
        registry.open(GraphId(3));
        registry.table_model(GraphId(3)).unwrap().table_data_changed();
        assert_eq!(registry.get(GraphId(3)).unwrap().table_revision, 1);
        assert!(registry.close(GraphId(3)));
        assert!(!registry.close(GraphId(3)));
    }
}
