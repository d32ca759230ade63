//! Interfaces to the render model and term-table UI models.
//!
//! The pipeline never reaches for a global registry: whoever drives it hands
//! in the view and table model explicitly.

use enrichviz_core::GraphId;

/// Render-side collaborator for a graph's active view.
pub trait ViewRefresher {
    /// Binds (or unbinds, with `show = false`) the node glyph column to the
    /// view's custom-graphics slot. Returns `false` when the graph has no view.
    fn show_charts(&mut self, graph: GraphId, glyph_column: &str, show: bool) -> bool;

    /// Re-reads node data into the render model. Returns `false` when the
    /// graph has no view.
    fn refresh(&mut self, graph: GraphId) -> bool;
}

/// A view refresher for headless runs: there is never an active view.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoView;

impl ViewRefresher for NoView {
    fn show_charts(&mut self, _graph: GraphId, _glyph_column: &str, _show: bool) -> bool {
        false
    }

    fn refresh(&mut self, _graph: GraphId) -> bool {
        false
    }
}

/// A UI model listing term-table rows.
pub trait TableModel {
    /// Signals that row data changed and the table must be redrawn.
    fn table_data_changed(&mut self);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records every call so tests can assert on the refresh protocol.
    #[derive(Debug, Default)]
    pub struct RecordingView {
        pub active: Vec<GraphId>,
        pub bound: Vec<(GraphId, String, bool)>,
        pub refreshed: Vec<GraphId>,
    }

    impl ViewRefresher for RecordingView {
        fn show_charts(&mut self, graph: GraphId, glyph_column: &str, show: bool) -> bool {
            if !self.active.contains(&graph) {
                return false;
            }
            self.bound.push((graph, glyph_column.to_string(), show));
            true
        }

        fn refresh(&mut self, graph: GraphId) -> bool {
            if !self.active.contains(&graph) {
                return false;
            }
            self.refreshed.push(graph);
            true
        }
    }

    #[derive(Debug, Default)]
    pub struct CountingModel {
        pub changes: usize,
    }

    impl TableModel for CountingModel {
        fn table_data_changed(&mut self) {
            self.changes += 1;
        }
    }
}
