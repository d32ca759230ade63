//! Clearing of chart columns and term-table colors.

use enrichviz_core::GraphId;
use enrichviz_storage::GraphStore;

use crate::error::ChartError;
use crate::view::TableModel;

/// What a call to [`ChartResetter::reset`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// No current graph.
    Skipped,
    Reset {
        /// Term rows whose color was blanked.
        colors_cleared: usize,
        /// Whether the attached table model was told to redraw.
        model_notified: bool,
    },
}

/// Clears a graph's chart state.
///
/// The graph metadata row is left as is: after a reset it still names the
/// previously shown terms until the next projection overwrites it.
pub struct ChartResetter<'a, S: GraphStore + ?Sized, M: TableModel + ?Sized> {
    store: &'a mut S,
    model: Option<&'a mut M>,
}

impl<'a, S: GraphStore + ?Sized, M: TableModel + ?Sized> ChartResetter<'a, S, M> {
    pub fn new(store: &'a mut S, model: Option<&'a mut M>) -> Self {
        ChartResetter { store, model }
    }

    pub fn reset(&mut self, graph: Option<GraphId>) -> Result<ResetOutcome, ChartError> {
        let Some(graph) = graph else {
            tracing::debug!("no current graph; skipping chart reset");
            return Ok(ResetOutcome::Skipped);
        };

        self.store.replace_chart_columns(graph)?;

        let mut rows_seen = 0;
        let mut colors_cleared = 0;
        for table in self.store.term_tables(graph)? {
            let rows = self.store.list_term_results(graph, &table)?;
            rows_seen += rows.len();
            for row in rows.iter().filter(|row| !row.chart_color.is_empty()) {
                self.store.set_chart_color(graph, &table, row.term.id(), "")?;
                colors_cleared += 1;
            }
        }

        if rows_seen == 0 {
            tracing::debug!(%graph, "no term rows; chart columns cleared");
            return Ok(ResetOutcome::Reset {
                colors_cleared: 0,
                model_notified: false,
            });
        }

        let model_notified = match self.model.as_deref_mut() {
            Some(model) => {
                model.table_data_changed();
                true
            }
            None => false,
        };

        tracing::info!(%graph, colors_cleared, model_notified, "reset enrichment chart");
        Ok(ResetOutcome::Reset {
            colors_cleared,
            model_notified,
        })
    }
}
