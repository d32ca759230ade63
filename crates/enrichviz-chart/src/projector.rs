//! Projection of a term selection onto a graph's node table.
//!
//! [`ChartProjector::project`] recomputes every node's chart columns from
//! scratch for the given selection, writes them to the store, asks the active
//! view (if any) to redraw, and records what is shown on the graph's metadata
//! row.
//!
//! Every run is a full recomputation: node vectors are rebuilt from empty
//! for the first selected term, never patched. Re-running with the same
//! inputs therefore produces the same stored state.

use enrichviz_core::chart::GLYPH_COLUMN;
use enrichviz_core::{encode, ChartType, GraphId, Selection};
use enrichviz_storage::{GraphStore, GraphSummary, NodeEncoding};

use crate::error::ChartError;
use crate::view::ViewRefresher;

/// What a call to [`ChartProjector::project`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectOutcome {
    /// No graph or an empty selection; nothing was touched.
    Skipped,
    Projected {
        /// Node rows written.
        nodes: usize,
        /// Nodes that received a glyph.
        glyphs: usize,
        /// Whether an active view was refreshed.
        view_refreshed: bool,
    },
}

/// Computes and stores per-node chart columns for a selection.
pub struct ChartProjector<'a, S: GraphStore + ?Sized, V: ViewRefresher + ?Sized> {
    store: &'a mut S,
    views: &'a mut V,
}

impl<'a, S: GraphStore + ?Sized, V: ViewRefresher + ?Sized> ChartProjector<'a, S, V> {
    pub fn new(store: &'a mut S, views: &'a mut V) -> Self {
        ChartProjector { store, views }
    }

    /// Projects `selection` onto `graph` using `chart`.
    ///
    /// Absent graph or empty selection is a documented no-op. All node rows
    /// are written in one batch; a storage failure aborts the run before the
    /// view or the summary is touched.
    pub fn project(
        &mut self,
        graph: Option<GraphId>,
        selection: &Selection,
        chart: ChartType,
    ) -> Result<ProjectOutcome, ChartError> {
        let Some(graph) = graph else {
            tracing::debug!("no current graph; skipping chart projection");
            return Ok(ProjectOutcome::Skipped);
        };
        if selection.is_empty() {
            tracing::debug!(%graph, "empty selection; skipping chart projection");
            return Ok(ProjectOutcome::Skipped);
        }

        self.store.replace_chart_columns(graph)?;
        let network = self.store.load_graph(graph)?;
        let node_ids = network.node_ids();
        let colors = selection.ordered_colors();

        // One row per node, in node order; rebuilt from empty on every run.
        let mut rows: Vec<NodeEncoding> = vec![NodeEncoding::default(); node_ids.len()];
        for selected in selection.iter() {
            let term = &selected.term;
            for (row, &node) in rows.iter_mut().zip(&node_ids) {
                if term.covers(node) {
                    row.term_flags.push(1);
                    row.term_names.push(term.name().to_string());
                } else {
                    row.term_flags.push(0);
                    row.term_names.push(String::new());
                }
            }
        }

        let mut glyphs = 0;
        let mut encoded_rows = Vec::with_capacity(rows.len());
        for (mut row, &node) in rows.into_iter().zip(&node_ids) {
            let encoded = encode(&colors, &row.term_flags, chart)?;
            if encoded.spec.is_some() {
                glyphs += 1;
            }
            row.term_flags = encoded.adjusted_flags;
            row.glyph_spec = encoded.spec;
            encoded_rows.push((node, row));
        }
        self.store.set_node_encodings(graph, &encoded_rows)?;

        let view_refreshed =
            self.views.show_charts(graph, GLYPH_COLUMN, true) && self.views.refresh(graph);

        self.store.set_graph_summary(
            graph,
            &GraphSummary {
                shown_term_names: selection.term_names(),
                shown_colors: colors,
            },
        )?;

        tracing::info!(
            %graph,
            chart = %chart,
            terms = selection.len(),
            nodes = node_ids.len(),
            glyphs,
            view_refreshed,
            "projected enrichment chart"
        );

        Ok(ProjectOutcome::Projected {
            nodes: node_ids.len(),
            glyphs,
            view_refreshed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::testing::RecordingView;
    use crate::view::NoView;
    use enrichviz_core::glyph::{BLANK_SLICE, TRANSPARENT_SLICE};
    use enrichviz_core::{EnrichmentTerm, NetworkGraph, NetworkNode, NodeId, TermSource};
    use enrichviz_storage::{InMemoryStore, SqliteStore};
    use proptest::prelude::*;

    fn term(id: &str, name: &str, members: &[u32]) -> EnrichmentTerm {
        EnrichmentTerm::new(
            id,
            name,
            TermSource::GoBiologicalProcess,
            members.iter().map(|&n| NodeId(n)),
        )
    }

    /// Store holding one graph with nodes n1..n4 (ids 0..3).
    fn store_with_four_nodes() -> (InMemoryStore, GraphId) {
        let mut graph = NetworkGraph::new();
        for name in ["n1", "n2", "n3", "n4"] {
            graph.add_node(NetworkNode::named(name));
        }
        let mut store = InMemoryStore::new();
        let id = store.create_graph("scenario", &graph).unwrap();
        (store, id)
    }

    fn term_a_b() -> Selection {
        [
            (term("A", "TermA", &[0, 1]), Some("#ff0000".to_string())),
            (term("B", "TermB", &[1, 2]), Some("#00ff00".to_string())),
        ]
        .into_iter()
        .collect()
    }

    fn encoding(store: &InMemoryStore, graph: GraphId, node: u32) -> NodeEncoding {
        store.get_node_encoding(graph, NodeId(node)).unwrap().unwrap()
    }

    fn colors_of(spec: &str) -> Vec<String> {
        let start = spec.find("colorlist=\"").unwrap() + "colorlist=\"".len();
        spec[start..spec.len() - 1]
            .split(',')
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn split_pie_scenario() {
        let (mut store, graph) = store_with_four_nodes();
        let outcome = ChartProjector::new(&mut store, &mut NoView)
            .project(Some(graph), &term_a_b(), ChartType::SplitPie)
            .unwrap();
        assert_eq!(
            outcome,
            ProjectOutcome::Projected {
                nodes: 4,
                glyphs: 3,
                view_refreshed: false
            }
        );

        let n1 = encoding(&store, graph, 0);
        assert_eq!(n1.term_flags, vec![1, 1]);
        assert_eq!(n1.term_names, vec!["TermA", ""]);
        assert_eq!(colors_of(n1.glyph_spec.as_deref().unwrap()), vec!["#ff0000", BLANK_SLICE]);

        let n2 = encoding(&store, graph, 1);
        assert_eq!(n2.term_flags, vec![1, 1]);
        assert_eq!(n2.term_names, vec!["TermA", "TermB"]);
        assert_eq!(colors_of(n2.glyph_spec.as_deref().unwrap()), vec!["#ff0000", "#00ff00"]);

        let n3 = encoding(&store, graph, 2);
        assert_eq!(n3.term_flags, vec![1, 1]);
        assert_eq!(n3.term_names, vec!["", "TermB"]);
        assert_eq!(colors_of(n3.glyph_spec.as_deref().unwrap()), vec![BLANK_SLICE, "#00ff00"]);

        let n4 = encoding(&store, graph, 3);
        assert_eq!(n4.glyph_spec, None);
        assert_eq!(n4.term_flags, vec![0, 0]);
        assert_eq!(n4.term_names, vec!["", ""]);

        let summary = store.get_graph_summary(graph).unwrap().unwrap();
        assert_eq!(summary.shown_term_names, vec!["TermA", "TermB"]);
        assert_eq!(summary.shown_colors, vec!["#ff0000", "#00ff00"]);
    }

    #[test]
    fn reordering_changes_every_vector() {
        let (mut store, graph) = store_with_four_nodes();
        let reversed: Selection = [
            (term("B", "TermB", &[1, 2]), Some("#00ff00".to_string())),
            (term("A", "TermA", &[0, 1]), Some("#ff0000".to_string())),
        ]
        .into_iter()
        .collect();

        ChartProjector::new(&mut store, &mut NoView)
            .project(Some(graph), &reversed, ChartType::Pie)
            .unwrap();

        let n1 = encoding(&store, graph, 0);
        assert_eq!(n1.term_flags, vec![0, 1]);
        assert_eq!(n1.term_names, vec!["", "TermA"]);
        assert_eq!(colors_of(n1.glyph_spec.as_deref().unwrap()), vec!["#00ff00", "#ff0000"]);

        let summary = store.get_graph_summary(graph).unwrap().unwrap();
        assert_eq!(summary.shown_term_names, vec!["TermB", "TermA"]);
        assert_eq!(summary.shown_colors, vec!["#00ff00", "#ff0000"]);
    }

    #[test]
    fn teeth_uses_alpha_and_fills_flags() {
        let (mut store, graph) = store_with_four_nodes();
        ChartProjector::new(&mut store, &mut NoView)
            .project(Some(graph), &term_a_b(), ChartType::Teeth)
            .unwrap();
        let n3 = encoding(&store, graph, 2);
        assert_eq!(n3.term_flags, vec![1, 1]);
        assert_eq!(
            colors_of(n3.glyph_spec.as_deref().unwrap()),
            vec![TRANSPARENT_SLICE, "#00ff00ff"]
        );
        assert!(n3.glyph_spec.unwrap().starts_with("circoschart: borderwidth=0"));
    }

    #[test]
    fn full_ignores_membership_but_keeps_flags() {
        let (mut store, graph) = store_with_four_nodes();
        ChartProjector::new(&mut store, &mut NoView)
            .project(Some(graph), &term_a_b(), ChartType::Full)
            .unwrap();
        let n3 = encoding(&store, graph, 2);
        assert_eq!(n3.term_flags, vec![0, 1]);
        assert_eq!(colors_of(n3.glyph_spec.as_deref().unwrap()), vec!["#ff0000", "#00ff00"]);
        assert_eq!(encoding(&store, graph, 3).glyph_spec, None);
    }

    #[test]
    fn shrinking_selection_discards_old_columns() {
        let (mut store, graph) = store_with_four_nodes();
        let mut selection = term_a_b();
        ChartProjector::new(&mut store, &mut NoView)
            .project(Some(graph), &selection, ChartType::Pie)
            .unwrap();

        selection.remove(&"A".into());
        ChartProjector::new(&mut store, &mut NoView)
            .project(Some(graph), &selection, ChartType::Pie)
            .unwrap();

        let n1 = encoding(&store, graph, 0);
        assert_eq!(n1.term_flags, vec![0]);
        assert_eq!(n1.glyph_spec, None);
        assert_eq!(encoding(&store, graph, 1).term_names, vec!["TermB"]);
    }

    #[test]
    fn absent_graph_or_empty_selection_is_a_no_op() {
        let (mut store, graph) = store_with_four_nodes();
        let mut no_view = NoView;
        let mut projector = ChartProjector::new(&mut store, &mut no_view);
        assert_eq!(
            projector.project(None, &term_a_b(), ChartType::Pie).unwrap(),
            ProjectOutcome::Skipped
        );
        assert_eq!(
            projector
                .project(Some(graph), &Selection::new(), ChartType::Pie)
                .unwrap(),
            ProjectOutcome::Skipped
        );
        assert!(store.node_encodings(graph).unwrap().is_empty());
        assert!(store.get_graph_summary(graph).unwrap().is_none());
    }

    #[test]
    fn missing_graph_aborts_with_storage_error() {
        let (mut store, _) = store_with_four_nodes();
        let err = ChartProjector::new(&mut store, &mut NoView)
            .project(Some(GraphId(77)), &term_a_b(), ChartType::Pie)
            .unwrap_err();
        assert!(matches!(err, ChartError::Storage(_)));
    }

    #[test]
    fn active_view_is_bound_and_refreshed() {
        let (mut store, graph) = store_with_four_nodes();
        let mut view = RecordingView {
            active: vec![graph],
            ..RecordingView::default()
        };
        let outcome = ChartProjector::new(&mut store, &mut view)
            .project(Some(graph), &term_a_b(), ChartType::Pie)
            .unwrap();
        assert!(matches!(
            outcome,
            ProjectOutcome::Projected {
                view_refreshed: true,
                ..
            }
        ));
        assert_eq!(view.bound, vec![(graph, GLYPH_COLUMN.to_string(), true)]);
        assert_eq!(view.refreshed, vec![graph]);
    }

    #[test]
    fn members_outside_the_graph_are_ignored() {
        let (mut store, graph) = store_with_four_nodes();
        let selection: Selection = [(term("X", "TermX", &[3, 40]), Some("#123456".to_string()))]
            .into_iter()
            .collect();
        let outcome = ChartProjector::new(&mut store, &mut NoView)
            .project(Some(graph), &selection, ChartType::Pie)
            .unwrap();
        assert!(matches!(outcome, ProjectOutcome::Projected { nodes: 4, glyphs: 1, .. }));
    }

    #[test]
    fn large_graph_projects_onto_sqlite() {
        let mut network = NetworkGraph::new();
        for i in 0..3000 {
            network.add_node(NetworkNode::named(format!("G{i}")));
        }
        let mut store = SqliteStore::in_memory().unwrap();
        let graph = store.create_graph("large", &network).unwrap();

        let evens: Vec<u32> = (0..3000).step_by(2).collect();
        let thirds: Vec<u32> = (0..3000).step_by(3).collect();
        let selection: Selection = [
            (term("A", "TermA", &evens), Some("#ff0000".to_string())),
            (term("B", "TermB", &thirds), Some("#00ff00".to_string())),
            (term("C", "TermC", &[1, 2999]), Some("#0000ff".to_string())),
        ]
        .into_iter()
        .collect();

        let mut no_view = NoView;
        let outcome = ChartProjector::new(&mut store, &mut no_view)
            .project(Some(graph), &selection, ChartType::SplitPie)
            .unwrap();
        assert!(matches!(outcome, ProjectOutcome::Projected { nodes: 3000, .. }));

        let rows = store.node_encodings(graph).unwrap();
        assert_eq!(rows.len(), 3000);
        assert_eq!(rows[6].1.term_names, vec!["TermA", "TermB", ""]);
        assert_eq!(rows[6].1.term_flags, vec![1, 1, 1]);
        assert_eq!(rows[2999].1.term_names, vec!["", "", "TermC"]);
        assert_eq!(rows[5].1.glyph_spec, None);
    }

    fn chart_strategy() -> impl Strategy<Value = ChartType> {
        prop::sample::select(ChartType::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn reprojection_is_idempotent(
            memberships in prop::collection::vec(prop::collection::vec(0u32..4, 0..4), 1..5),
            chart in chart_strategy(),
        ) {
            let selection: Selection = memberships
                .iter()
                .enumerate()
                .map(|(i, members)| {
                    let color = Some(format!("#0000{i:02}"));
                    (term(&format!("T{i}"), &format!("Term{i}"), members), color)
                })
                .collect();

            let (mut store, graph) = store_with_four_nodes();
            ChartProjector::new(&mut store, &mut NoView)
                .project(Some(graph), &selection, chart)
                .unwrap();
            let first_nodes = store.node_encodings(graph).unwrap();
            let first_summary = store.get_graph_summary(graph).unwrap();

            ChartProjector::new(&mut store, &mut NoView)
                .project(Some(graph), &selection, chart)
                .unwrap();
            prop_assert_eq!(store.node_encodings(graph).unwrap(), first_nodes.clone());
            prop_assert_eq!(store.get_graph_summary(graph).unwrap(), first_summary);

            for (node, enc) in first_nodes {
                prop_assert_eq!(enc.term_flags.len(), selection.len());
                prop_assert_eq!(enc.term_names.len(), selection.len());
                let member_of_any = selection.iter().any(|s| s.term.covers(node));
                prop_assert_eq!(enc.glyph_spec.is_some(), member_of_any);
            }
        }
    }
}
