//! EnrichmentService: the single coordinator between HTTP handlers and the
//! store, the chart pipeline, and the view registry.
//!
//! All business logic flows through [`EnrichmentService`]. Handlers are thin
//! wrappers that delegate to these methods. The remote enrichment request is
//! the one exception: handlers run it between [`EnrichmentService::enrichment_inputs`]
//! and [`EnrichmentService::store_enrichment`] so the service lock is not held
//! across the network call.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use enrichviz_chart::{
    record_colors, record_palette, resolve_palette, select_from_table, ChartProjector,
    ChartResetter, ProjectOutcome, ResetOutcome, TableModel, ViewRefresher,
};
use enrichviz_core::chart::GLYPH_COLUMN;
use enrichviz_core::{
    BrewerPalettes, ChartType, CoreError, EnrichmentTerm, GraphId, NetworkGraph, NetworkNode,
    NodeId, Palette, PaletteRegistry, QuerySettings, TermId, TermSource,
};
use enrichviz_storage::{
    GraphInfo, GraphStore, GraphSummary, NodeEncoding, SqliteStore, TermResultRow,
};

use crate::error::ApiError;
use crate::schema::charts::DrawChartsRequest;
use crate::schema::enrichment::TableCount;
use crate::schema::graphs::CreateGraphRequest;
use crate::views::{RenderView, ViewRegistry};

/// Everything a profile request needs, read under the service lock.
#[derive(Debug, Clone)]
pub struct EnrichmentInputs {
    pub network: NetworkGraph,
    pub settings: QuerySettings,
    pub query_genes: Vec<String>,
}

/// Table a request addresses when it names none.
pub fn default_table() -> String {
    TermSource::All.table()
}

/// The central service coordinating graphs, term tables, and charts.
pub struct EnrichmentService {
    store: SqliteStore,
    palettes: BrewerPalettes,
    views: Arc<ViewRegistry>,
}

impl EnrichmentService {
    /// Creates a service backed by the SQLite database at `db_path`.
    pub fn new(db_path: &str, views: Arc<ViewRegistry>) -> Result<Self, ApiError> {
        let store = SqliteStore::new(db_path)
            .map_err(|e| ApiError::InternalError(format!("failed to open store: {}", e)))?;
        Ok(EnrichmentService {
            store,
            palettes: BrewerPalettes,
            views,
        })
    }

    /// Creates a service over an in-memory database (for testing).
    pub fn in_memory(views: Arc<ViewRegistry>) -> Result<Self, ApiError> {
        let store = SqliteStore::in_memory()
            .map_err(|e| ApiError::InternalError(format!("failed to open store: {}", e)))?;
        Ok(EnrichmentService {
            store,
            palettes: BrewerPalettes,
            views,
        })
    }

    // -------------------------------------------------------------------
    // Graphs
    // -------------------------------------------------------------------

    pub fn create_graph(&mut self, req: CreateGraphRequest) -> Result<GraphInfo, ApiError> {
        let mut network = NetworkGraph::new();
        let ids: Vec<NodeId> = req
            .nodes
            .into_iter()
            .map(|spec| {
                let node = spec
                    .attributes
                    .into_iter()
                    .fold(NetworkNode::named(spec.name), |node, (key, value)| {
                        node.with_attribute(key, value)
                    });
                network.add_node(node)
            })
            .collect();

        for interaction in req.interactions {
            let (Some(&source), Some(&target)) =
                (ids.get(interaction.source), ids.get(interaction.target))
            else {
                return Err(ApiError::BadRequest(format!(
                    "interaction {}-{} references a node outside the {} given",
                    interaction.source,
                    interaction.target,
                    ids.len()
                )));
            };
            network.add_interaction(source, target, interaction.kind)?;
        }

        let id = self.store.create_graph(&req.name, &network)?;
        tracing::info!(graph = %id, nodes = ids.len(), "created graph");
        Ok(GraphInfo {
            id,
            name: req.name,
            node_count: network.node_count(),
        })
    }

    pub fn list_graphs(&self) -> Result<Vec<GraphInfo>, ApiError> {
        Ok(self.store.list_graphs()?)
    }

    /// Deletes a graph, its derived rows, and its view.
    pub fn delete_graph(&mut self, graph: GraphId) -> Result<(), ApiError> {
        self.store.delete_graph(graph)?;
        self.views.close(graph);
        Ok(())
    }

    pub fn settings(&self, graph: GraphId) -> Result<QuerySettings, ApiError> {
        Ok(self.store.get_query_settings(graph)?)
    }

    pub fn set_settings(
        &mut self,
        graph: GraphId,
        settings: &QuerySettings,
    ) -> Result<(), ApiError> {
        self.store.set_query_settings(graph, settings)?;
        Ok(())
    }

    // -------------------------------------------------------------------
    // Enrichment
    // -------------------------------------------------------------------

    /// Collects the graph, its settings, and the query gene names for a
    /// profile request. `nodes` restricts the query; all nodes otherwise.
    pub fn enrichment_inputs(
        &self,
        graph: GraphId,
        nodes: Option<&[u32]>,
    ) -> Result<EnrichmentInputs, ApiError> {
        let network = self.store.load_graph(graph)?;
        let settings = self.store.get_query_settings(graph)?;

        let node_ids = match nodes {
            Some(ids) => {
                let ids: Vec<NodeId> = ids.iter().map(|&id| NodeId(id)).collect();
                if let Some(&id) = ids.iter().find(|id| !network.contains(**id)) {
                    return Err(CoreError::NodeNotFound { id }.into());
                }
                ids
            }
            None => network.node_ids(),
        };

        let column = settings.gene_id_column.as_deref();
        let mut seen = BTreeSet::new();
        let query_genes: Vec<String> = node_ids
            .iter()
            .filter_map(|&id| network.canonical_name(id, column))
            .filter(|name| !name.is_empty() && seen.insert(name.to_string()))
            .map(str::to_string)
            .collect();

        if query_genes.is_empty() {
            return Err(ApiError::BadRequest(
                "no query genes: selected nodes carry no usable names".to_string(),
            ));
        }

        Ok(EnrichmentInputs {
            network,
            settings,
            query_genes,
        })
    }

    /// Stores decoded terms into one table per source plus the aggregate
    /// table. Tables from an earlier run that got no rows this time are
    /// dropped. A term id reported twice keeps its first occurrence.
    pub fn store_enrichment(
        &mut self,
        graph: GraphId,
        terms: Vec<EnrichmentTerm>,
    ) -> Result<Vec<TableCount>, ApiError> {
        let mut tables: BTreeMap<String, Vec<TermResultRow>> = BTreeMap::new();
        let all_table = default_table();
        let mut seen = BTreeSet::new();
        for term in terms {
            if !seen.insert(term.id().clone()) {
                tracing::debug!(%graph, term = %term.id(), "dropping repeated term");
                continue;
            }
            tables
                .entry(term.source().table())
                .or_default()
                .push(TermResultRow::new(term.clone()));
            tables
                .entry(all_table.clone())
                .or_default()
                .push(TermResultRow::new(term));
        }

        for stale in self.store.term_tables(graph)? {
            if !tables.contains_key(&stale) {
                self.store.save_term_results(graph, &stale, &[])?;
            }
        }

        let mut counts = Vec::with_capacity(tables.len());
        for (table, rows) in &tables {
            self.store.save_term_results(graph, table, rows)?;
            counts.push(TableCount {
                table: table.clone(),
                rows: rows.len(),
            });
        }

        tracing::info!(%graph, tables = counts.len(), "stored enrichment results");
        Ok(counts)
    }

    pub fn terms(&self, graph: GraphId, table: &str) -> Result<Vec<TermResultRow>, ApiError> {
        self.store.load_graph(graph)?;
        Ok(self.store.list_term_results(graph, table)?)
    }

    // -------------------------------------------------------------------
    // Charts
    // -------------------------------------------------------------------

    /// Builds the selection from term-table rows, records the chosen colors
    /// on those rows, and projects the charts.
    pub fn draw_charts(
        &mut self,
        graph: GraphId,
        req: &DrawChartsRequest,
    ) -> Result<ProjectOutcome, ApiError> {
        let chart: ChartType = req.chart_type.parse()?;
        let table = req.table.clone().unwrap_or_else(default_table);
        let choices: Vec<(TermId, Option<String>)> = req
            .terms
            .iter()
            .map(|choice| (choice.id.clone(), choice.color.clone()))
            .collect();
        let selection = select_from_table(&self.store, graph, &table, &choices, &self.palettes)?;
        let colors_changed = !selection.is_empty()
            && record_colors(&mut self.store, graph, &table, &selection)? > 0;

        let mut views: &ViewRegistry = &self.views;
        let outcome = ChartProjector::new(&mut self.store, &mut views).project(
            Some(graph),
            &selection,
            chart,
        )?;

        if colors_changed {
            if let Some(mut model) = self.views.table_model(graph) {
                model.table_data_changed();
            }
        }
        Ok(outcome)
    }

    pub fn reset_charts(&mut self, graph: GraphId) -> Result<ResetOutcome, ApiError> {
        let mut model = self.views.table_model(graph);
        let outcome = ChartResetter::new(&mut self.store, model.as_mut()).reset(Some(graph))?;
        Ok(outcome)
    }

    pub fn chart_summary(&self, graph: GraphId) -> Result<Option<GraphSummary>, ApiError> {
        Ok(self.store.get_graph_summary(graph)?)
    }

    pub fn node_chart(
        &self,
        graph: GraphId,
        node: NodeId,
    ) -> Result<Option<NodeEncoding>, ApiError> {
        if !self.store.load_graph(graph)?.contains(node) {
            return Err(CoreError::NodeNotFound { id: node }.into());
        }
        Ok(self.store.get_node_encoding(graph, node)?)
    }

    // -------------------------------------------------------------------
    // Palettes
    // -------------------------------------------------------------------

    pub fn palette(&self, graph: GraphId, table: &str) -> Result<Palette, ApiError> {
        self.store.load_graph(graph)?;
        Ok(resolve_palette(&self.store, graph, table, &self.palettes)?)
    }

    /// Records a registry palette for a term table.
    pub fn set_palette(
        &mut self,
        graph: GraphId,
        table: &str,
        provider: &str,
        name: &str,
    ) -> Result<Palette, ApiError> {
        let palette = self.palettes.palette(provider, name).ok_or_else(|| {
            ApiError::NotFound(format!("palette '{}' from provider '{}'", name, provider))
        })?;
        record_palette(&mut self.store, graph, table, &palette)?;
        Ok(palette)
    }

    // -------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------

    /// Opens the graph's render view, binding the glyph column when charts
    /// were already drawn.
    pub fn open_view(&self, graph: GraphId) -> Result<RenderView, ApiError> {
        self.store.load_graph(graph)?;
        self.views.open(graph);
        if !self.store.node_encodings(graph)?.is_empty() {
            let mut views: &ViewRegistry = &self.views;
            views.show_charts(graph, GLYPH_COLUMN, true);
        }
        self.views
            .get(graph)
            .ok_or_else(|| ApiError::InternalError(format!("view for {} vanished", graph)))
    }
}
