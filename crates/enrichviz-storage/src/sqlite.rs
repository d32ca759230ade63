//! SQLite implementation of [`GraphStore`].
//!
//! [`SqliteStore`] persists sessions in a SQLite database with WAL mode,
//! foreign-key cascades from graphs to all derived rows, and automatic
//! schema migrations. Vectors and nested structs are stored as JSON TEXT
//! columns via serde_json. Multi-row writes run in one transaction.

use rusqlite::{params, Connection, OptionalExtension};

use enrichviz_core::{EnrichmentTerm, GraphId, NetworkGraph, NodeId, Palette, QuerySettings, TermId};

use crate::error::StorageError;
use crate::traits::GraphStore;
use crate::types::{ensure_unique_terms, GraphInfo, GraphSummary, NodeEncoding, TermResultRow};

/// SQLite-backed implementation of [`GraphStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }

    /// Verifies a graph exists, returning an error if not.
    fn assert_graph_exists(&self, id: GraphId) -> Result<(), StorageError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM graphs WHERE id = ?1)",
            params![id.0],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(StorageError::GraphNotFound(id.0));
        }
        Ok(())
    }
}

impl GraphStore for SqliteStore {
    // -------------------------------------------------------------------
    // Graphs
    // -------------------------------------------------------------------

    fn create_graph(&mut self, name: &str, graph: &NetworkGraph) -> Result<GraphId, StorageError> {
        let graph_json = serde_json::to_string(graph)?;
        self.conn.execute(
            "INSERT INTO graphs (name, node_count, graph_json) VALUES (?1, ?2, ?3)",
            params![name, graph.node_count() as i64, graph_json],
        )?;
        Ok(GraphId(self.conn.last_insert_rowid()))
    }

    fn load_graph(&self, id: GraphId) -> Result<NetworkGraph, StorageError> {
        let graph_json: Option<String> = self
            .conn
            .query_row(
                "SELECT graph_json FROM graphs WHERE id = ?1",
                params![id.0],
                |row| row.get(0),
            )
            .optional()?;
        let graph_json = graph_json.ok_or(StorageError::GraphNotFound(id.0))?;
        Ok(serde_json::from_str(&graph_json)?)
    }

    fn delete_graph(&mut self, id: GraphId) -> Result<(), StorageError> {
        let deleted = self
            .conn
            .execute("DELETE FROM graphs WHERE id = ?1", params![id.0])?;
        if deleted == 0 {
            return Err(StorageError::GraphNotFound(id.0));
        }
        Ok(())
    }

    fn list_graphs(&self) -> Result<Vec<GraphInfo>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name, node_count FROM graphs ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(GraphInfo {
                id: GraphId(row.get(0)?),
                name: row.get(1)?,
                node_count: row.get::<_, i64>(2)? as usize,
            })
        })?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    // -------------------------------------------------------------------
    // Node table chart columns
    // -------------------------------------------------------------------

    fn replace_chart_columns(&mut self, graph: GraphId) -> Result<(), StorageError> {
        self.assert_graph_exists(graph)?;
        self.conn.execute(
            "DELETE FROM node_charts WHERE graph_id = ?1",
            params![graph.0],
        )?;
        Ok(())
    }

    fn set_node_encoding(
        &mut self,
        graph: GraphId,
        node: NodeId,
        encoding: &NodeEncoding,
    ) -> Result<(), StorageError> {
        self.set_node_encodings(graph, &[(node, encoding.clone())])
    }

    fn set_node_encodings(
        &mut self,
        graph: GraphId,
        rows: &[(NodeId, NodeEncoding)],
    ) -> Result<(), StorageError> {
        let network = self.load_graph(graph)?;
        if let Some(&(node, _)) = rows.iter().find(|(node, _)| !network.contains(*node)) {
            return Err(StorageError::NodeNotFound {
                graph: graph.0,
                node: node.0,
            });
        }
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO node_charts
                     (graph_id, node_id, term_flags_json, term_names_json, glyph_spec)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(graph_id, node_id) DO UPDATE SET
                     term_flags_json = excluded.term_flags_json,
                     term_names_json = excluded.term_names_json,
                     glyph_spec = excluded.glyph_spec",
            )?;
            for (node, encoding) in rows {
                stmt.execute(params![
                    graph.0,
                    node.0,
                    serde_json::to_string(&encoding.term_flags)?,
                    serde_json::to_string(&encoding.term_names)?,
                    encoding.glyph_spec,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn get_node_encoding(
        &self,
        graph: GraphId,
        node: NodeId,
    ) -> Result<Option<NodeEncoding>, StorageError> {
        self.assert_graph_exists(graph)?;
        let row: Option<(String, String, Option<String>)> = self
            .conn
            .query_row(
                "SELECT term_flags_json, term_names_json, glyph_spec FROM node_charts
                 WHERE graph_id = ?1 AND node_id = ?2",
                params![graph.0, node.0],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        match row {
            Some((flags_json, names_json, glyph_spec)) => Ok(Some(NodeEncoding {
                term_flags: serde_json::from_str(&flags_json)?,
                term_names: serde_json::from_str(&names_json)?,
                glyph_spec,
            })),
            None => Ok(None),
        }
    }

    fn node_encodings(&self, graph: GraphId) -> Result<Vec<(NodeId, NodeEncoding)>, StorageError> {
        self.assert_graph_exists(graph)?;
        let mut stmt = self.conn.prepare_cached(
            "SELECT node_id, term_flags_json, term_names_json, glyph_spec FROM node_charts
             WHERE graph_id = ?1 ORDER BY node_id",
        )?;
        let rows = stmt.query_map(params![graph.0], |row| {
            let node_id: u32 = row.get(0)?;
            let flags_json: String = row.get(1)?;
            let names_json: String = row.get(2)?;
            let glyph_spec: Option<String> = row.get(3)?;
            Ok((node_id, flags_json, names_json, glyph_spec))
        })?;
        let mut result = Vec::new();
        for row in rows {
            let (node_id, flags_json, names_json, glyph_spec) = row?;
            result.push((
                NodeId(node_id),
                NodeEncoding {
                    term_flags: serde_json::from_str(&flags_json)?,
                    term_names: serde_json::from_str(&names_json)?,
                    glyph_spec,
                },
            ));
        }
        Ok(result)
    }

    // -------------------------------------------------------------------
    // Graph metadata row
    // -------------------------------------------------------------------

    fn set_graph_summary(
        &mut self,
        graph: GraphId,
        summary: &GraphSummary,
    ) -> Result<(), StorageError> {
        self.assert_graph_exists(graph)?;
        self.conn.execute(
            "INSERT INTO graph_summaries (graph_id, shown_term_names_json, shown_colors_json)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(graph_id) DO UPDATE SET
                 shown_term_names_json = excluded.shown_term_names_json,
                 shown_colors_json = excluded.shown_colors_json",
            params![
                graph.0,
                serde_json::to_string(&summary.shown_term_names)?,
                serde_json::to_string(&summary.shown_colors)?,
            ],
        )?;
        Ok(())
    }

    fn get_graph_summary(&self, graph: GraphId) -> Result<Option<GraphSummary>, StorageError> {
        self.assert_graph_exists(graph)?;
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT shown_term_names_json, shown_colors_json FROM graph_summaries
                 WHERE graph_id = ?1",
                params![graph.0],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        match row {
            Some((names_json, colors_json)) => Ok(Some(GraphSummary {
                shown_term_names: serde_json::from_str(&names_json)?,
                shown_colors: serde_json::from_str(&colors_json)?,
            })),
            None => Ok(None),
        }
    }

    // -------------------------------------------------------------------
    // Term-result tables
    // -------------------------------------------------------------------

    fn save_term_results(
        &mut self,
        graph: GraphId,
        table: &str,
        rows: &[TermResultRow],
    ) -> Result<(), StorageError> {
        self.assert_graph_exists(graph)?;
        ensure_unique_terms(graph, table, rows)?;
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM term_results WHERE graph_id = ?1 AND table_name = ?2",
            params![graph.0, table],
        )?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO term_results
                     (graph_id, table_name, position, term_id, term_json, chart_color)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for (position, row) in rows.iter().enumerate() {
                let term_json = serde_json::to_string(&row.term)?;
                stmt.execute(params![
                    graph.0,
                    table,
                    position as i64,
                    row.term.id().as_str(),
                    term_json,
                    row.chart_color,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn list_term_results(
        &self,
        graph: GraphId,
        table: &str,
    ) -> Result<Vec<TermResultRow>, StorageError> {
        self.assert_graph_exists(graph)?;
        let mut stmt = self.conn.prepare_cached(
            "SELECT term_json, chart_color FROM term_results
             WHERE graph_id = ?1 AND table_name = ?2 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![graph.0, table], |row| {
            let term_json: String = row.get(0)?;
            let chart_color: String = row.get(1)?;
            Ok((term_json, chart_color))
        })?;
        let mut result = Vec::new();
        for row in rows {
            let (term_json, chart_color) = row?;
            let term: EnrichmentTerm = serde_json::from_str(&term_json)?;
            result.push(TermResultRow { term, chart_color });
        }
        Ok(result)
    }

    fn term_tables(&self, graph: GraphId) -> Result<Vec<String>, StorageError> {
        self.assert_graph_exists(graph)?;
        let mut stmt = self.conn.prepare_cached(
            "SELECT DISTINCT table_name FROM term_results WHERE graph_id = ?1 ORDER BY table_name",
        )?;
        let rows = stmt.query_map(params![graph.0], |row| row.get::<_, String>(0))?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    fn set_chart_color(
        &mut self,
        graph: GraphId,
        table: &str,
        term: &TermId,
        color: &str,
    ) -> Result<(), StorageError> {
        self.assert_graph_exists(graph)?;
        let updated = self.conn.execute(
            "UPDATE term_results SET chart_color = ?4
             WHERE graph_id = ?1 AND table_name = ?2 AND term_id = ?3",
            params![graph.0, table, term.as_str(), color],
        )?;
        if updated == 0 {
            return Err(StorageError::TermNotFound {
                graph: graph.0,
                table: table.to_string(),
                term: term.to_string(),
            });
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Session state
    // -------------------------------------------------------------------

    fn set_session_palette(
        &mut self,
        graph: GraphId,
        table: &str,
        palette: &Palette,
    ) -> Result<(), StorageError> {
        self.assert_graph_exists(graph)?;
        self.conn.execute(
            "INSERT INTO session_palettes (graph_id, table_name, palette_json) VALUES (?1, ?2, ?3)
             ON CONFLICT(graph_id, table_name) DO UPDATE SET palette_json = excluded.palette_json",
            params![graph.0, table, serde_json::to_string(palette)?],
        )?;
        Ok(())
    }

    fn get_session_palette(
        &self,
        graph: GraphId,
        table: &str,
    ) -> Result<Option<Palette>, StorageError> {
        self.assert_graph_exists(graph)?;
        let palette_json: Option<String> = self
            .conn
            .query_row(
                "SELECT palette_json FROM session_palettes WHERE graph_id = ?1 AND table_name = ?2",
                params![graph.0, table],
                |row| row.get(0),
            )
            .optional()?;
        match palette_json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn set_query_settings(
        &mut self,
        graph: GraphId,
        settings: &QuerySettings,
    ) -> Result<(), StorageError> {
        self.assert_graph_exists(graph)?;
        self.conn.execute(
            "INSERT INTO query_settings (graph_id, settings_json) VALUES (?1, ?2)
             ON CONFLICT(graph_id) DO UPDATE SET settings_json = excluded.settings_json",
            params![graph.0, serde_json::to_string(settings)?],
        )?;
        Ok(())
    }

    fn get_query_settings(&self, graph: GraphId) -> Result<QuerySettings, StorageError> {
        self.assert_graph_exists(graph)?;
        let settings_json: Option<String> = self
            .conn
            .query_row(
                "SELECT settings_json FROM query_settings WHERE graph_id = ?1",
                params![graph.0],
                |row| row.get(0),
            )
            .optional()?;
        match settings_json {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(QuerySettings::default()),
        }
    }
}
