//! Enrichment chart CLI.
//!
//! Provides the `enrichviz` binary for drawing, clearing, and inspecting the
//! per-node enrichment charts of a graph stored in a SQLite session file.
//!
//! Uses the same `enrichviz_chart` pipeline as the HTTP server, so a session
//! drawn here reads back identically through the API.

use std::process;

use clap::{Parser, Subcommand};

use enrichviz_chart::{
    record_colors, select_from_table, ChartError, ChartProjector, ChartResetter, NoView,
    ProjectOutcome, ResetOutcome, TableModel,
};
use enrichviz_core::{BrewerPalettes, ChartType, GraphId, TermId, TermSource};
use enrichviz_storage::{GraphStore, SqliteStore, StorageError};

/// Enrichment chart tools.
#[derive(Parser)]
#[command(name = "enrichviz", about = "Draw enrichment charts on stored graphs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Draw charts for an ordered term selection.
    Draw {
        /// Path to the session database file.
        #[arg(short, long)]
        db: String,

        /// Graph ID.
        #[arg(short, long)]
        graph: i64,

        /// Chart layout: FULL, PIE, SPLIT_PIE, TEETH.
        #[arg(short, long, default_value = "SPLIT_PIE")]
        chart_type: String,

        /// Term table the ids refer to (default: the aggregate table).
        #[arg(long)]
        table: Option<String>,

        /// Selected term as ID or ID=COLOR, in slice order.
        #[arg(short, long = "term", required = true)]
        terms: Vec<String>,
    },

    /// Clear chart columns and term colors.
    Reset {
        #[arg(short, long)]
        db: String,

        #[arg(short, long)]
        graph: i64,
    },

    /// Print the chart summary and every node's chart columns.
    Show {
        #[arg(short, long)]
        db: String,

        #[arg(short, long)]
        graph: i64,
    },
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Draw {
            db,
            graph,
            chart_type,
            table,
            terms,
        } => run_draw(&db, GraphId(graph), &chart_type, table, &terms),
        Commands::Reset { db, graph } => run_reset(&db, GraphId(graph)),
        Commands::Show { db, graph } => run_show(&db, GraphId(graph)),
    };
    process::exit(exit_code);
}

/// Execute the draw subcommand.
///
/// Returns exit code: 0 = success, 1 = usage or contract error,
/// 3 = storage error.
fn run_draw(
    db_path: &str,
    graph: GraphId,
    chart_type: &str,
    table: Option<String>,
    terms: &[String],
) -> i32 {
    let chart: ChartType = match chart_type.parse() {
        Ok(chart) => chart,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let choices: Vec<(TermId, Option<String>)> = terms.iter().map(|arg| parse_term(arg)).collect();
    let table = table.unwrap_or_else(|| TermSource::All.table());

    let mut store = match open_store(db_path) {
        Ok(store) => store,
        Err(code) => return code,
    };

    let result = select_from_table(&store, graph, &table, &choices, &BrewerPalettes).and_then(
        |selection| {
            if !selection.is_empty() {
                record_colors(&mut store, graph, &table, &selection)?;
            }
            ChartProjector::new(&mut store, &mut NoView).project(Some(graph), &selection, chart)
        },
    );

    match result {
        Ok(ProjectOutcome::Skipped) => print_json(&serde_json::json!({ "projected": false })),
        Ok(ProjectOutcome::Projected { nodes, glyphs, .. }) => print_json(&serde_json::json!({
            "projected": true,
            "chart_type": chart.as_str(),
            "nodes": nodes,
            "glyphs": glyphs,
        })),
        Err(e) => report(e),
    }
}

/// Execute the reset subcommand.
fn run_reset(db_path: &str, graph: GraphId) -> i32 {
    let mut store = match open_store(db_path) {
        Ok(store) => store,
        Err(code) => return code,
    };

    match ChartResetter::<_, dyn TableModel>::new(&mut store, None).reset(Some(graph)) {
        Ok(ResetOutcome::Skipped) => print_json(&serde_json::json!({ "reset": false })),
        Ok(ResetOutcome::Reset { colors_cleared, .. }) => print_json(&serde_json::json!({
            "reset": true,
            "colors_cleared": colors_cleared,
        })),
        Err(e) => report(e),
    }
}

/// Execute the show subcommand.
fn run_show(db_path: &str, graph: GraphId) -> i32 {
    let store = match open_store(db_path) {
        Ok(store) => store,
        Err(code) => return code,
    };

    let loaded = store
        .get_graph_summary(graph)
        .and_then(|summary| Ok((summary, store.node_encodings(graph)?)));
    let (summary, encodings) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => return report(ChartError::Storage(e)),
    };

    let nodes: Vec<serde_json::Value> = encodings
        .into_iter()
        .map(|(node, encoding)| serde_json::json!({ "node": node, "encoding": encoding }))
        .collect();
    print_json(&serde_json::json!({
        "graph": graph,
        "summary": summary,
        "nodes": nodes,
    }))
}

/// Splits `ID=COLOR` at the last `=`; a bare `ID` takes its color from the
/// table palette.
fn parse_term(arg: &str) -> (TermId, Option<String>) {
    match arg.rsplit_once('=') {
        Some((id, color)) if !color.is_empty() => (TermId::new(id), Some(color.to_string())),
        Some((id, _)) => (TermId::new(id), None),
        None => (TermId::new(arg), None),
    }
}

fn open_store(db_path: &str) -> Result<SqliteStore, i32> {
    SqliteStore::new(db_path).map_err(|e: StorageError| {
        eprintln!("Error: failed to open database '{}': {}", db_path, e);
        3
    })
}

fn report(err: ChartError) -> i32 {
    match err {
        ChartError::Storage(e) => {
            eprintln!("Storage error: {}", e);
            3
        }
        other => {
            eprintln!("Error: {}", other);
            1
        }
    }
}

fn print_json(value: &serde_json::Value) -> i32 {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize result: {}\"}}", e));
    println!("{}", json);
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_arguments() {
        assert_eq!(parse_term("GO:0006915"), (TermId::new("GO:0006915"), None));
        assert_eq!(
            parse_term("GO:0006915=#ff0000"),
            (TermId::new("GO:0006915"), Some("#ff0000".to_string()))
        );
        assert_eq!(parse_term("KEGG:04115="), (TermId::new("KEGG:04115"), None));
    }

    #[test]
    fn cli_parses_repeated_terms() {
        let cli = Cli::try_parse_from([
            "enrichviz",
            "draw",
            "--db",
            "s.db",
            "--graph",
            "1",
            "--term",
            "A=#ff0000",
            "--term",
            "B",
        ])
        .unwrap();
        match cli.command {
            Commands::Draw { terms, chart_type, .. } => {
                assert_eq!(terms, vec!["A=#ff0000", "B"]);
                assert_eq!(chart_type, "SPLIT_PIE");
            }
            _ => panic!("expected draw"),
        }
    }

    #[test]
    fn storage_errors_exit_with_three() {
        assert_eq!(report(ChartError::Storage(StorageError::GraphNotFound(1))), 3);
        assert_eq!(
            report(ChartError::Core(enrichviz_core::CoreError::UnknownChartType {
                name: "x".into()
            })),
            1
        );
    }
}
