//! Building a selection from a stored term table, and writing the chosen
//! colors back onto its rows.

use enrichviz_core::{CoreError, GraphId, PaletteRegistry, Selection, TermId};
use enrichviz_storage::GraphStore;

use crate::error::ChartError;
use crate::palette::resolve_palette;

/// Selects `choices` from `table` in the given order.
///
/// A choice without a color takes the table palette's color at its position.
/// Every id must name a row of the table.
pub fn select_from_table<S, R>(
    store: &S,
    graph: GraphId,
    table: &str,
    choices: &[(TermId, Option<String>)],
    registry: &R,
) -> Result<Selection, ChartError>
where
    S: GraphStore + ?Sized,
    R: PaletteRegistry + ?Sized,
{
    let rows = store.list_term_results(graph, table)?;
    let palette = resolve_palette(store, graph, table, registry)?;

    let mut selection = Selection::new();
    for (position, (id, color)) in choices.iter().enumerate() {
        let row = rows
            .iter()
            .find(|row| row.term.id() == id)
            .ok_or_else(|| CoreError::TermNotFound { id: id.clone() })?;
        let color = color
            .clone()
            .or_else(|| palette.color_at(position).map(str::to_string));
        selection.insert(row.term.clone(), color);
    }
    Ok(selection)
}

/// Sets each row's chart color to its selected color, blanking rows that
/// are not selected. Returns the number of rows changed.
pub fn record_colors<S: GraphStore + ?Sized>(
    store: &mut S,
    graph: GraphId,
    table: &str,
    selection: &Selection,
) -> Result<usize, ChartError> {
    let mut changed = 0;
    for row in store.list_term_results(graph, table)? {
        let wanted = selection
            .get(row.term.id())
            .and_then(|selected| selected.color.as_deref())
            .unwrap_or_default();
        if row.chart_color != wanted {
            store.set_chart_color(graph, table, row.term.id(), wanted)?;
            changed += 1;
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enrichviz_core::{BrewerPalettes, EnrichmentTerm, NetworkGraph, NodeId, TermSource};
    use enrichviz_storage::{InMemoryStore, TermResultRow};

    const TABLE: &str = "Enrichment: All";

    fn store() -> (InMemoryStore, GraphId) {
        let mut store = InMemoryStore::new();
        let graph = store.create_graph("g", &NetworkGraph::new()).unwrap();
        let rows: Vec<TermResultRow> = ["R1", "R2", "R3"]
            .iter()
            .map(|id| {
                TermResultRow::new(EnrichmentTerm::new(
                    *id,
                    format!("{id} name"),
                    TermSource::Reactome,
                    [NodeId(0)],
                ))
            })
            .collect();
        store.save_term_results(graph, TABLE, &rows).unwrap();
        (store, graph)
    }

    fn choice(id: &str, color: Option<&str>) -> (TermId, Option<String>) {
        (TermId::new(id), color.map(str::to_string))
    }

    #[test]
    fn palette_fills_missing_colors_by_position() {
        let (store, graph) = store();
        let selection = select_from_table(
            &store,
            graph,
            TABLE,
            &[choice("R3", None), choice("R1", Some("#123456")), choice("R2", None)],
            &BrewerPalettes,
        )
        .unwrap();
        assert_eq!(selection.ordered_colors(), vec!["#A6CEE3", "#123456", "#B2DF8A"]);
        assert_eq!(selection.term_names(), vec!["R3 name", "R1 name", "R2 name"]);
    }

    #[test]
    fn unknown_id_is_rejected() {
        let (store, graph) = store();
        let err = select_from_table(&store, graph, TABLE, &[choice("R9", None)], &BrewerPalettes)
            .unwrap_err();
        assert!(matches!(err, ChartError::Core(CoreError::TermNotFound { .. })));
    }

    #[test]
    fn record_colors_blanks_unselected_rows() {
        let (mut store, graph) = store();
        let choices = [choice("R1", None), choice("R2", None)];
        let first = select_from_table(&store, graph, TABLE, &choices, &BrewerPalettes).unwrap();
        assert_eq!(record_colors(&mut store, graph, TABLE, &first).unwrap(), 2);

        let choices = [choice("R2", Some("#000000"))];
        let second = select_from_table(&store, graph, TABLE, &choices, &BrewerPalettes).unwrap();
        assert_eq!(record_colors(&mut store, graph, TABLE, &second).unwrap(), 2);

        let colors: Vec<String> = store
            .list_term_results(graph, TABLE)
            .unwrap()
            .into_iter()
            .map(|row| row.chart_color)
            .collect();
        assert_eq!(colors, vec!["", "#000000", ""]);
        assert_eq!(record_colors(&mut store, graph, TABLE, &second).unwrap(), 0);
    }
}
