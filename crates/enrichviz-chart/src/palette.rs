//! Per-table palette resolution.

use enrichviz_core::palette::{DEFAULT_PALETTE_NAME, DEFAULT_PALETTE_PROVIDER};
use enrichviz_core::{GraphId, Palette, PaletteRegistry};
use enrichviz_storage::GraphStore;

use crate::error::ChartError;

/// Returns the palette recorded for `(graph, table)`, falling back to the
/// registry's default palette.
pub fn resolve_palette<S, R>(
    store: &S,
    graph: GraphId,
    table: &str,
    registry: &R,
) -> Result<Palette, ChartError>
where
    S: GraphStore + ?Sized,
    R: PaletteRegistry + ?Sized,
{
    if let Some(palette) = store.get_session_palette(graph, table)? {
        return Ok(palette);
    }
    registry
        .palette(DEFAULT_PALETTE_PROVIDER, DEFAULT_PALETTE_NAME)
        .ok_or_else(|| ChartError::DefaultPaletteMissing {
            provider: DEFAULT_PALETTE_PROVIDER.to_string(),
            name: DEFAULT_PALETTE_NAME.to_string(),
        })
}

/// Records the palette a user picked for one term table.
pub fn record_palette<S: GraphStore + ?Sized>(
    store: &mut S,
    graph: GraphId,
    table: &str,
    palette: &Palette,
) -> Result<(), ChartError> {
    store.set_session_palette(graph, table, palette)?;
    tracing::debug!(%graph, table, palette = %palette.name, "recorded session palette");
    Ok(())
}
