//! Error type for the chart pipeline.

use thiserror::Error;

use enrichviz_core::CoreError;
use enrichviz_storage::StorageError;

/// Errors produced while projecting, resetting, or resolving palettes.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A caller contract violation detected by the core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store failed; the run is aborted and may have written some rows.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Neither a session palette nor the default palette could be resolved.
    #[error("default palette '{name}' from provider '{provider}' is not available")]
    DefaultPaletteMissing { provider: String, name: String },
}
