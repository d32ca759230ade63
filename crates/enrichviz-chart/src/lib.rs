//! Chart pipeline: projects a term selection onto a graph's node table and
//! clears it again.
//!
//! - [`projector`]: ChartProjector, the per-node encoding pass
//! - [`resetter`]: ChartResetter, clears chart columns and term colors
//! - [`palette`]: session palette resolution
//! - [`table`]: selections built from stored term tables
//! - [`view`]: the render and table-model seams

pub mod error;
pub mod palette;
pub mod projector;
pub mod resetter;
pub mod table;
pub mod view;

pub use error::ChartError;
pub use palette::{record_palette, resolve_palette};
pub use projector::{ChartProjector, ProjectOutcome};
pub use resetter::{ChartResetter, ResetOutcome};
pub use table::{record_colors, select_from_table};
pub use view::{NoView, TableModel, ViewRefresher};
