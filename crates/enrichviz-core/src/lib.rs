pub mod chart;
pub mod error;
pub mod glyph;
pub mod graph;
pub mod id;
pub mod palette;
pub mod selection;
pub mod settings;
pub mod term;

// Re-export commonly used types
pub use chart::ChartType;
pub use error::CoreError;
pub use glyph::{encode, GlyphEncoding};
pub use graph::{NetworkGraph, NetworkNode};
pub use id::{GraphId, NodeId, TermId};
pub use palette::{BrewerPalettes, Palette, PaletteRegistry};
pub use selection::{SelectedTerm, Selection};
pub use settings::QuerySettings;
pub use term::{EnrichmentTerm, TermSource, TermStats};
