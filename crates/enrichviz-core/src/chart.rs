//! Chart types and the renderer directive constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Name of the node column holding per-term membership flags. The renderer
/// reads slice weights from it, so the directives below reference it by name.
pub const TERM_FLAGS_COLUMN: &str = "enrichmentTermsIntegers";
/// Node column holding per-term names (parallel to [`TERM_FLAGS_COLUMN`]).
pub const TERM_NAMES_COLUMN: &str = "enrichmentTermsNames";
/// Node column holding the composed glyph directive.
pub const GLYPH_COLUMN: &str = "enrichmentTermsPassthrough";

/// Directive for `Pie` and `SplitPie`.
pub const PIE_CHART: &str =
    "piechart: attributelist=\"enrichmentTermsIntegers\" showlabels=\"false\" colorlist=\"";
/// Directive for `Full`.
pub const CIRCOS_CHART: &str =
    "circoschart: firstarc=1.0 arcwidth=0.4 attributelist=\"enrichmentTermsIntegers\" showlabels=\"false\" colorlist=\"";
/// Directive for `Teeth`.
pub const CIRCOS_CHART_BORDERLESS: &str =
    "circoschart: borderwidth=0 firstarc=1.0 arcwidth=0.4 attributelist=\"enrichmentTermsIntegers\" showlabels=\"false\" colorlist=\"";

/// Glyph layout. The set is closed; anything else is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartType {
    /// Ring of uniform arcs, one per selected term.
    Full,
    /// Uniform pie, one slice per selected term.
    Pie,
    /// Pie whose non-member slices are drawn white.
    SplitPie,
    /// Ring whose non-member arcs are transparent.
    Teeth,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [
        ChartType::Full,
        ChartType::Pie,
        ChartType::SplitPie,
        ChartType::Teeth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::Full => "FULL",
            ChartType::Pie => "PIE",
            ChartType::SplitPie => "SPLIT_PIE",
            ChartType::Teeth => "TEETH",
        }
    }

    /// True for layouts that draw a slice per term regardless of membership.
    pub fn ignores_membership(self) -> bool {
        matches!(self, ChartType::Full | ChartType::Pie)
    }

    /// Renderer directive prefix, up to and including the opening quote of
    /// the color list.
    pub fn directive(self) -> &'static str {
        match self {
            ChartType::Pie | ChartType::SplitPie => PIE_CHART,
            ChartType::Teeth => CIRCOS_CHART_BORDERLESS,
            ChartType::Full => CIRCOS_CHART,
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownChartType {
                name: s.to_string(),
            })
    }
}
