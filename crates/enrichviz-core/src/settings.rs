//! Per-graph enrichment query settings, persisted with the session.

use serde::{Deserialize, Serialize};

/// Organism queried when none is configured.
pub const DEFAULT_ORGANISM: &str = "hsapiens";
/// Multiple-testing correction used when none is configured.
pub const DEFAULT_THRESHOLD_METHOD: &str = "g_SCS";

/// Parameters of an enrichment query. `None` fields are left to the
/// request's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySettings {
    #[serde(default = "default_organism")]
    pub organism: String,
    #[serde(default)]
    pub user_threshold: Option<f64>,
    #[serde(default)]
    pub all_results: Option<bool>,
    /// Exclude electronic GO annotations. Requests default to `true`.
    #[serde(default)]
    pub no_iea: Option<bool>,
    #[serde(default)]
    pub significance_threshold_method: Option<String>,
    /// Node attribute holding gene identifiers; node names are used when unset.
    #[serde(default)]
    pub gene_id_column: Option<String>,
}

fn default_organism() -> String {
    DEFAULT_ORGANISM.to_string()
}

impl Default for QuerySettings {
    fn default() -> Self {
        QuerySettings {
            organism: default_organism(),
            user_threshold: None,
            all_results: None,
            no_iea: None,
            significance_threshold_method: None,
            gene_id_column: None,
        }
    }
}

impl QuerySettings {
    pub fn effective_no_iea(&self) -> bool {
        self.no_iea.unwrap_or(true)
    }

    pub fn effective_threshold_method(&self) -> &str {
        self.significance_threshold_method
            .as_deref()
            .unwrap_or(DEFAULT_THRESHOLD_METHOD)
    }
}
