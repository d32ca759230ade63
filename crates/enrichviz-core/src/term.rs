//! Enrichment terms as produced by the enrichment query.
//!
//! An [`EnrichmentTerm`] names a functional category and the set of graph
//! nodes it covers. Membership is fixed when the term is built: the fields
//! are private and no mutating accessor exists, so nothing downstream of the
//! query (in particular the chart pipeline) can alter it.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::{NodeId, TermId};

/// Data source a term was drawn from.
///
/// Mirrors the source codes reported by the enrichment service. `All` is the
/// aggregate bucket every result is filed under regardless of its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TermSource {
    #[serde(rename = "GO:MF")]
    GoMolecularFunction,
    #[serde(rename = "GO:CC")]
    GoCellularComponent,
    #[serde(rename = "GO:BP")]
    GoBiologicalProcess,
    #[serde(rename = "KEGG")]
    Kegg,
    #[serde(rename = "REAC")]
    Reactome,
    #[serde(rename = "WP")]
    WikiPathways,
    #[serde(rename = "TF")]
    Transfac,
    #[serde(rename = "MIRNA")]
    MirTarBase,
    #[serde(rename = "HPA")]
    HumanProteinAtlas,
    #[serde(rename = "CORUM")]
    Corum,
    #[serde(rename = "HP")]
    HumanPhenotype,
    #[serde(rename = "ALL")]
    All,
}

impl TermSource {
    /// Every concrete source, in the order the service documents them.
    pub const SOURCES: [TermSource; 11] = [
        TermSource::GoMolecularFunction,
        TermSource::GoCellularComponent,
        TermSource::GoBiologicalProcess,
        TermSource::Kegg,
        TermSource::Reactome,
        TermSource::WikiPathways,
        TermSource::Transfac,
        TermSource::MirTarBase,
        TermSource::HumanProteinAtlas,
        TermSource::Corum,
        TermSource::HumanPhenotype,
    ];

    /// Source code as the service spells it.
    pub fn code(self) -> &'static str {
        match self {
            TermSource::GoMolecularFunction => "GO:MF",
            TermSource::GoCellularComponent => "GO:CC",
            TermSource::GoBiologicalProcess => "GO:BP",
            TermSource::Kegg => "KEGG",
            TermSource::Reactome => "REAC",
            TermSource::WikiPathways => "WP",
            TermSource::Transfac => "TF",
            TermSource::MirTarBase => "MIRNA",
            TermSource::HumanProteinAtlas => "HPA",
            TermSource::Corum => "CORUM",
            TermSource::HumanPhenotype => "HP",
            TermSource::All => "ALL",
        }
    }

    /// Name of the term-result table holding this source's rows.
    pub fn table(self) -> String {
        match self {
            TermSource::All => "Enrichment: All".to_string(),
            other => format!("Enrichment: {}", other.code()),
        }
    }
}

impl fmt::Display for TermSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TermSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ALL" {
            return Ok(TermSource::All);
        }
        TermSource::SOURCES
            .iter()
            .copied()
            .find(|src| src.code() == s)
            .ok_or_else(|| CoreError::UnknownTermSource {
                name: s.to_string(),
            })
    }
}

/// Statistics the service reports alongside a term. Informational only; the
/// chart pipeline never reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermStats {
    pub description: String,
    pub p_value: f64,
    pub term_size: u32,
    pub query_size: u32,
    pub intersection_size: u32,
    pub effective_domain_size: u32,
    /// Query genes that hit this term.
    pub intersections: Vec<String>,
}

/// A single enrichment result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentTerm {
    id: TermId,
    name: String,
    source: TermSource,
    member_node_ids: BTreeSet<NodeId>,
    #[serde(default)]
    stats: TermStats,
}

impl EnrichmentTerm {
    pub fn new(
        id: impl Into<TermId>,
        name: impl Into<String>,
        source: TermSource,
        members: impl IntoIterator<Item = NodeId>,
    ) -> Self {
        EnrichmentTerm {
            id: id.into(),
            name: name.into(),
            source,
            member_node_ids: members.into_iter().collect(),
            stats: TermStats::default(),
        }
    }

    /// Attaches the service statistics. Consumes the term so the stats can
    /// only be set while it is still being built.
    pub fn with_stats(mut self, stats: TermStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn id(&self) -> &TermId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> TermSource {
        self.source
    }

    pub fn stats(&self) -> &TermStats {
        &self.stats
    }

    pub fn member_node_ids(&self) -> &BTreeSet<NodeId> {
        &self.member_node_ids
    }

    pub fn covers(&self, node: NodeId) -> bool {
        self.member_node_ids.contains(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_codes_parse_back() {
        for src in TermSource::SOURCES {
            assert_eq!(src.code().parse::<TermSource>().unwrap(), src);
        }
        assert_eq!("ALL".parse::<TermSource>().unwrap(), TermSource::All);
    }

    #[test]
    fn unknown_source_is_rejected() {
        let err = "GO:XX".parse::<TermSource>().unwrap_err();
        assert_eq!(
            err,
            CoreError::UnknownTermSource {
                name: "GO:XX".into()
            }
        );
    }

    #[test]
    fn source_serde_uses_service_codes() {
        let json = serde_json::to_string(&TermSource::GoBiologicalProcess).unwrap();
        assert_eq!(json, "\"GO:BP\"");
        let back: TermSource = serde_json::from_str("\"REAC\"").unwrap();
        assert_eq!(back, TermSource::Reactome);
    }

    #[test]
    fn table_names() {
        assert_eq!(TermSource::All.table(), "Enrichment: All");
        assert_eq!(TermSource::Kegg.table(), "Enrichment: KEGG");
    }

    #[test]
    fn membership_is_deduplicated_and_queryable() {
        let term = EnrichmentTerm::new(
            "GO:0005737",
            "cytoplasm",
            TermSource::GoCellularComponent,
            [NodeId(3), NodeId(1), NodeId(3)],
        );
        assert_eq!(term.member_node_ids().len(), 2);
        assert!(term.covers(NodeId(1)));
        assert!(!term.covers(NodeId(2)));
        assert_eq!(term.id().as_str(), "GO:0005737");
    }

    #[test]
    fn term_serde_roundtrip_keeps_stats() {
        let term = EnrichmentTerm::new("KEGG:04110", "Cell cycle", TermSource::Kegg, [NodeId(0)])
            .with_stats(TermStats {
                description: "Cell cycle".into(),
                p_value: 1.5e-8,
                term_size: 124,
                query_size: 10,
                intersection_size: 4,
                effective_domain_size: 8000,
                intersections: vec!["CDK1".into()],
            });
        let json = serde_json::to_string(&term).unwrap();
        let back: EnrichmentTerm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, term);
    }
}
