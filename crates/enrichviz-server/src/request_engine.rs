//! HTTP client for the g:Profiler enrichment service.
//!
//! [`HttpRequestEngine`] builds the profile request from a graph and its
//! [`QuerySettings`], posts it, and hands back the decoded
//! [`ProfileResponse`]. Failures surface as [`TransportError`], each carrying
//! the status line shown to users.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Deserialize;
use serde_json::{json, Value};

use enrichviz_core::{EnrichmentTerm, NetworkGraph, NodeId, QuerySettings, TermSource, TermStats};

/// Public g:Profiler API root.
pub const DEFAULT_SERVICE_URL: &str = "https://biit.cs.ut.ee/gprofiler/api/";

/// Endpoint of the functional profiling (g:GOSt) query.
pub const PROFILE_ENDPOINT: &str = "gost/profile/";

const CONNECTION_MESSAGE: &str = "Could not fetch data. Check your internet connection";
const INVALID_QUERY_MESSAGE: &str = "Invalid Query Parameters";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("got {status} code from server")]
    Status { status: u16, body: String },

    #[error("could not decode service response: {0}")]
    Decode(String),
}

impl TransportError {
    /// Short status line for the user.
    pub fn status_message(&self) -> &'static str {
        match self {
            TransportError::Status { .. } => INVALID_QUERY_MESSAGE,
            TransportError::Network { .. } | TransportError::Decode(_) => CONNECTION_MESSAGE,
        }
    }
}

/// Stateless client for the enrichment service. No retries.
#[derive(Debug, Clone)]
pub struct HttpRequestEngine {
    base_url: String,
    client: reqwest::Client,
}

impl Default for HttpRequestEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_URL)
    }
}

impl HttpRequestEngine {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        HttpRequestEngine {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues a GET against `endpoint` and returns the JSON body.
    pub async fn get(&self, endpoint: &str) -> Result<Value, TransportError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let request = self.client.get(&url).header("Accept", "application/json");
        let body = self.send(&url, request).await?;
        serde_json::from_str(&body).map_err(|err| TransportError::Decode(err.to_string()))
    }

    /// Runs a profile query for `query_genes` against `graph`.
    ///
    /// With `background_needed`, every usable node name of the graph is sent
    /// as a custom statistical background.
    pub async fn profile(
        &self,
        graph: &NetworkGraph,
        settings: &QuerySettings,
        query_genes: &[String],
        background_needed: bool,
    ) -> Result<ProfileResponse, TransportError> {
        let background = if background_needed {
            graph.background_genes(settings.gene_id_column.as_deref())
        } else {
            Vec::new()
        };
        let body = profile_body(settings, query_genes, &background);

        let url = format!("{}{}", self.base_url, PROFILE_ENDPOINT);
        tracing::info!(
            url = %url,
            organism = %settings.organism,
            genes = query_genes.len(),
            background = background.len(),
            "sending profile request"
        );
        let request = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(&body);
        let text = self.send(&url, request).await?;
        serde_json::from_str(&text).map_err(|err| TransportError::Decode(err.to_string()))
    }

    async fn send(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<String, TransportError> {
        let response = request.send().await.map_err(|source| TransportError::Network {
            url: url.to_string(),
            source,
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|source| TransportError::Network {
            url: url.to_string(),
            source,
        })?;

        if status != 200 && status != 202 {
            tracing::warn!(url, status, "enrichment service rejected request");
            return Err(TransportError::Status { status, body: text });
        }
        Ok(text)
    }
}

/// Builds the JSON body of a profile query.
pub fn profile_body(
    settings: &QuerySettings,
    query_genes: &[String],
    background: &[String],
) -> Value {
    let mut body = json!({
        "organism": settings.organism,
        "query": query_genes,
        "no_iea": settings.effective_no_iea(),
        "significance_threshold_method": settings.effective_threshold_method(),
    });

    if let Some(threshold) = settings.user_threshold {
        body["user_threshold"] = json!(threshold);
    }
    if let Some(all_results) = settings.all_results {
        body["all_results"] = json!(all_results);
    }
    if background.is_empty() {
        body["domain_scope"] = json!("annotated");
    } else {
        body["background"] = json!(background.join(" "));
        body["domain_scope"] = json!("custom_annotated");
    }
    body
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

/// Decoded body of a profile query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub result: Vec<ProfileResult>,
    #[serde(default)]
    pub meta: ProfileMeta,
}

/// One enriched term as reported by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResult {
    pub native: String,
    pub name: String,
    pub source: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub p_value: f64,
    #[serde(default)]
    pub term_size: u32,
    #[serde(default)]
    pub query_size: u32,
    #[serde(default)]
    pub intersection_size: u32,
    #[serde(default)]
    pub effective_domain_size: u32,
    /// Evidence codes per query gene, parallel to the query's `ensgs`.
    /// An empty entry means the gene is not annotated to the term.
    #[serde(default)]
    pub intersections: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileMeta {
    #[serde(default)]
    pub genes_metadata: GenesMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenesMetadata {
    #[serde(default)]
    pub query: BTreeMap<String, QueryMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryMetadata {
    /// Resolved gene ids in intersection order.
    #[serde(default)]
    pub ensgs: Vec<String>,
    /// Query gene name to the resolved ids it mapped to.
    #[serde(default)]
    pub mapping: HashMap<String, Vec<String>>,
}

impl ProfileResponse {
    /// Converts the service results into terms whose members are nodes of
    /// `graph`.
    ///
    /// Results from sources the client does not know are skipped.
    pub fn into_terms(
        self,
        graph: &NetworkGraph,
        gene_id_column: Option<&str>,
    ) -> Vec<EnrichmentTerm> {
        let by_name = graph.nodes_by_canonical_name(gene_id_column);

        // Resolved id -> query gene names, in the order the service listed them.
        let query = self.meta.genes_metadata.query.into_values().next().unwrap_or_default();
        let mut names_by_ensg: HashMap<&str, BTreeSet<&str>> = HashMap::new();
        for (gene, ensgs) in &query.mapping {
            for ensg in ensgs {
                names_by_ensg.entry(ensg.as_str()).or_default().insert(gene.as_str());
            }
        }

        let mut terms = Vec::with_capacity(self.result.len());
        for result in self.result {
            let source: TermSource = match result.source.parse() {
                Ok(source) => source,
                Err(_) => {
                    tracing::warn!(
                        source = %result.source,
                        term = %result.native,
                        "skipping term from unknown source"
                    );
                    continue;
                }
            };

            let mut genes: BTreeSet<&str> = BTreeSet::new();
            for (position, evidence) in result.intersections.iter().enumerate() {
                if evidence.is_empty() {
                    continue;
                }
                let Some(ensg) = query.ensgs.get(position) else {
                    continue;
                };
                match names_by_ensg.get(ensg.as_str()) {
                    Some(names) => genes.extend(names.iter().copied()),
                    None => {
                        genes.insert(ensg.as_str());
                    }
                }
            }

            let members: Vec<NodeId> = genes
                .iter()
                .filter_map(|gene| by_name.get(*gene))
                .flatten()
                .copied()
                .collect();

            let stats = TermStats {
                description: result.description,
                p_value: result.p_value,
                term_size: result.term_size,
                query_size: result.query_size,
                intersection_size: result.intersection_size,
                effective_domain_size: result.effective_domain_size,
                intersections: genes.iter().map(|gene| gene.to_string()).collect(),
            };
            terms.push(
                EnrichmentTerm::new(result.native, result.name, source, members).with_stats(stats),
            );
        }
        terms
    }
}
