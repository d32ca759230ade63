//! HTTP handler modules for the enrichviz API.
//!
//! Each sub-module implements thin handlers that parse requests, acquire the
//! service lock, delegate to [`EnrichmentService`](crate::service::EnrichmentService),
//! and return JSON responses. No business logic lives in handlers.

pub mod charts;
pub mod enrichment;
pub mod graphs;
pub mod views;
