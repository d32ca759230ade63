//! HTTP/JSON API server for enrichment analysis and chart projection.
//!
//! Runs enrichment queries against the g:Profiler service, stores the
//! resulting term tables per graph, and draws per-node charts for selected
//! terms. This crate contains the request engine, the service coordinator,
//! API schema types, error handling, and route definitions.

pub mod error;
pub mod handlers;
pub mod request_engine;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
pub mod views;
