//! API schema types for request/response definitions.
//!
//! Each sub-module defines the request and response types for a specific
//! API domain. Types use serde derives for JSON serialization/deserialization.

pub mod charts;
pub mod enrichment;
pub mod graphs;
pub mod views;
