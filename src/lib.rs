//! nosograph - Disease classification graph over HTTP
//!
//! Serves a hierarchical classification stored in Neo4j to a browser-based
//! force-directed visualization: a flattened, deduplicated `{nodes, links}`
//! graph, title search, and single-entity detail lookups.

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod di;
pub mod error;
pub mod graph;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
