//! Data access layer for graph operations.
//!
//! Repositories own the Cypher templates and map result rows into models,
//! using the `FromContext` derive macro for dependency injection.

mod classification;

pub use classification::ClassificationRepository;
