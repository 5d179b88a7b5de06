//! Business logic services for the classification graph.
//!
//! Services validate request input and orchestrate repositories,
//! using the `FromContext` derive macro for dependency injection.

mod graph;
mod lookup;

pub use graph::{parse_limit, GraphService};
pub use lookup::{contains_pattern, escape_regex, LookupService};
