//! Entity model representing disease nodes in the classification graph.

use serde::{Deserialize, Serialize};

/// Summary of a `Disease` entity as returned by search.
///
/// Entities are owned by the graph store; this is a read-only projection of
/// their properties. Missing properties come back as `null` (or `[]` for
/// synonyms) rather than failing the whole request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySummary {
    /// Stable classification code (e.g. "A00").
    pub code: Option<String>,
    /// Display name, also the natural key used by lookups.
    pub title: String,
    /// Synonyms in store order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub syns: Vec<String>,
    /// Free-text definition.
    pub defn: Option<String>,
}

/// Treats an explicit `null` list the same as a missing one.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
