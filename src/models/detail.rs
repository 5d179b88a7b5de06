//! Detail models: one entity with its classified neighbors.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::entity::null_as_empty;

/// An entity and its one-hop neighbors, as served by `/parent/{title}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDetail {
    pub title: String,
    /// Neighbors in either edge direction, in store order.
    pub child: Vec<Neighbor>,
}

/// A neighboring entity together with the relation that links it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub code: Option<String>,
    pub title: String,
    pub syns: Vec<String>,
    pub defn: Option<String>,
    /// Relation family: the lower-cased first `_` segment of the
    /// relationship type (`PARENT_OF` → `parent`).
    pub relation: String,
    /// The relationship's `Parent` qualifier, `null` when absent.
    pub qualifier: JsonValue,
}

/// A neighbor as projected by the detail query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeighborRecord {
    pub code: Option<String>,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub syns: Vec<String>,
    pub defn: Option<String>,
    pub rel_type: String,
    #[serde(default)]
    pub qualifier: JsonValue,
}

/// One record of the detail query: a matched entity and its neighbors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetailRecord {
    pub title: String,
    #[serde(default)]
    pub child: Vec<NeighborRecord>,
}

/// Lower-cases a relationship type and keeps its first `_` segment.
pub fn relation_family(rel_type: &str) -> String {
    rel_type
        .split('_')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

impl From<NeighborRecord> for Neighbor {
    fn from(record: NeighborRecord) -> Self {
        Self {
            relation: relation_family(&record.rel_type),
            code: record.code,
            title: record.title,
            syns: record.syns,
            defn: record.defn,
            qualifier: record.qualifier,
        }
    }
}

impl From<DetailRecord> for EntityDetail {
    fn from(record: DetailRecord) -> Self {
        Self {
            title: record.title,
            child: record.child.into_iter().map(Neighbor::from).collect(),
        }
    }
}
