//! Domain models for the classification graph.

mod detail;
mod entity;
mod view;

pub use detail::{relation_family, DetailRecord, EntityDetail, Neighbor, NeighborRecord};
pub use entity::EntitySummary;
pub use view::{GraphBuilder, NodeLabel, ParentGroup, ViewGraph, ViewLink, ViewNode};
