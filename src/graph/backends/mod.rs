//! Backend implementations of [`GraphClient`](crate::graph::GraphClient).
//!
//! | Backend | Module | Use |
//! |---------|--------|-----|
//! | Neo4j over Bolt | [`neo4j`] | Production |
//! | Scripted rows | `stub` | Tests (`test-util` feature) |
//!
//! A backend provides a client that opens sessions, and a session type that
//! implements [`CypherExecutor`](crate::graph::CypherExecutor) and releases
//! its resources in `Drop`.

pub mod neo4j;
#[cfg(any(test, feature = "test-util"))]
pub mod stub;
