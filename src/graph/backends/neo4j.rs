//! Neo4j backend over the `neo4rs` Bolt driver.
//!
//! # Example
//!
//! ```ignore
//! use nosograph::graph::backends::neo4j::Neo4jClient;
//! use nosograph::graph::{Graph, QueryExt};
//!
//! let client = Neo4jClient::connect(&config.neo4j).await?;
//! let graph = Graph::new(client);
//!
//! let session = graph.session().await?;
//! let rows = session.query("MATCH (d:Disease) RETURN d.title AS title")
//!     .fetch_all()
//!     .await?;
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use neo4rs::{BoltList, BoltMap, BoltNull, BoltString, BoltType, ConfigBuilder};
use serde_json::Value as JsonValue;

use crate::config::Neo4jConfig;
use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::{CypherExecutor, GraphClient, Session};

/// Neo4j graph client.
///
/// Cheap to clone: `neo4rs::Graph` is a handle to a shared connection pool.
#[derive(Clone)]
pub struct Neo4jClient {
    graph: neo4rs::Graph,
    sessions: Arc<AtomicU64>,
}

impl Neo4jClient {
    /// Creates the driver and its connection pool.
    ///
    /// The pool is lazy; use [`ping`](Self::ping) to check that the server
    /// is actually reachable.
    pub async fn connect(config: &Neo4jConfig) -> Result<Self, AppError> {
        let mut builder = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_deref().unwrap_or(""))
            .max_connections(config.max_connections);
        if let Some(database) = &config.database {
            builder = builder.db(database.as_str());
        }

        let graph = neo4rs::Graph::connect(builder.build()?).await?;

        Ok(Self {
            graph,
            sessions: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Runs a trivial query to force a Bolt handshake.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.graph.run(neo4rs::query("RETURN 1")).await?;
        Ok(())
    }
}

#[async_trait]
impl GraphClient for Neo4jClient {
    async fn open_session(&self) -> Result<Session, AppError> {
        let id = self.sessions.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(session = id, "session opened");

        Ok(Box::new(Neo4jSession {
            graph: self.graph.clone(),
            id,
            opened_at: Instant::now(),
        }))
    }
}

/// A request-scoped Neo4j session.
///
/// Each query leases a pooled connection for as long as its result is being
/// read; rows are drained before returning, so no lease outlives the call.
pub struct Neo4jSession {
    graph: neo4rs::Graph,
    id: u64,
    opened_at: Instant,
}

#[async_trait]
impl CypherExecutor for Neo4jSession {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        let query = params
            .into_iter()
            .fold(neo4rs::query(cypher), |query, (name, value)| {
                query.param(&name, json_to_bolt(value))
            });

        let mut result = self
            .graph
            .execute(query)
            .await
            .map_err(|e| classify_error(e, cypher))?;

        let mut rows = Vec::new();
        while let Some(row) = result.next().await.map_err(|e| classify_error(e, cypher))? {
            rows.push(convert_row(&row)?);
        }

        Ok(Box::pin(futures::stream::iter(rows.into_iter().map(Ok))))
    }
}

impl Drop for Neo4jSession {
    fn drop(&mut self) {
        tracing::debug!(
            session = self.id,
            elapsed_ms = self.opened_at.elapsed().as_millis() as u64,
            "session released"
        );
    }
}

/// Splits driver errors into an unreachable store and a failing query.
fn classify_error(error: neo4rs::Error, cypher: &str) -> AppError {
    match error {
        neo4rs::Error::IOError { .. }
        | neo4rs::Error::ConnectionError
        | neo4rs::Error::AuthenticationError(_)
        | neo4rs::Error::UnsupportedScheme(_)
        | neo4rs::Error::InvalidDnsName(_)
        | neo4rs::Error::UrlParseError(_) => AppError::Connection(error),
        other => AppError::Query {
            message: other.to_string(),
            query: cypher.to_string(),
        },
    }
}

/// Converts a driver row into a column map of JSON values.
fn convert_row(row: &neo4rs::Row) -> Result<Row, AppError> {
    row.to::<HashMap<String, JsonValue>>()
        .map(Row::new)
        .map_err(|e| AppError::Internal(format!("failed to decode Neo4j row: {}", e)))
}

/// Converts a JSON parameter into its Bolt representation.
fn json_to_bolt(value: JsonValue) -> BoltType {
    match value {
        JsonValue::Null => BoltType::Null(BoltNull),
        JsonValue::Bool(b) => BoltType::from(b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => BoltType::from(i),
            None => BoltType::from(n.as_f64().unwrap_or_default()),
        },
        JsonValue::String(s) => BoltType::from(s),
        JsonValue::Array(items) => BoltType::List(BoltList::from(
            items.into_iter().map(json_to_bolt).collect::<Vec<_>>(),
        )),
        JsonValue::Object(map) => {
            let mut bolt = BoltMap::new();
            for (key, value) in map {
                bolt.put(BoltString::from(key.as_str()), json_to_bolt(value));
            }
            BoltType::Map(bolt)
        }
    }
}
