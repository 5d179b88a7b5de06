//! Scripted in-process backend for tests.
//!
//! `StubClient` answers each query with the canned rows registered for the
//! first Cypher fragment it contains, records every executed query, and keeps
//! count of opened and released sessions.
//!
//! ```ignore
//! let client = StubClient::new().respond("RETURN d.title AS parent", rows);
//! let graph = Graph::new(client.clone());
//! // ... run code under test ...
//! assert_eq!(client.executed()[0].params["limit"], json!(2));
//! assert_eq!(client.open_sessions(), 0);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::{CypherExecutor, GraphClient, Session};

/// A query seen by the stub.
#[derive(Debug, Clone)]
pub struct ExecutedQuery {
    pub cypher: String,
    pub params: Params,
}

#[derive(Debug, Clone)]
enum Reply {
    Rows(Vec<Row>),
    Fail(String),
    Disconnect,
}

#[derive(Default)]
struct StubState {
    replies: Mutex<Vec<(String, Reply)>>,
    executed: Mutex<Vec<ExecutedQuery>>,
    opened: AtomicUsize,
    released: AtomicUsize,
}

/// Scripted graph client. Clones share state.
#[derive(Clone, Default)]
pub struct StubClient {
    state: Arc<StubState>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers queries containing `fragment` with `rows`.
    pub fn respond(self, fragment: &str, rows: Vec<Row>) -> Self {
        lock(&self.state.replies).push((fragment.to_string(), Reply::Rows(rows)));
        self
    }

    /// Fails queries containing `fragment` with a query error.
    pub fn fail(self, fragment: &str, message: &str) -> Self {
        lock(&self.state.replies).push((fragment.to_string(), Reply::Fail(message.to_string())));
        self
    }

    /// Fails queries containing `fragment` as if the store were unreachable.
    pub fn disconnect(self, fragment: &str) -> Self {
        lock(&self.state.replies).push((fragment.to_string(), Reply::Disconnect));
        self
    }

    /// Queries executed so far, in order.
    pub fn executed(&self) -> Vec<ExecutedQuery> {
        lock(&self.state.executed).clone()
    }

    /// Sessions opened so far.
    pub fn sessions_opened(&self) -> usize {
        self.state.opened.load(Ordering::SeqCst)
    }

    /// Sessions opened and not yet released.
    pub fn open_sessions(&self) -> usize {
        self.sessions_opened() - self.state.released.load(Ordering::SeqCst)
    }

    fn reply_for(&self, cypher: &str) -> Reply {
        lock(&self.state.replies)
            .iter()
            .find(|(fragment, _)| cypher.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or(Reply::Rows(Vec::new()))
    }
}

#[async_trait]
impl GraphClient for StubClient {
    async fn open_session(&self) -> Result<Session, AppError> {
        self.state.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StubSession {
            client: self.clone(),
        }))
    }
}

struct StubSession {
    client: StubClient,
}

#[async_trait]
impl CypherExecutor for StubSession {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        lock(&self.client.state.executed).push(ExecutedQuery {
            cypher: cypher.to_string(),
            params,
        });

        match self.client.reply_for(cypher) {
            Reply::Rows(rows) => Ok(Box::pin(futures::stream::iter(rows.into_iter().map(Ok)))),
            Reply::Fail(message) => Err(AppError::Query {
                message,
                query: cypher.to_string(),
            }),
            Reply::Disconnect => Err(AppError::Connection(neo4rs::Error::ConnectionError)),
        }
    }
}

impl Drop for StubSession {
    fn drop(&mut self) {
        self.client.state.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, QueryExt};
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        value.as_object().unwrap().clone().into_iter().collect()
    }

    #[tokio::test]
    async fn test_replies_by_fragment_and_records_params() {
        let client = StubClient::new().respond("AS parent", vec![row(json!({"parent": "A"}))]);
        let graph = Graph::new(client.clone());

        let session = graph.session().await.unwrap();
        let rows = session
            .query("RETURN 'A' AS parent LIMIT $limit")
            .param("limit", 5)
            .fetch_all()
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(client.executed()[0].params["limit"], json!(5));
    }

    #[tokio::test]
    async fn test_unmatched_query_returns_no_rows() {
        let client = StubClient::new();
        let session = client.open_session().await.unwrap();
        let rows = session.query("RETURN 1").fetch_all().await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_counts_released_sessions() {
        let client = StubClient::new().fail("boom", "store down");
        {
            let session = client.open_session().await.unwrap();
            assert_eq!(client.open_sessions(), 1);
            let result = session.query("RETURN boom").fetch_all().await;
            assert!(matches!(result, Err(AppError::Query { .. })));
        }
        assert_eq!(client.sessions_opened(), 1);
        assert_eq!(client.open_sessions(), 0);
    }
}
