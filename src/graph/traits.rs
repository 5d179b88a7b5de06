//! Core traits for graph store abstraction.
//!
//! - [`CypherExecutor`] - Runs read queries, implemented by every session
//! - [`GraphClient`] - Hands out request-scoped sessions

use async_trait::async_trait;

use crate::error::AppError;
use crate::graph::row::{Params, RowStream};

/// Executes Cypher queries against a graph store.
#[async_trait]
pub trait CypherExecutor: Send + Sync {
    /// Executes a Cypher query and returns a stream of result rows.
    ///
    /// # Arguments
    ///
    /// * `cypher` - The Cypher query string
    /// * `params` - Parameters to bind to the query
    async fn execute_cypher(&self, cypher: &str, params: Params)
        -> Result<RowStream<'_>, AppError>;
}

#[async_trait]
impl<E: CypherExecutor + ?Sized> CypherExecutor for Box<E> {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        (**self).execute_cypher(cypher, params).await
    }
}

/// An open store session.
///
/// Sessions are released when dropped, which covers early returns and
/// errors without any explicit close call.
pub type Session = Box<dyn CypherExecutor>;

/// A graph store client that can open sessions.
///
/// Implementations typically wrap a connection pool. The trait is object
/// safe so the application context can hold any backend behind one handle.
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Opens a new session.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let session = client.open_session().await?;
    /// let rows = session.query("MATCH (d:Disease) RETURN d.title AS title")
    ///     .fetch_all()
    ///     .await?;
    /// // session released here
    /// ```
    async fn open_session(&self) -> Result<Session, AppError>;
}
