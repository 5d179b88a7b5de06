//! Graph store abstraction layer.
//!
//! The rest of the crate talks to the store through these types only, so the
//! Neo4j driver stays behind one backend module and tests can swap in a
//! scripted store.
//!
//! - [`CypherExecutor`] - Execute Cypher queries
//! - [`GraphClient`] - Open request-scoped sessions
//! - [`Graph`] - Cloneable handle held by the application context
//!
//! # Usage
//!
//! ```ignore
//! use nosograph::graph::{Graph, QueryExt};
//!
//! let graph = Graph::new(client);
//!
//! let session = graph.session().await?;
//! let rows = session
//!     .query("MATCH (d:Disease) WHERE d.title =~ $title RETURN d.title AS title")
//!     .param("title", "(?i).*fever.*")
//!     .fetch_all()
//!     .await?;
//! // dropping `session` releases it
//! ```

mod query;
mod row;
mod traits;

pub mod backends;

// Re-export core types
pub use query::{Query, QueryExt};
pub use row::{Params, Row, RowStream};
pub use traits::{CypherExecutor, GraphClient, Session};

use std::sync::Arc;

use crate::error::AppError;

/// Cloneable handle over any [`GraphClient`].
#[derive(Clone)]
pub struct Graph {
    client: Arc<dyn GraphClient>,
}

impl Graph {
    /// Creates a new graph handle around the given client.
    pub fn new(client: impl GraphClient + 'static) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Opens a session for one unit of work.
    ///
    /// Callers keep the session for the duration of a single request and let
    /// it drop afterwards.
    pub async fn session(&self) -> Result<Session, AppError> {
        self.client.open_session().await
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph").finish_non_exhaustive()
    }
}
