//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::config::Config;
use crate::di::Context as ContextDerive;
use crate::error::AppError;
use crate::graph::backends::neo4j::Neo4jClient;
use crate::graph::Graph;

/// Root application context, shared by every request handler.
///
/// Cloning is cheap: the graph handle wraps the driver's connection pool and
/// the config sits behind an `Arc`.
#[derive(ContextDerive, Clone)]
pub struct Context {
    /// Graph store handle; each repository call opens a session from it.
    pub graph: Graph,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl Context {
    /// Creates a new context with the given dependencies.
    pub fn new(graph: Graph, config: Config) -> Self {
        Self {
            graph,
            config: Arc::new(config),
        }
    }

    /// Connects to Neo4j using `config` and builds the context.
    pub async fn connect(config: Config) -> Result<Self, AppError> {
        tracing::info!("Connecting to Neo4j at {}", config.neo4j.uri);
        let client = Neo4jClient::connect(&config.neo4j).await?;
        client.ping().await?;
        tracing::info!("Connected to Neo4j");

        Ok(Self::new(Graph::new(client), config))
    }
}
