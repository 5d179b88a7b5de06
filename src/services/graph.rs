//! Graph service: assembles the force-directed visualization graph.

use std::sync::Arc;

use crate::config::{Config, GraphConfig};
use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::ViewGraph;
use crate::repositories::ClassificationRepository;

/// Service turning parent groups from the store into a `{nodes, links}` graph.
#[derive(FromContext, Clone)]
pub struct GraphService {
    repo: ClassificationRepository,
    config: Arc<Config>,
}

impl GraphService {
    /// Assemble the graph from at most `limit` parent groups.
    ///
    /// `limit` is the raw query-string value; `None` means the configured
    /// default. The limit counts parent groups, not nodes or links.
    pub async fn assemble(&self, limit: Option<&str>) -> Result<ViewGraph, AppError> {
        let limit = parse_limit(limit, &self.config.graph)?;
        let groups = self.repo.parent_groups(limit).await?;

        let group_count = groups.len();
        let graph: ViewGraph = groups.into_iter().collect();
        tracing::debug!(
            limit,
            groups = group_count,
            nodes = graph.nodes.len(),
            links = graph.links.len(),
            "assembled graph"
        );

        Ok(graph)
    }
}

/// Coerce a raw `limit` into a positive integer within the configured bound.
pub fn parse_limit(raw: Option<&str>, config: &GraphConfig) -> Result<u32, AppError> {
    let Some(raw) = raw else {
        return Ok(config.default_limit);
    };

    let value: i64 = raw
        .parse()
        .map_err(|_| AppError::BadInput(format!("limit must be an integer, got '{}'", raw)))?;

    if value < 1 {
        return Err(AppError::BadInput(format!(
            "limit must be positive, got {}",
            value
        )));
    }
    if value > i64::from(config.max_limit) {
        return Err(AppError::BadInput(format!(
            "limit must be at most {}, got {}",
            config.max_limit, value
        )));
    }

    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::backends::stub::StubClient;
    use crate::graph::{Graph, Row};
    use crate::FromRef;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        value.as_object().unwrap().clone().into_iter().collect()
    }

    fn service(client: &StubClient) -> GraphService {
        let ctx = Context::new(Graph::new(client.clone()), Config::default());
        GraphService::from_ref(&ctx)
    }

    #[test]
    fn test_parse_limit_default() {
        assert_eq!(parse_limit(None, &GraphConfig::default()).unwrap(), 100);
    }

    #[test]
    fn test_parse_limit_valid() {
        let config = GraphConfig::default();
        assert_eq!(parse_limit(Some("1"), &config).unwrap(), 1);
        assert_eq!(parse_limit(Some("250"), &config).unwrap(), 250);
        assert_eq!(parse_limit(Some("10000"), &config).unwrap(), 10_000);
    }

    #[test]
    fn test_parse_limit_rejects_bad_values() {
        let config = GraphConfig::default();
        for raw in ["", "abc", "2.5", "0", "-3", "10001", " 5", "99999999999999999999"] {
            assert!(
                matches!(parse_limit(Some(raw), &config), Err(AppError::BadInput(_))),
                "accepted {:?}",
                raw
            );
        }
    }

    #[tokio::test]
    async fn test_assemble_flattens_groups() {
        let client = StubClient::new().respond(
            "AS parent",
            vec![
                row(json!({"parent": "A", "child": ["X", "Y"]})),
                row(json!({"parent": "B", "child": ["Y"]})),
            ],
        );

        let graph = service(&client).assemble(Some("2")).await.unwrap();

        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.links.len(), 3);
        assert_eq!(graph.links[2].source, 2);
        assert_eq!(graph.links[2].target, 3);
        assert_eq!(client.executed()[0].params["limit"], json!(2));
    }

    #[tokio::test]
    async fn test_assemble_uses_configured_default() {
        let client = StubClient::new();

        let graph = service(&client).assemble(None).await.unwrap();

        assert_eq!(graph, ViewGraph::default());
        assert_eq!(client.executed()[0].params["limit"], json!(100));
    }

    #[tokio::test]
    async fn test_bad_limit_never_reaches_store() {
        let client = StubClient::new();

        let result = service(&client).assemble(Some("lots")).await;

        assert!(matches!(result, Err(AppError::BadInput(_))));
        assert_eq!(client.sessions_opened(), 0);
        assert!(client.executed().is_empty());
    }
}
