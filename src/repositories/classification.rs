//! Classification repository: read queries over `Disease` nodes.
//!
//! Every method opens its own session and drops it before returning, so a
//! session never outlives the request that asked for it.

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::{Graph, QueryExt, Row};
use crate::models::{DetailRecord, EntitySummary, ParentGroup};

/// Parent titles with their collected child titles, one row per parent.
pub(crate) const PARENT_GROUPS_QUERY: &str = "\
MATCH (d:Disease)<-[:Parent]-(c:Disease)
WITH d, c ORDER BY d.title, c.title
RETURN d.title AS parent, collect(c.title) AS child
ORDER BY parent
LIMIT $limit";

/// Entities whose title matches a regular expression.
pub(crate) const SEARCH_QUERY: &str = "\
MATCH (parent:Disease)
WHERE parent.title =~ $title
RETURN parent.code AS code, parent.title AS title,
       parent.syns AS syns, parent.defn AS defn";

/// One row per entity titled `$title`, with its one-hop neighbors.
///
/// Grouping on `elementId(parent)` keeps entities sharing a title apart, and
/// `LIMIT 2` is enough to tell one match from several.
pub(crate) const DETAIL_QUERY: &str = "\
MATCH (parent:Disease {title: $title})
OPTIONAL MATCH (parent)-[r]-(child:Disease)
RETURN elementId(parent) AS id,
       parent.title AS title,
       collect(child {.code, .title, .syns, .defn,
                      rel_type: type(r), qualifier: r.Parent}) AS child
LIMIT 2";

/// Repository for the classification graph's read queries.
#[derive(FromContext, Clone)]
pub struct ClassificationRepository {
    graph: Graph,
}

impl ClassificationRepository {
    /// Fetch at most `limit` parent groups, in store order.
    pub async fn parent_groups(&self, limit: u32) -> Result<Vec<ParentGroup>, AppError> {
        let session = self.graph.session().await?;
        let rows = session
            .query(PARENT_GROUPS_QUERY)
            .param("limit", i64::from(limit))
            .fetch_all()
            .await?;

        rows.iter().map(Row::to).collect()
    }

    /// Fetch every entity whose title matches `pattern`.
    ///
    /// `pattern` is passed to the store as a regular expression verbatim;
    /// escaping user input is the caller's job.
    pub async fn search_by_pattern(&self, pattern: &str) -> Result<Vec<EntitySummary>, AppError> {
        let session = self.graph.session().await?;
        let rows = session
            .query(SEARCH_QUERY)
            .param("title", pattern)
            .fetch_all()
            .await?;

        rows.iter().map(Row::to).collect()
    }

    /// Fetch up to two entities titled exactly `title`, with their neighbors.
    pub async fn find_with_neighbors(&self, title: &str) -> Result<Vec<DetailRecord>, AppError> {
        let session = self.graph.session().await?;
        let rows = session
            .query(DETAIL_QUERY)
            .param("title", title)
            .fetch_all()
            .await?;

        rows.iter().map(Row::to).collect()
    }
}
