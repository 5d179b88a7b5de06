//! Lookup service: title search and single-entity detail.

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{EntityDetail, EntitySummary};
use crate::repositories::ClassificationRepository;

/// Characters with special meaning in the store's regular expressions.
const REGEX_META: &[char] = &[
    '\\', '.', '^', '$', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}',
];

/// Service for search and detail lookups by title.
#[derive(FromContext, Clone)]
pub struct LookupService {
    repo: ClassificationRepository,
}

impl LookupService {
    /// Case-insensitive substring search over entity titles.
    ///
    /// A missing query yields an empty list without touching the store.
    pub async fn search(&self, q: Option<&str>) -> Result<Vec<EntitySummary>, AppError> {
        let Some(q) = q else {
            return Ok(Vec::new());
        };

        let results = self.repo.search_by_pattern(&contains_pattern(q)).await?;
        tracing::debug!(query = q, results = results.len(), "search complete");
        Ok(results)
    }

    /// Entity titled exactly `title`, with its classified neighbors.
    pub async fn detail(&self, title: &str) -> Result<EntityDetail, AppError> {
        let mut records = self.repo.find_with_neighbors(title).await?;

        match records.len() {
            0 => Err(AppError::EntityNotFound(title.to_string())),
            1 => Ok(records.remove(0).into()),
            count => Err(AppError::AmbiguousTitle {
                title: title.to_string(),
                count,
            }),
        }
    }
}

/// Escape regular-expression metacharacters so `text` matches literally.
pub fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if REGEX_META.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive "contains" pattern for `text`.
pub fn contains_pattern(text: &str) -> String {
    format!("(?i).*{}.*", escape_regex(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::graph::backends::stub::StubClient;
    use crate::graph::{Graph, Row};
    use crate::FromRef;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        value.as_object().unwrap().clone().into_iter().collect()
    }

    fn service(client: &StubClient) -> LookupService {
        let ctx = Context::new(Graph::new(client.clone()), Config::default());
        LookupService::from_ref(&ctx)
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_regex("Cholera due to"), "Cholera due to");
    }

    #[test]
    fn test_escape_metacharacters() {
        assert_eq!(escape_regex("a.b"), r"a\.b");
        assert_eq!(escape_regex("(A00-A09)"), r"\(A00-A09\)");
        assert_eq!(escape_regex(r"x\y*"), r"x\\y\*");
        assert_eq!(escape_regex("[a]{2}|^$?+"), r"\[a\]\{2\}\|\^\$\?\+");
    }

    #[test]
    fn test_contains_pattern() {
        assert_eq!(contains_pattern("fever"), "(?i).*fever.*");
        assert_eq!(contains_pattern(""), "(?i).*.*");
    }

    #[tokio::test]
    async fn test_search_without_query_is_empty() {
        let client = StubClient::new();

        let results = service(&client).search(None).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(client.sessions_opened(), 0);
    }

    #[tokio::test]
    async fn test_search_escapes_input() {
        let client = StubClient::new().respond(
            "=~ $title",
            vec![row(json!({
                "code": "A01.0",
                "title": "Typhoid fever",
                "syns": [],
                "defn": null
            }))],
        );

        let results = service(&client).search(Some("A01.0")).await.unwrap();

        assert_eq!(results[0].code.as_deref(), Some("A01.0"));
        assert_eq!(
            client.executed()[0].params["title"],
            json!(r"(?i).*A01\.0.*")
        );
    }

    #[tokio::test]
    async fn test_detail_single_match() {
        let client = StubClient::new().respond(
            "OPTIONAL MATCH",
            vec![row(json!({
                "id": "4:db:7",
                "title": "Cholera",
                "child": [{
                    "code": "A00-A09",
                    "title": "Intestinal infectious diseases",
                    "syns": [],
                    "defn": null,
                    "rel_type": "Parent",
                    "qualifier": null
                }]
            }))],
        );

        let detail = service(&client).detail("Cholera").await.unwrap();

        assert_eq!(detail.title, "Cholera");
        assert_eq!(detail.child.len(), 1);
        assert_eq!(detail.child[0].relation, "parent");
        assert_eq!(client.executed()[0].params["title"], json!("Cholera"));
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let client = StubClient::new();

        let result = service(&client).detail("Nothing").await;

        assert!(matches!(result, Err(AppError::EntityNotFound(t)) if t == "Nothing"));
        assert_eq!(client.open_sessions(), 0);
    }

    #[tokio::test]
    async fn test_detail_rejects_duplicate_titles() {
        let client = StubClient::new().respond(
            "OPTIONAL MATCH",
            vec![
                row(json!({"id": "4:db:1", "title": "Fever", "child": []})),
                row(json!({"id": "4:db:2", "title": "Fever", "child": []})),
            ],
        );

        let result = service(&client).detail("Fever").await;

        assert!(matches!(result, Err(AppError::AmbiguousTitle { count: 2, .. })));
    }
}
