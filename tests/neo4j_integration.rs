//! Integration tests against a live Neo4j server.
//!
//! Run with: `cargo test --features integration --test neo4j_integration`
//! Connection settings come from the usual config layers, e.g.
//! `NOSOGRAPH_NEO4J__URI=bolt://localhost:7687 NEO4J_PASSWORD=...`.
//! Tests share one fixture, so they run serially.

#![cfg(feature = "integration")]

use nosograph::config::Config;
use nosograph::context::Context;
use nosograph::error::AppError;
use nosograph::graph::QueryExt;
use nosograph::models::{NodeLabel, ViewNode};
use nosograph::services::{GraphService, LookupService};
use nosograph::FromRef;
use serial_test::serial;

/// Titles are prefixed so the fixture never collides with real data.
const PREFIX: &str = "it-nosograph ";

async fn context() -> Context {
    let config = Config::load().expect("Failed to load config");
    Context::connect(config)
        .await
        .expect("Failed to connect to Neo4j")
}

async fn cleanup(ctx: &Context) {
    let session = ctx.graph.session().await.expect("Failed to open session");
    session
        .query("MATCH (d:Disease) WHERE d.title STARTS WITH $prefix DETACH DELETE d")
        .param("prefix", PREFIX)
        .fetch_all()
        .await
        .expect("Cleanup failed");
}

/// Parent "A" with children X, Y; parent "B" with child Y.
async fn seed(ctx: &Context) {
    cleanup(ctx).await;
    let session = ctx.graph.session().await.expect("Failed to open session");
    session
        .query(
            "CREATE (a:Disease {code: 'T1', title: $prefix + 'A', syns: [], defn: 'first'})
             CREATE (b:Disease {code: 'T2', title: $prefix + 'B', syns: ['bee'], defn: 'second'})
             CREATE (x:Disease {code: 'T1.1', title: $prefix + 'X', syns: [], defn: null})
             CREATE (y:Disease {code: 'T1.2', title: $prefix + 'Y', syns: [], defn: null})
             CREATE (x)-[:Parent]->(a)
             CREATE (y)-[:Parent]->(a)
             CREATE (y)-[:Parent {Parent: true}]->(b)",
        )
        .param("prefix", PREFIX)
        .fetch_all()
        .await
        .expect("Seeding failed");
}

fn titled(title: &str) -> String {
    format!("{}{}", PREFIX, title)
}

#[tokio::test]
#[serial]
async fn test_graph_contains_seeded_groups() {
    let ctx = context().await;
    seed(&ctx).await;

    let graph = GraphService::from_ref(&ctx)
        .assemble(Some("10000"))
        .await
        .expect("Assembly failed");

    let index_of = |title: &str, label: NodeLabel| {
        graph
            .nodes
            .iter()
            .position(|n| n == &ViewNode { title: titled(title), label })
            .expect("node missing")
    };
    let y = index_of("Y", NodeLabel::Child);
    let a = index_of("A", NodeLabel::Parent);
    let b = index_of("B", NodeLabel::Parent);

    assert!(graph.links.iter().any(|l| l.source == y && l.target == a));
    assert!(graph.links.iter().any(|l| l.source == y && l.target == b));

    cleanup(&ctx).await;
}

#[tokio::test]
#[serial]
async fn test_search_is_case_insensitive_and_literal() {
    let ctx = context().await;
    seed(&ctx).await;
    let lookup = LookupService::from_ref(&ctx);

    let results = lookup
        .search(Some(&titled("a").to_uppercase()))
        .await
        .expect("Search failed");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].code.as_deref(), Some("T1"));

    // "." must not act as a wildcard
    let results = lookup.search(Some("it-nosograph.")).await.expect("Search failed");
    assert!(results.is_empty());

    cleanup(&ctx).await;
}

#[tokio::test]
#[serial]
async fn test_detail_lists_neighbors_in_both_directions() {
    let ctx = context().await;
    seed(&ctx).await;
    let lookup = LookupService::from_ref(&ctx);

    let detail = lookup.detail(&titled("Y")).await.expect("Detail failed");
    let mut neighbors: Vec<_> = detail.child.iter().map(|n| n.title.clone()).collect();
    neighbors.sort();
    assert_eq!(neighbors, vec![titled("A"), titled("B")]);
    assert!(detail.child.iter().all(|n| n.relation == "parent"));

    let detail = lookup.detail(&titled("A")).await.expect("Detail failed");
    assert_eq!(detail.child.len(), 2);

    let missing = lookup.detail(&titled("missing")).await;
    assert!(matches!(missing, Err(AppError::EntityNotFound(_))));

    cleanup(&ctx).await;
}
