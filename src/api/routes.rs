//! Route handlers for the read-only JSON API.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::context::Context;
use crate::error::AppError;
use crate::models::{EntityDetail, EntitySummary, ViewGraph};
use crate::services::{GraphService, LookupService};
use crate::FromRef;

/// Query string of `GET /graph`.
#[derive(Debug, Deserialize)]
pub struct GraphParams {
    /// Kept as text so that malformed values surface as `BAD_INPUT`.
    pub limit: Option<String>,
}

/// Query string of `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /graph?limit=N
pub async fn get_graph(
    State(ctx): State<Context>,
    Query(params): Query<GraphParams>,
) -> Result<Json<ViewGraph>, AppError> {
    let service = GraphService::from_ref(&ctx);
    let graph = service.assemble(params.limit.as_deref()).await?;
    Ok(Json(graph))
}

/// GET /search?q=text
pub async fn get_search(
    State(ctx): State<Context>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<EntitySummary>>, AppError> {
    let service = LookupService::from_ref(&ctx);
    let results = service.search(params.q.as_deref()).await?;
    Ok(Json(results))
}

/// GET /parent/{title}
pub async fn get_parent(
    State(ctx): State<Context>,
    Path(title): Path<String>,
) -> Result<Json<EntityDetail>, AppError> {
    let service = LookupService::from_ref(&ctx);
    let detail = service.detail(&title).await?;
    Ok(Json(detail))
}
