//! HTTP API: JSON routes plus the static visualization client.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /` | `index.html` from the static directory |
//! | `GET /static/*` | static assets |
//! | `GET /graph` | [`routes::get_graph`] |
//! | `GET /search` | [`routes::get_search`] |
//! | `GET /parent/{title}` | [`routes::get_parent`] |

pub mod routes;

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::context::Context;

/// Build the application router.
pub fn router(ctx: Context) -> Router {
    let static_dir = ctx.config.server.static_dir.clone();

    Router::new()
        .route("/graph", get(routes::get_graph))
        .route("/search", get(routes::get_search))
        .route("/parent/{title}", get(routes::get_parent))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Bind `addr` and serve the router until the process is stopped.
pub async fn serve(ctx: Context, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(ctx);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("nosograph listening on http://{}", addr);

    axum::serve(listener, app).await
}
