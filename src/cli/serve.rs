//! HTTP server command handler.

use std::net::SocketAddr;

use color_eyre::Result;

use crate::api;
use crate::config::Config;
use crate::context::Context;

use super::App;

impl App {
    /// Run the HTTP server, with CLI flags taking precedence over config.
    pub async fn run_serve(&self, host: Option<&str>, port: Option<u16>) -> Result<()> {
        tracing::info!("Starting nosograph HTTP server");

        let config = Config::load()?;
        let host = host.unwrap_or(&config.server.host).to_string();
        let port = port.unwrap_or(config.server.port);

        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid address {}:{}: {}", host, port, e))?;

        if !config.server.static_dir.join("index.html").exists() {
            tracing::warn!(
                "No index.html in {}; `/` will return 404",
                config.server.static_dir.display()
            );
        }

        let ctx = Context::connect(config).await?;

        api::serve(ctx, addr).await.map_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
            color_eyre::eyre::eyre!("HTTP server error on {}: {}", addr, e)
        })?;

        tracing::info!("HTTP server shutting down");
        Ok(())
    }
}
