//! Export subcommand - write the assembled graph as JSON.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::context::Context;
use crate::services::GraphService;
use crate::FromRef;

/// Assemble the visualization graph once and write it out.
#[derive(Parser)]
pub struct ExportCommand {
    /// Number of parent groups to include (defaults to `graph.default_limit`)
    #[arg(short, long)]
    pub limit: Option<String>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ExportCommand {
    /// Run the export command.
    pub async fn run(self) -> color_eyre::Result<()> {
        let config = Config::load()?;
        let ctx = Context::connect(config).await?;

        let graph = GraphService::from_ref(&ctx)
            .assemble(self.limit.as_deref())
            .await?;
        let json = serde_json::to_string_pretty(&graph)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, json)?;
                tracing::info!(
                    "Wrote {} nodes and {} links to {}",
                    graph.nodes.len(),
                    graph.links.len(),
                    path.display()
                );
            }
            None => println!("{}", json),
        }

        Ok(())
    }
}
