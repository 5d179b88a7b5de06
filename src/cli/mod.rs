//! CLI module for nosograph.
//!
//! Subcommands:
//! - `serve`: Run the HTTP API and visualization client
//! - `export`: Assemble the graph once and write it as JSON

mod export;
mod serve;

use clap::{Parser, Subcommand};

pub use export::ExportCommand;

/// nosograph - Disease classification graph
#[derive(Parser)]
#[command(name = "nosograph")]
#[command(about = "Disease classification graph - HTTP API for force-directed visualization")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Host address to bind to (defaults to `server.host`)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to `server.port`)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write the assembled graph as JSON
    Export(ExportCommand),
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Serve { ref host, port } => self.run_serve(host.as_deref(), port).await,
            Command::Export(cmd) => cmd.run().await,
        }
    }
}
