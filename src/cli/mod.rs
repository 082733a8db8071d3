//! CLI interface for Bookshelf

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(version = "0.1.0")]
#[command(about = "Token-authenticated book catalog API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new bookshelf.toml configuration file
    Init,

    /// Run the HTTP API server
    Serve {
        /// Host to bind (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
