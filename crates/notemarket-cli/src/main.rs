//! Notemarket CLI - Command-line interface for the Notemarket seller client
//!
//! Provides commands for:
//! - Publishing a note through the guided three-step flow
//! - Listing the seller's published notes
//! - Diagnosing backend-to-storage connectivity
//! - Managing the persisted login session

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod session;

use commands::{
    auth::AuthCommand, connectivity::ConnectivityCommand, notes::NotesCommand,
    publish::PublishCommand,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "notemarket", version, about = "Seller client for the Notemarket marketplace")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Publish a note through the guided upload flow
    Publish(PublishCommand),
    /// List your published notes
    Notes(NotesCommand),
    /// Check backend-to-storage connectivity
    Connectivity(ConnectivityCommand),
    /// Manage the login session
    #[command(subcommand)]
    Auth(AuthCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Publish(cmd) => cmd.execute(format).await,
        Commands::Notes(cmd) => cmd.execute(format).await,
        Commands::Connectivity(cmd) => cmd.execute(format).await,
        Commands::Auth(cmd) => cmd.execute(format).await,
    }
}
