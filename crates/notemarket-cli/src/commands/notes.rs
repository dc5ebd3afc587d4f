//! Seller listing command

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use notemarket_core::ports::marketplace::MarketplaceApi;

use crate::commands::{build_provider, load_config};
use crate::output::OutputFormat;

/// List the notes published under the current account
#[derive(Debug, Args)]
pub struct NotesCommand {
    /// Override the config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

impl NotesCommand {
    pub async fn execute(self, format: OutputFormat) -> Result<()> {
        let config = load_config(self.config.as_ref())?;
        let provider = build_provider(&config)?;

        let listing = provider
            .list_seller_notes()
            .await
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;

        if format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&listing)?);
            return Ok(());
        }

        if listing.is_empty() {
            println!("You have not uploaded any notes yet.");
            return Ok(());
        }

        for note in &listing {
            let title = note.title.as_deref().unwrap_or("Untitled");
            let price = match note.price {
                Some(price) if price > 0.0 => format!("${price:.2}"),
                _ => "Free".to_string(),
            };
            println!("{title}  [{price}]");
            if let Some(description) = note.description.as_deref() {
                println!("    {description}");
            }
            if !note.tags.is_empty() {
                println!("    #{}", note.tags.join(" #"));
            }
        }
        println!("{} note(s) total.", listing.len());

        Ok(())
    }
}
