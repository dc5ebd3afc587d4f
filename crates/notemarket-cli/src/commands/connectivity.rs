//! Standalone connectivity preflight command
//!
//! Runs the same check the upload chain performs, so a storage
//! misconfiguration can be diagnosed without spending an upload attempt.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use notemarket_api::connectivity::{ensure_storage_reachable, fetch_status};
use notemarket_core::ports::marketplace::Preflight;

use crate::commands::{build_provider, load_config};
use crate::output::OutputFormat;

/// Check whether the backend can reach its object storage
#[derive(Debug, Args)]
pub struct ConnectivityCommand {
    /// Query the raw status even when the preflight would be skipped
    #[arg(long)]
    full: bool,

    /// Override the config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ConnectivityCommand {
    pub async fn execute(self, format: OutputFormat) -> Result<()> {
        let config = load_config(self.config.as_ref())?;
        let provider = build_provider(&config)?;
        let client = provider.client();

        if self.full {
            let status = fetch_status(client)
                .await
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("backend reachable: {}", status.backend_reachable);
                println!("storage enabled:   {}", status.storage_enabled);
                println!("storage reachable: {}", status.minio_reachable);
                if let Some(endpoint) = status.endpoint.as_deref() {
                    println!("endpoint:          {endpoint}");
                }
                if let Some(bucket) = status.bucket.as_deref() {
                    println!("bucket:            {bucket}");
                }
            }
            return Ok(());
        }

        match ensure_storage_reachable(client).await {
            Ok(Preflight::SkippedLocal { api_host }) => {
                println!("Local usage detected ({api_host}); preflight skipped.");
            }
            Ok(Preflight::Verified) => {
                println!("Connectivity check passed: client -> backend -> storage.");
            }
            Err(err) => {
                anyhow::bail!(err.to_string());
            }
        }

        Ok(())
    }
}
