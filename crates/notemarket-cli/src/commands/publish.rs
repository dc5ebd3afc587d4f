//! Guided publication command
//!
//! Drives the three-step flow end to end: metadata creation, optional cover
//! upload (skipped when no `--cover` is given), and the content file upload.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::debug;

use notemarket_core::domain::asset::{AssetKind, PickedAsset};
use notemarket_core::usecases::PublishNoteUseCase;

use crate::commands::{build_provider, load_config};
use crate::output::OutputFormat;

/// Publish a note through the guided flow
#[derive(Debug, Args)]
pub struct PublishCommand {
    /// Note title
    #[arg(long)]
    title: String,

    /// Optional description
    #[arg(long, default_value = "")]
    description: String,

    /// Price, e.g. 9.99 (0 or omitted means free)
    #[arg(long, default_value = "0")]
    price: String,

    /// Comma-separated tags
    #[arg(long, default_value = "")]
    tags: String,

    /// Niche (category) identifier
    #[arg(long)]
    niche: String,

    /// Optional course identifier
    #[arg(long, default_value = "")]
    course: String,

    /// Cover image file; the cover step is skipped when omitted
    #[arg(long)]
    cover: Option<PathBuf>,

    /// The note content file (PDF)
    #[arg(long)]
    file: PathBuf,

    /// Override the config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

impl PublishCommand {
    pub async fn execute(self, _format: OutputFormat) -> Result<()> {
        let config = load_config(self.config.as_ref())?;
        let provider = build_provider(&config)?;
        let mut usecase = PublishNoteUseCase::new(provider);

        usecase
            .edit_draft(|draft| {
                draft.title = self.title.clone();
                draft.description = self.description.clone();
                draft.price = self.price.clone();
                draft.tags = self.tags.clone();
                draft.niche_id = self.niche.clone();
                draft.course_id = self.course.clone();
            })
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;

        let note_id = match usecase.submit_details().await {
            Ok(id) => id,
            Err(_) => bail!(flow_error(&usecase)),
        };
        println!("Step 1/3: details saved (note {note_id})");

        match &self.cover {
            Some(cover_path) => {
                usecase.pick_asset(AssetKind::Cover, read_asset(cover_path)?);
                if usecase.upload_cover().await.is_err() {
                    bail!(flow_error(&usecase));
                }
                println!("Step 2/3: cover uploaded");
            }
            None => {
                usecase
                    .skip_cover()
                    .map_err(|e| anyhow::anyhow!(e.to_string()))?;
                println!("Step 2/3: cover skipped");
            }
        }

        usecase.pick_asset(AssetKind::Content, read_asset(&self.file)?);
        if usecase.upload_content_and_finish().await.is_err() {
            bail!(flow_error(&usecase));
        }
        println!("Step 3/3: note file uploaded");
        println!("Note published successfully.");
        println!("You now have {} note(s) listed.", usecase.seller_notes().len());

        Ok(())
    }
}

fn flow_error(usecase: &PublishNoteUseCase) -> String {
    usecase
        .flow()
        .error()
        .unwrap_or("Publication failed.")
        .to_string()
}

/// Reads a local file into a picked asset, inferring the content type from
/// the extension where possible
fn read_asset(path: &Path) -> Result<PickedAsset> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read asset payload");

    let mut asset = PickedAsset::new(bytes);
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        asset = asset.with_name(name);
    }
    if let Some(content_type) = content_type_for(path) {
        asset = asset.with_content_type(content_type);
    }
    Ok(asset)
}

/// Extension-based content type guess; unknown extensions stay undeclared so
/// the kind-specific default applies
fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}
