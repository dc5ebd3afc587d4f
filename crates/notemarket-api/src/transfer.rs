//! Direct upload executor
//!
//! Performs the actual file transfer to the presigned URL. Before touching
//! the network it compares the upload host against the API host: a device
//! outside the deployment network that has been handed an internal storage
//! URL would either hang, fail with an opaque DNS error, or "succeed"
//! against the wrong target, so such uploads are refused outright with a
//! diagnostic naming both hosts.
//!
//! Storage services answer rejected uploads with an XML error document. The
//! summarizer here extracts `<Code>`/`<Message>` when present; this is
//! best-effort text extraction over an untyped format, with graceful
//! fallbacks, not a schema.

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};

use notemarket_core::domain::asset::{AssetKind, PickedAsset};
use notemarket_core::domain::errors::PublishError;
use notemarket_core::domain::netloc::{compare_hosts, host_of_url, HostVerdict};
use notemarket_core::ports::marketplace::UploadSession;

use crate::client::ApiClient;

/// Maximum characters of a raw (non-XML) error body quoted in a summary
const RAW_BODY_LIMIT: usize = 180;

/// Uploads the asset payload to the presigned target
///
/// No retry happens at this layer. Retries are the orchestrator's
/// responsibility and always re-enter through the mismatch check with a
/// fresh session, since presigned URLs may be single-use or expired.
pub async fn upload_to_presigned(
    client: &ApiClient,
    session: &UploadSession,
    asset: &PickedAsset,
    kind: AssetKind,
) -> Result<(), PublishError> {
    let upload_host = host_of_url(&session.upload_url);

    if let (Some(upload_host), Some(api_host)) = (upload_host.as_deref(), client.api_host()) {
        if compare_hosts(upload_host, &api_host) == HostVerdict::Mismatch {
            warn!(upload_host, api_host, "Refusing upload to unreachable host");
            return Err(PublishError::HostMismatch {
                upload_host: upload_host.to_string(),
                api_host,
            });
        }
    }

    let content_type = asset.resolved_content_type(kind);
    debug!(
        url = %session.upload_url,
        %content_type,
        bytes = asset.bytes().len(),
        "PUT to presigned URL"
    );

    let response = client
        .http_client()
        .put(&session.upload_url)
        .header(CONTENT_TYPE, content_type)
        .body(asset.bytes().to_vec())
        .send()
        .await
        .map_err(|e| PublishError::Transport {
            host: upload_host.unwrap_or_else(|| "upload host".to_string()),
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PublishError::StorageService {
            status: status.as_u16(),
            summary: summarize_upload_error(status.as_u16(), &body),
        });
    }

    info!(kind = %kind, file_key = %session.file_key, "Direct upload completed");
    Ok(())
}

/// Collapses runs of whitespace into single spaces and trims the ends
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the text content of `<tag>...</tag>`, case-insensitively
///
/// Returns the content up to the next closing tag; nested markup is not
/// interpreted.
fn extract_xml_tag(body: &str, tag: &str) -> Option<String> {
    let haystack = body.to_ascii_lowercase();
    let open = format!("<{}>", tag.to_ascii_lowercase());
    let close = format!("</{}>", tag.to_ascii_lowercase());

    let start = haystack.find(&open)? + open.len();
    let end = haystack[start..].find(&close)? + start;
    let content = &body[start..end];
    if content.trim().is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

/// Produces a status-coded, human-readable summary of a storage error body
pub fn summarize_upload_error(status: u16, raw_body: &str) -> String {
    if let Some(message) = extract_xml_tag(raw_body, "Message") {
        let code = match extract_xml_tag(raw_body, "Code") {
            Some(code) => format!("{}: ", normalize_whitespace(&code)),
            None => String::new(),
        };
        return format!(
            "Upload failed ({status}): {code}{}",
            normalize_whitespace(&message)
        );
    }

    let body = normalize_whitespace(raw_body);
    if !body.is_empty() {
        let quoted: String = body.chars().take(RAW_BODY_LIMIT).collect();
        return format!("Upload failed ({status}): {quoted}");
    }

    format!("Upload failed ({status}).")
}
