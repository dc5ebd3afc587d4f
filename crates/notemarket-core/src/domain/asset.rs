//! Picked assets and asset kinds
//!
//! A note has two upload slots: the optional cover image and the required
//! content file. Each slot has its own session-issuance endpoint and default
//! content type. A [`PickedAsset`] is a file the user has already selected
//! locally; replacing the asset for a slot discards the previous one.

use std::fmt;

/// The two upload targets of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Optional cover image shown in listings
    Cover,
    /// The downloadable note file itself
    Content,
}

impl AssetKind {
    /// Content type used when the picked file does not declare one
    pub fn default_content_type(&self) -> &'static str {
        match self {
            AssetKind::Cover => "image/png",
            AssetKind::Content => "application/pdf",
        }
    }

    /// Path segment of the session-issuance endpoint for this kind
    pub fn session_suffix(&self) -> &'static str {
        match self {
            AssetKind::Cover => "cover-upload-url",
            AssetKind::Content => "upload-url",
        }
    }

    /// Lowercase label used in messages and logs
    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Cover => "cover",
            AssetKind::Content => "content",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A locally selected file staged for upload
///
/// The payload is held in memory; the picker (or CLI) reads the file before
/// constructing the asset. The declared content type and size come from the
/// picker and may be absent; an unknown size is forwarded as absent, never
/// coerced to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedAsset {
    name: Option<String>,
    content_type: Option<String>,
    declared_size: Option<u64>,
    bytes: Vec<u8>,
}

impl PickedAsset {
    /// Creates an asset from raw bytes; the declared size is taken from the payload
    pub fn new(bytes: Vec<u8>) -> Self {
        let declared_size = Some(bytes.len() as u64);
        Self {
            name: None,
            content_type: None,
            declared_size,
            bytes,
        }
    }

    /// Sets the original file name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the declared MIME type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Overrides the declared size (pickers may not know it)
    pub fn with_declared_size(mut self, size: Option<u64>) -> Self {
        self.declared_size = size;
        self
    }

    /// Returns the original file name if known
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the declared MIME type if present
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the declared size in bytes if known
    pub fn declared_size(&self) -> Option<u64> {
        self.declared_size
    }

    /// Returns the file payload
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Declared content type if non-blank, else the kind-specific default
    pub fn resolved_content_type(&self, kind: AssetKind) -> String {
        match self.content_type.as_deref().map(str::trim) {
            Some(declared) if !declared.is_empty() => declared.to_string(),
            _ => kind.default_content_type().to_string(),
        }
    }
}
