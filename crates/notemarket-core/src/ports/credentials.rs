//! Credential port (driven/secondary port)
//!
//! The authentication token lives in process-wide session state owned by the
//! surrounding application (persisted login). Collaborators read it through
//! this port *at the moment each request is issued*, never capturing it at
//! flow start, so a token refresh between steps is honored without
//! restarting the flow.

/// Read access to the current bearer token
pub trait CredentialStore: Send + Sync {
    /// Returns the current access token, if a session exists
    ///
    /// Called once per outgoing request; implementations should return the
    /// freshest value they have rather than a cached snapshot.
    fn access_token(&self) -> Option<String>;
}

/// Fixed-token credential store, for tests and one-shot tooling
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    token: Option<String>,
}

impl StaticCredentials {
    /// Store holding the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Store with no session (anonymous requests)
    pub fn anonymous() -> Self {
        Self { token: None }
    }
}

impl CredentialStore for StaticCredentials {
    fn access_token(&self) -> Option<String> {
        self.token.clone()
    }
}
