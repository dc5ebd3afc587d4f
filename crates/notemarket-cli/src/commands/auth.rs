//! Session management commands

use anyhow::Result;
use clap::Subcommand;

use notemarket_core::ports::credentials::CredentialStore;

use crate::output::OutputFormat;
use crate::session::SessionFile;

/// Manage the persisted login session
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Store a bearer token for subsequent commands
    Login {
        /// The bearer token issued by the backend login endpoint
        #[arg(long)]
        token: String,
        /// Account email, recorded for display only
        #[arg(long)]
        email: Option<String>,
    },
    /// Remove the persisted session
    Logout,
    /// Show whether a session is present
    Status,
}

impl AuthCommand {
    pub async fn execute(self, _format: OutputFormat) -> Result<()> {
        let session = SessionFile::new(SessionFile::default_path());

        match self {
            AuthCommand::Login { token, email } => {
                session.save(&token, email.as_deref())?;
                println!("Session saved to {}", session.path().display());
            }
            AuthCommand::Logout => {
                session.clear()?;
                println!("Session cleared.");
            }
            AuthCommand::Status => match session.access_token() {
                Some(_) => {
                    let who = session
                        .email()
                        .map(|email| format!(" as {email}"))
                        .unwrap_or_default();
                    println!("Logged in{who}.");
                }
                None => println!("Not logged in."),
            },
        }

        Ok(())
    }
}
