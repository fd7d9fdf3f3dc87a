use clap::{Parser, Subcommand};
use hamper_app::{auth::AuthServiceError, database::StorageError};
use thiserror::Error;

mod token;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("DATABASE_URL or --database-url is required")]
    MissingDatabaseUrl,

    #[error("failed to connect to database: {0}")]
    Connect(#[source] StorageError),

    #[error("expires-at must be in the future")]
    ExpiryInPast,

    #[error("{action} failed: {source}")]
    Auth {
        action: &'static str,
        #[source]
        source: AuthServiceError,
    },
}

impl CliError {
    pub(crate) fn auth(action: &'static str) -> impl FnOnce(AuthServiceError) -> Self {
        move |source| Self::Auth { action, source }
    }
}

#[derive(Debug, Parser)]
#[command(name = "hamper-app", about = "Hamper operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage API bearer tokens
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self.command {
            Commands::Token(command) => command.run().await,
        }
    }
}
