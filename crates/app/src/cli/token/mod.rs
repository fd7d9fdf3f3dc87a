//! `token` subcommands: issue, list and revoke API bearer tokens.

use clap::{Args, Subcommand};
use hamper_app::{auth::PgAuthService, database};

use crate::cli::CliError;

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    action: TokenAction,
}

#[derive(Debug, Subcommand)]
enum TokenAction {
    /// Issue a token for a user and print it once
    Create(create::CreateTokenArgs),

    /// List a user's tokens without their secrets
    List(list::ListTokensArgs),

    /// Revoke a token so it stops authenticating
    Revoke(revoke::RevokeTokenArgs),
}

impl TokenCommand {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        let database_url = self.database_url.ok_or(CliError::MissingDatabaseUrl)?;

        let pool = database::connect(&database_url)
            .await
            .map_err(CliError::Connect)?;

        let service = PgAuthService::new(pool);

        match self.action {
            TokenAction::Create(args) => create::run(&service, args).await,
            TokenAction::List(args) => list::run(&service, args).await,
            TokenAction::Revoke(args) => revoke::run(&service, args).await,
        }
    }
}
