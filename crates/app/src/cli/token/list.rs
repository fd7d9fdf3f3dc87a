use clap::Args;
use hamper_app::{auth::PgAuthService, domain::users::UserUuid};
use jiff::Timestamp;
use uuid::Uuid;

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// User whose tokens should be listed
    #[arg(long)]
    user_uuid: Uuid,
}

#[expect(clippy::print_stdout, reason = "the listing is the command's output")]
pub(crate) async fn run(service: &PgAuthService, args: ListTokensArgs) -> Result<(), CliError> {
    let tokens = service
        .list_api_tokens(UserUuid::from_uuid(args.user_uuid))
        .await
        .map_err(CliError::auth("list tokens"))?;

    if tokens.is_empty() {
        println!("no tokens found for user {}", args.user_uuid);
        return Ok(());
    }

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("created_at: {}", token.created_at);
        println!("last_used_at: {}", or_label(token.last_used_at, "never"));
        println!("expires_at: {}", or_label(token.expires_at, "none"));
        println!("revoked_at: {}", or_label(token.revoked_at, "active"));
        println!();
    }

    Ok(())
}

fn or_label(timestamp: Option<Timestamp>, label: &str) -> String {
    timestamp.map_or_else(|| label.to_string(), |value| value.to_string())
}
