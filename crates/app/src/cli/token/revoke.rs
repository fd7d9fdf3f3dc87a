use clap::Args;
use hamper_app::auth::{ApiTokenUuid, PgAuthService};
use uuid::Uuid;

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    /// Token UUID to revoke
    #[arg(long)]
    token_uuid: Uuid,
}

#[expect(clippy::print_stdout, reason = "the outcome is the command's output")]
pub(crate) async fn run(service: &PgAuthService, args: RevokeTokenArgs) -> Result<(), CliError> {
    let revoked = service
        .revoke_api_token(ApiTokenUuid::from_uuid(args.token_uuid))
        .await
        .map_err(CliError::auth("revoke token"))?;

    if revoked {
        println!("revoked token {}", args.token_uuid);
    } else {
        println!("token {} was not active", args.token_uuid);
    }

    Ok(())
}
