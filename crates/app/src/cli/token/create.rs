use clap::Args;
use hamper_app::{auth::PgAuthService, domain::users::UserUuid};
use jiff::Timestamp;
use uuid::Uuid;

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// User the token authenticates as
    #[arg(long)]
    user_uuid: Uuid,

    /// Expiry as an RFC 3339 timestamp; tokens never expire when omitted
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

#[expect(clippy::print_stdout, reason = "the token is the command's output")]
pub(crate) async fn run(service: &PgAuthService, args: CreateTokenArgs) -> Result<(), CliError> {
    if args.expires_at.is_some_and(|expires_at| expires_at <= Timestamp::now()) {
        return Err(CliError::ExpiryInPast);
    }

    let issued = service
        .issue_api_token(UserUuid::from_uuid(args.user_uuid), args.expires_at)
        .await
        .map_err(CliError::auth("create token"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("user_uuid: {}", issued.metadata.user_uuid);
    println!("created_at: {}", issued.metadata.created_at);
    if let Some(expires_at) = issued.metadata.expires_at {
        println!("expires_at: {expires_at}");
    }
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
