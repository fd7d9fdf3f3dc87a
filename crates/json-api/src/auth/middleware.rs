//! Bearer token middleware.

use std::sync::Arc;

use hamper_app::{auth::AuthServiceError, domain::users::UserUuid};
use salvo::{http::header::AUTHORIZATION, prelude::*, writing::Scribe};
use tracing::error;

use crate::{errors::ApiError, extensions::*, state::State};

/// Resolve the bearer token to a user and store it in the depot, or stop the
/// request with 401.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match authenticate(req, depot).await {
        Ok(user) => {
            depot.insert_user_uuid(user);

            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            error.render(res);

            ctrl.skip_rest();
        }
    }
}

async fn authenticate(req: &Request, depot: &Depot) -> Result<UserUuid, ApiError> {
    let token = extract_bearer_token(req)
        .ok_or(ApiError::unauthorized("Missing or invalid Authorization header"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(|source| match source {
            AuthServiceError::NotFound | AuthServiceError::Token(_) => {
                ApiError::unauthorized("Invalid API token")
            }
            AuthServiceError::Sql(source) => {
                error!("failed to validate api token: {source}");

                ApiError::internal()
            }
        })
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
