//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{
        errors::into_api_error,
        record_outcome,
        responses::{CartEnvelope, CartResponse},
    },
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the caller's cart with every line populated.
#[endpoint(tags("cart"), summary = "Get Cart", security(("bearer_auth" = [])))]
#[tracing::instrument(name = "cart.get", skip(depot), fields(user_uuid = tracing::field::Empty))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartEnvelope>, ApiError> {
    let result = get(depot).await;

    record_outcome("get", &result);

    result
}

async fn get(depot: &Depot) -> Result<Json<CartEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let cart = state
        .app
        .carts
        .get_cart(user)
        .await
        .map_err(into_api_error)?;

    Ok(Json(CartResponse::with_count(cart).into()))
}
