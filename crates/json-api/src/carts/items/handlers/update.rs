//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use hamper_app::domain::carts::records::CartItemUuid;

use crate::{
    carts::{
        errors::into_api_error,
        record_outcome,
        requests::{UpdateCartItemRequest, parse_path_identifier},
        responses::UpdatedCartEnvelope,
    },
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Cart Item Handler
///
/// Replaces the quantity of one of the caller's cart items and returns the
/// cart with the stored item.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    request_body = UpdateCartItemRequest
)]
#[tracing::instrument(
    name = "cart.item.update",
    skip(item, req, depot),
    fields(
        user_uuid = tracing::field::Empty,
        cart_item_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    )
)]
pub(crate) async fn handler(
    item: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<UpdatedCartEnvelope>, ApiError> {
    let result = update(&item.into_inner(), req, depot).await;

    record_outcome("update", &result);

    result
}

async fn update(
    item: &str,
    req: &mut Request,
    depot: &Depot,
) -> Result<Json<UpdatedCartEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let quantity = req
        .parse_json::<UpdateCartItemRequest>()
        .await
        .unwrap_or_default()
        .validate()?;

    let item: CartItemUuid = parse_path_identifier(item)?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("cart_item_uuid", tracing::field::display(item));
    span.record("quantity", quantity.get());

    let updated = state
        .app
        .carts
        .update_item(user, item, quantity)
        .await
        .map_err(into_api_error)?;

    Ok(Json(updated.into()))
}
