//! Add To Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{
        errors::into_api_error,
        record_outcome,
        requests::AddToCartRequest,
        responses::{CartEnvelope, CartResponse},
    },
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Add To Cart Handler
///
/// Adds a product variant to the caller's cart, creating the cart on first
/// use. Adding a variant that is already in the cart increases its quantity.
#[endpoint(
    tags("cart"),
    summary = "Add To Cart",
    security(("bearer_auth" = [])),
    request_body = AddToCartRequest
)]
#[tracing::instrument(
    name = "cart.add",
    skip(req, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        variant_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    )
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, ApiError> {
    let result = add(req, depot).await;

    record_outcome("add", &result);

    result
}

async fn add(req: &mut Request, depot: &Depot) -> Result<Json<CartEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    // An unreadable body is treated the same as an empty one.
    let item = req
        .parse_json::<AddToCartRequest>()
        .await
        .unwrap_or_default()
        .validate()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(item.product_uuid));
    span.record("variant_uuid", tracing::field::display(item.variant_uuid));
    span.record("quantity", item.quantity.get());

    let cart = state
        .app
        .carts
        .add_item(user, item)
        .await
        .map_err(into_api_error)?;

    Ok(Json(CartResponse::populated(cart).into()))
}
