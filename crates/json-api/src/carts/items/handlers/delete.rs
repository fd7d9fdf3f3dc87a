//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use hamper_app::domain::carts::records::CartItemUuid;

use crate::{
    carts::{
        errors::into_api_error,
        record_outcome,
        requests::parse_path_identifier,
        responses::{CartEnvelope, CartResponse},
    },
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Delete Cart Item Handler
///
/// Removes one of the caller's cart items. The cart itself is kept, even
/// when it becomes empty.
#[endpoint(tags("cart"), summary = "Delete Cart Item", security(("bearer_auth" = [])))]
#[tracing::instrument(
    name = "cart.item.delete",
    skip(item, depot),
    fields(
        user_uuid = tracing::field::Empty,
        cart_item_uuid = tracing::field::Empty
    )
)]
pub(crate) async fn handler(
    item: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, ApiError> {
    let result = delete(&item.into_inner(), depot).await;

    record_outcome("delete", &result);

    result
}

async fn delete(item: &str, depot: &Depot) -> Result<Json<CartEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let item: CartItemUuid = parse_path_identifier(item)?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("cart_item_uuid", tracing::field::display(item));

    let cart = state
        .app
        .carts
        .remove_item(user, item)
        .await
        .map_err(into_api_error)?;

    Ok(Json(CartResponse::emptied(cart).into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use hamper_app::{
        database::StorageError,
        domain::carts::{CartsServiceError, MockCartsService},
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{TEST_USER_UUID, carts_service, make_cart_record},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/item/{item}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_cart_item_success() -> TestResult {
        let item_uuid = CartItemUuid::new();
        let cart = make_cart_record(1_000);

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |user, item| *user == TEST_USER_UUID && *item == item_uuid)
            .return_once(move |_, _| Ok(cart));

        let mut res = TestClient::delete(format!("http://example.com/cart/item/{item_uuid}"))
            .send(&make_service(carts))
            .await;

        let body: CartEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success);
        assert_eq!(body.data.cart.total_price, 1_000);
        assert!(body.data.cart.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_cart_item_malformed_path() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_remove_item().never();

        let mut res = TestClient::delete("http://example.com/cart/item/not-an-id")
            .send(&make_service(carts))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Invalid identifier");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_cart_item_not_found() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ItemNotFound));

        let mut res = TestClient::delete(format!(
            "http://example.com/cart/item/{}",
            CartItemUuid::new()
        ))
        .send(&make_service(carts))
        .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "Cart item not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_cart_item_variant_missing() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::VariantNotFound));

        let mut res = TestClient::delete(format!(
            "http://example.com/cart/item/{}",
            CartItemUuid::new()
        ))
        .send(&make_service(carts))
        .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "Variation not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_cart_item_storage_failure() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::Sql(StorageError::PoolTimedOut)));

        let mut res = TestClient::delete(format!(
            "http://example.com/cart/item/{}",
            CartItemUuid::new()
        ))
        .send(&make_service(carts))
        .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.message, "Server error");

        Ok(())
    }
}
