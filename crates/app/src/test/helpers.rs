//! Test Helpers

use crate::{
    domain::{
        carts::{
            CartsService, CartsServiceError,
            data::{NewCartItem, Quantity},
            models::Cart,
        },
        catalog::records::{ProductUuid, VariantUuid},
        users::UserUuid,
    },
    test::TestContext,
};

pub(crate) fn qty(value: u64) -> Quantity {
    Quantity::new(value).expect("test quantity should be valid")
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    user: UserUuid,
    product: ProductUuid,
    variant: VariantUuid,
    quantity: u64,
) -> Result<Cart, CartsServiceError> {
    ctx.carts
        .add_item(
            user,
            NewCartItem {
                product_uuid: product,
                variant_uuid: variant,
                quantity: qty(quantity),
            },
        )
        .await
}
