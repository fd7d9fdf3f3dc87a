//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, error, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            assembly::CatalogIndex,
            data::{NewCartItem, Quantity},
            errors::CartsServiceError,
            models::{Cart, UpdatedCart},
            records::{CartItemUuid, CartRecord},
            repositories::{PgCartItemsRepository, PgCartsRepository},
            totals,
        },
        catalog::PgCatalogRepository,
        users::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    catalog: PgCatalogRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            catalog: PgCatalogRepository::new(),
        }
    }

    /// Load every item of `cart` joined to its catalog data.
    async fn load_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartRecord,
    ) -> Result<Cart, CartsServiceError> {
        let items = self.items_repository.list_items(tx, cart.uuid).await?;

        let mut product_uuids: Vec<_> = items.iter().map(|item| item.product_uuid).collect();
        product_uuids.sort_unstable();
        product_uuids.dedup();

        let variant_uuids: Vec<_> = items.iter().map(|item| item.variant_uuid).collect();

        let products = self.catalog.find_products(tx, &product_uuids).await?;
        let variants = self.catalog.find_variants(tx, &variant_uuids).await?;
        let images = self.catalog.find_images(tx, &product_uuids).await?;

        let lines = CatalogIndex::new(products, variants, images)
            .lines(&items)
            .inspect_err(|error| {
                error!(cart_uuid = %cart.uuid, %error, "cart references missing catalog data");
            })?;

        Ok(Cart { cart, lines })
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            user_uuid = %user,
            product_uuid = %item.product_uuid,
            variant_uuid = %item.variant_uuid,
            cart_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn add_item(&self, user: UserUuid, item: NewCartItem) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.catalog
            .find_product(&mut tx, item.product_uuid)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let variant = self
            .catalog
            .find_variant(&mut tx, item.variant_uuid)
            .await?
            .filter(|variant| variant.product_uuid == item.product_uuid)
            .ok_or(CartsServiceError::VariantNotFound)?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        Span::current().record("cart_uuid", tracing::field::display(cart.uuid));

        let existing = self
            .items_repository
            .find_item(&mut tx, cart.uuid, item.product_uuid, item.variant_uuid)
            .await?;

        let amount = totals::line_amount(item.quantity, variant.price)?;
        let total = totals::add(cart.total_price, amount)?;

        match existing {
            Some(existing) => {
                let quantity = existing.quantity.checked_add(item.quantity)?;

                self.items_repository
                    .update_quantity(&mut tx, existing.uuid, quantity)
                    .await?;
            }
            None => {
                self.items_repository
                    .create_item(&mut tx, cart.uuid, &item)
                    .await?;
            }
        }

        let cart = self
            .carts_repository
            .update_total(&mut tx, cart.uuid, total)
            .await?;

        let cart = self.load_cart(&mut tx, cart).await?;

        tx.commit().await?;

        info!(cart_uuid = %cart.cart.uuid, total_price = cart.cart.total_price, "added item to cart");

        Ok(cart)
    }

    #[tracing::instrument(name = "carts.service.get_cart", skip(self), fields(user_uuid = %user), err)]
    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_cart_for_user(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::CartNotFound)?;

        let cart = self.load_cart(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.update_item",
        skip(self),
        fields(user_uuid = %user, cart_item_uuid = %item, quantity = %quantity),
        err
    )]
    async fn update_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: Quantity,
    ) -> Result<UpdatedCart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        let existing = self
            .items_repository
            .find_cart_item(&mut tx, cart.uuid, item)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        let variant = self
            .catalog
            .find_variant(&mut tx, existing.variant_uuid)
            .await?
            .ok_or(CartsServiceError::VariantNotFound)?;

        let total =
            totals::requantify(cart.total_price, existing.quantity, quantity, variant.price)?;

        let item = self
            .items_repository
            .update_quantity(&mut tx, existing.uuid, quantity)
            .await?;

        let cart = self
            .carts_repository
            .update_total(&mut tx, cart.uuid, total)
            .await?;

        tx.commit().await?;

        info!(cart_uuid = %cart.uuid, total_price = cart.total_price, "updated cart item");

        Ok(UpdatedCart { cart, item })
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(user_uuid = %user, cart_item_uuid = %item),
        err
    )]
    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        let existing = self
            .items_repository
            .find_cart_item(&mut tx, cart.uuid, item)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        let variant = self
            .catalog
            .find_variant(&mut tx, existing.variant_uuid)
            .await?
            .ok_or(CartsServiceError::VariantNotFound)?;

        let amount = totals::line_amount(existing.quantity, variant.price)?;

        let rows_affected = self
            .items_repository
            .delete_item(&mut tx, cart.uuid, existing.uuid)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::ItemNotFound);
        }

        let cart = self
            .carts_repository
            .update_total(&mut tx, cart.uuid, totals::subtract(cart.total_price, amount))
            .await?;

        tx.commit().await?;

        info!(cart_uuid = %cart.uuid, total_price = cart.total_price, "removed cart item");

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a product variant to the user's cart, creating the cart on first
    /// use. Adding a variant already in the cart increases its quantity.
    async fn add_item(&self, user: UserUuid, item: NewCartItem) -> Result<Cart, CartsServiceError>;

    /// Retrieve the user's cart with every line populated.
    async fn get_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError>;

    /// Replace the quantity of one of the user's cart items.
    async fn update_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: Quantity,
    ) -> Result<UpdatedCart, CartsServiceError>;

    /// Remove one of the user's cart items.
    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::catalog::records::{ProductUuid, VariantUuid},
        test::{
            TestContext,
            helpers::{add_item, qty},
        },
    };

    use super::*;

    #[tokio::test]
    async fn first_add_creates_cart_with_one_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let shirt = ctx.seed_product("Shirt", &["front.png", "back.png"]).await;
        let large = ctx.seed_variant(shirt, "Large", 10).await;

        let cart = add_item(&ctx, user, shirt, large, 2).await?;

        assert_eq!(cart.cart.user_uuid, user);
        assert_eq!(cart.cart.total_price, 20);
        assert_eq!(cart.total_items(), 1);

        let line = cart.lines.first().ok_or("expected a line")?;

        assert_eq!(line.product.uuid, shirt);
        assert_eq!(line.variant.uuid, large);
        assert_eq!(line.quantity.get(), 2);
        assert_eq!(line.images, vec!["front.png", "back.png"]);

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_variant_twice_accumulates_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let shirt = ctx.seed_product("Shirt", &[]).await;
        let large = ctx.seed_variant(shirt, "Large", 10).await;

        let first = add_item(&ctx, user, shirt, large, 2).await?;
        let second = add_item(&ctx, user, shirt, large, 3).await?;

        assert_eq!(first.cart.uuid, second.cart.uuid, "one cart per user");
        assert_eq!(second.cart.total_price, 50);
        assert_eq!(second.total_items(), 1);
        assert_eq!(
            second.lines.first().map(|line| line.quantity.get()),
            Some(5)
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_update_delete_keeps_total_in_step() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let shirt = ctx.seed_product("Shirt", &[]).await;
        let large = ctx.seed_variant(shirt, "Large", 10).await;

        add_item(&ctx, user, shirt, large, 2).await?;
        let cart = add_item(&ctx, user, shirt, large, 3).await?;
        let item = cart.lines.first().ok_or("expected a line")?.item_uuid;

        let updated = ctx.carts.update_item(user, item, qty(1)).await?;

        assert_eq!(updated.cart.total_price, 10);
        assert_eq!(updated.item.quantity.get(), 1);

        let removed = ctx.carts.remove_item(user, item).await?;

        assert_eq!(removed.total_price, 0);

        let cart = ctx.carts.get_cart(user).await?;

        assert_eq!(cart.cart.uuid, removed.uuid, "cart outlives its last item");
        assert!(cart.lines.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_without_cart_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.get_cart(UserUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::CartNotFound)),
            "expected CartNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_product_is_not_found_and_creates_nothing() {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();

        let result = add_item(&ctx, user, ProductUuid::new(), VariantUuid::new(), 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );

        let cart = ctx.carts.get_cart(user).await;

        assert!(
            matches!(cart, Err(CartsServiceError::CartNotFound)),
            "failed add should not create a cart, got {cart:?}"
        );
    }

    #[tokio::test]
    async fn variant_of_another_product_is_not_found() {
        let ctx = TestContext::new().await;
        let shirt = ctx.seed_product("Shirt", &[]).await;
        let mug = ctx.seed_product("Mug", &[]).await;
        let plain = ctx.seed_variant(mug, "Plain", 5).await;

        let result = add_item(&ctx, UserUuid::new(), shirt, plain, 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::VariantNotFound)),
            "expected VariantNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn other_users_items_are_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = UserUuid::new();
        let intruder = UserUuid::new();
        let shirt = ctx.seed_product("Shirt", &[]).await;
        let large = ctx.seed_variant(shirt, "Large", 10).await;

        let cart = add_item(&ctx, owner, shirt, large, 1).await?;
        let item = cart.lines.first().ok_or("expected a line")?.item_uuid;

        add_item(&ctx, intruder, shirt, large, 1).await?;

        let update = ctx.carts.update_item(intruder, item, qty(9)).await;
        let remove = ctx.carts.remove_item(intruder, item).await;

        assert!(
            matches!(update, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {update:?}"
        );
        assert!(
            matches!(remove, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {remove:?}"
        );

        let unchanged = ctx.carts.get_cart(owner).await?;

        assert_eq!(unchanged.cart.total_price, 10);

        Ok(())
    }

    #[tokio::test]
    async fn caller_without_cart_gets_item_not_found() {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();

        let update = ctx
            .carts
            .update_item(user, CartItemUuid::new(), qty(2))
            .await;
        let remove = ctx.carts.remove_item(user, CartItemUuid::new()).await;

        assert!(
            matches!(update, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {update:?}"
        );
        assert!(
            matches!(remove, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {remove:?}"
        );

        let cart = ctx.carts.get_cart(user).await;

        assert!(
            matches!(cart, Err(CartsServiceError::CartNotFound)),
            "item operations should not create a cart, got {cart:?}"
        );
    }

    #[tokio::test]
    async fn concurrent_adds_do_not_lose_updates() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let shirt = ctx.seed_product("Shirt", &[]).await;
        let large = ctx.seed_variant(shirt, "Large", 10).await;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let carts = ctx.carts.clone();

                tokio::spawn(async move {
                    carts
                        .add_item(
                            user,
                            NewCartItem {
                                product_uuid: shirt,
                                variant_uuid: large,
                                quantity: qty(1),
                            },
                        )
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await??;
        }

        let cart = ctx.carts.get_cart(user).await?;

        assert_eq!(cart.cart.total_price, 80);
        assert_eq!(cart.lines.first().map(|line| line.quantity.get()), Some(8));

        Ok(())
    }
}
