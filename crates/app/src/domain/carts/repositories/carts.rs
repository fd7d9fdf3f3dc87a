//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{encode_amount, try_get_amount},
    domain::{
        carts::records::{CartRecord, CartUuid},
        users::UserUuid,
    },
};

const FIND_CART_FOR_USER_SQL: &str = include_str!("../sql/find_cart_for_user.sql");
const LOCK_CART_FOR_USER_SQL: &str = include_str!("../sql/lock_cart_for_user.sql");
const INSERT_CART_IF_MISSING_SQL: &str = include_str!("../sql/insert_cart_if_missing.sql");
const UPDATE_CART_TOTAL_SQL: &str = include_str!("../sql/update_cart_total.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Read the user's cart without locking it.
    pub(crate) async fn find_cart_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(FIND_CART_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Read the user's cart and hold its row lock until the transaction ends.
    pub(crate) async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(LOCK_CART_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lock the user's cart, creating it first if they have none.
    ///
    /// Concurrent callers for the same user both insert with the conflict
    /// ignored, then queue on the row lock of the single surviving cart.
    pub(crate) async fn get_or_create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query(INSERT_CART_IF_MISSING_SQL)
            .bind(CartUuid::new().into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?;

        self.lock_cart(tx, user)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub(crate) async fn update_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        total_price: u64,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(UPDATE_CART_TOTAL_SQL)
            .bind(cart.into_uuid())
            .bind(encode_amount(total_price)?)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            total_price: try_get_amount(row, "total_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
