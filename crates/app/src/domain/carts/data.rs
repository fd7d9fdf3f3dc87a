//! Cart Data

use std::fmt;

use thiserror::Error;

use crate::domain::catalog::records::{ProductUuid, VariantUuid};

/// Largest quantity a single cart item can hold; storage uses `INTEGER`.
pub const MAX_QUANTITY: u32 = i32::MAX.unsigned_abs();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity must be greater than zero")]
    Zero,

    #[error("quantity exceeds {MAX_QUANTITY}")]
    TooLarge,
}

/// A strictly positive line quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u32);

impl Quantity {
    /// Validate a raw quantity.
    ///
    /// # Errors
    ///
    /// Returns an error when `value` is zero or larger than [`MAX_QUANTITY`].
    pub fn new(value: u64) -> Result<Self, QuantityError> {
        if value == 0 {
            return Err(QuantityError::Zero);
        }

        u32::try_from(value)
            .ok()
            .filter(|value| *value <= MAX_QUANTITY)
            .map(Self)
            .ok_or(QuantityError::TooLarge)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Sum two quantities, as happens when the same variant is added twice.
    ///
    /// # Errors
    ///
    /// Returns an error when the sum exceeds [`MAX_QUANTITY`].
    pub fn checked_add(self, other: Self) -> Result<Self, QuantityError> {
        Self::new(u64::from(self.0) + u64::from(other.0))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<i32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map_err(|_negative| QuantityError::Zero)
            .and_then(Self::new)
    }
}

impl From<Quantity> for i32 {
    fn from(value: Quantity) -> Self {
        // MAX_QUANTITY is i32::MAX, so this never saturates.
        i32::try_from(value.0).unwrap_or(i32::MAX)
    }
}

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub variant_uuid: VariantUuid,
    pub quantity: Quantity,
}
