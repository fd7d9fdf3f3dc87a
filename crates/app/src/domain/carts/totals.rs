//! Cart total maintenance.
//!
//! Totals are kept incrementally: each mutation adjusts the stored total by
//! the amount of the line it touched, inside the same transaction as the item
//! write. Subtractions floor at zero rather than going negative.

use thiserror::Error;

use crate::domain::carts::data::Quantity;

/// Largest total storable in a `BIGINT` column.
pub const MAX_TOTAL: u64 = i64::MAX.unsigned_abs();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TotalError {
    #[error("cart total would exceed {MAX_TOTAL}")]
    Overflow,
}

/// Price of `quantity` units at `unit_price`.
///
/// # Errors
///
/// Returns an error when the product exceeds [`MAX_TOTAL`].
pub fn line_amount(quantity: Quantity, unit_price: u64) -> Result<u64, TotalError> {
    unit_price
        .checked_mul(u64::from(quantity.get()))
        .filter(|amount| *amount <= MAX_TOTAL)
        .ok_or(TotalError::Overflow)
}

/// Add `amount` to `total`.
///
/// # Errors
///
/// Returns an error when the sum exceeds [`MAX_TOTAL`].
pub fn add(total: u64, amount: u64) -> Result<u64, TotalError> {
    total
        .checked_add(amount)
        .filter(|total| *total <= MAX_TOTAL)
        .ok_or(TotalError::Overflow)
}

/// Remove `amount` from `total`, flooring at zero.
#[must_use]
pub fn subtract(total: u64, amount: u64) -> u64 {
    total.saturating_sub(amount)
}

/// Move `total` by `(new - old) * unit_price`.
///
/// # Errors
///
/// Returns an error when the resulting total exceeds [`MAX_TOTAL`].
pub fn requantify(
    total: u64,
    old: Quantity,
    new: Quantity,
    unit_price: u64,
) -> Result<u64, TotalError> {
    let (old, new) = (u64::from(old.get()), u64::from(new.get()));

    let delta = |units: u64| {
        unit_price
            .checked_mul(units)
            .filter(|amount| *amount <= MAX_TOTAL)
            .ok_or(TotalError::Overflow)
    };

    if new >= old {
        add(total, delta(new - old)?)
    } else {
        Ok(subtract(total, delta(old - new)?))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn qty(value: u64) -> Quantity {
        Quantity::new(value).unwrap_or_else(|error| unreachable!("{error}"))
    }

    #[test]
    fn line_amount_multiplies_price_by_quantity() -> TestResult {
        assert_eq!(line_amount(qty(3), 10_00)?, 30_00);

        Ok(())
    }

    #[test]
    fn line_amount_overflow_is_an_error() {
        assert_eq!(line_amount(qty(2), u64::MAX), Err(TotalError::Overflow));
        assert_eq!(line_amount(qty(2), MAX_TOTAL), Err(TotalError::Overflow));
    }

    #[test]
    fn add_rejects_totals_beyond_bigint() {
        assert_eq!(add(MAX_TOTAL, 1), Err(TotalError::Overflow));
        assert_eq!(add(MAX_TOTAL - 1, 1), Ok(MAX_TOTAL));
    }

    #[test]
    fn subtract_floors_at_zero() {
        assert_eq!(subtract(5, 7), 0);
        assert_eq!(subtract(7, 5), 2);
    }

    #[test]
    fn requantify_moves_total_by_quantity_delta() -> TestResult {
        assert_eq!(requantify(50, qty(5), qty(1), 10)?, 10);
        assert_eq!(requantify(10, qty(1), qty(4), 10)?, 40);
        assert_eq!(requantify(40, qty(4), qty(4), 10)?, 40);

        Ok(())
    }

    #[test]
    fn requantify_never_goes_negative() -> TestResult {
        assert_eq!(requantify(5, qty(3), qty(1), 10)?, 0);

        Ok(())
    }

    #[test]
    fn add_update_delete_scenario() -> TestResult {
        // qty 2 @ 10, then +3, then set to 1, then delete
        let mut total = 0;

        total = add(total, line_amount(qty(2), 10)?)?;
        assert_eq!(total, 20);

        total = add(total, line_amount(qty(3), 10)?)?;
        assert_eq!(total, 50);

        total = requantify(total, qty(5), qty(1), 10)?;
        assert_eq!(total, 10);

        total = subtract(total, line_amount(qty(1), 10)?);
        assert_eq!(total, 0);

        Ok(())
    }
}
