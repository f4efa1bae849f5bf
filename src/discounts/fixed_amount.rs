//! Fixed Amount Discount

use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};

use crate::discounts::{DiscountError, DiscountKind, DiscountStrategy, major_units};

/// Takes a fixed amount off the price.
///
/// The result is not clamped: an amount larger than the price produces a
/// negative discounted price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAmountDiscount<'a> {
    amount: Money<'a, Currency>,
}

impl<'a> FixedAmountDiscount<'a> {
    /// Creates a new fixed amount discount.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidParameters`] if `amount` is negative.
    pub fn new(amount: Money<'a, Currency>) -> Result<Self, DiscountError> {
        if amount.to_minor_units() < 0 {
            return Err(DiscountError::invalid(
                DiscountKind::FixedAmount,
                format!("amount must not be negative, got {amount}"),
            ));
        }

        Ok(Self { amount })
    }

    /// Returns the amount taken off.
    pub fn amount(&self) -> Money<'a, Currency> {
        self.amount
    }
}

impl DiscountStrategy for FixedAmountDiscount<'_> {
    fn kind(&self) -> DiscountKind {
        DiscountKind::FixedAmount
    }

    fn apply_exact(&self, price: &Money<'_, Currency>) -> Result<Decimal, DiscountError> {
        if self.amount.currency() != price.currency() {
            return Err(MoneyError::CurrencyMismatch {
                expected: price.currency().iso_alpha_code,
                actual: self.amount.currency().iso_alpha_code,
            }
            .into());
        }

        major_units(price)
            .checked_sub(major_units(&self.amount))
            .ok_or(DiscountError::Overflow)
    }
}
