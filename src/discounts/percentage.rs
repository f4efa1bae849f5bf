//! Percentage Discount

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::discounts::{DiscountError, DiscountKind, DiscountStrategy, major_units};

/// Takes `rate` percent off the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentageDiscount {
    rate: Decimal,
}

impl PercentageDiscount {
    /// Creates a new percentage discount. `rate` is in percent points (`20` is 20%).
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidParameters`] if `rate` is outside `0..=100`.
    pub fn new(rate: Decimal) -> Result<Self, DiscountError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(DiscountError::invalid(
                DiscountKind::Percentage,
                format!("rate must be between 0 and 100, got {rate}"),
            ));
        }

        Ok(Self { rate })
    }

    /// Returns the rate in percent points.
    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

impl DiscountStrategy for PercentageDiscount {
    fn kind(&self) -> DiscountKind {
        DiscountKind::Percentage
    }

    fn apply_exact(&self, price: &Money<'_, Currency>) -> Result<Decimal, DiscountError> {
        let amount = major_units(price);

        let fraction = self
            .rate
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or(DiscountError::Overflow)?;

        let reduction = amount
            .checked_mul(fraction)
            .ok_or(DiscountError::Overflow)?;

        amount
            .checked_sub(reduction)
            .ok_or(DiscountError::Overflow)
    }
}
