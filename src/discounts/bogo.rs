//! Buy One Get One Discount
//!
//! The calculation divides the *price* by `buy + free` as though it were a
//! unit count, then scales by the price again. For a price of 50 with a
//! buy 1 get 1 offer that yields 625. This is the established checkout
//! behaviour and is kept as is.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::discounts::{DiscountError, DiscountKind, DiscountStrategy, major_units};

/// Buy `buy`, get `free` free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BogoDiscount {
    buy: u32,
    free: u32,
}

impl BogoDiscount {
    /// Creates a new buy/free discount.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidParameters`] if `buy` is zero.
    pub fn new(buy: u32, free: u32) -> Result<Self, DiscountError> {
        if buy == 0 {
            return Err(DiscountError::invalid(
                DiscountKind::Bogo,
                "buy quantity must be greater than zero",
            ));
        }

        Ok(Self { buy, free })
    }

    /// Quantity the customer pays for.
    pub fn buy(self) -> u32 {
        self.buy
    }

    /// Quantity the customer gets for free.
    pub fn free(self) -> u32 {
        self.free
    }
}

impl DiscountStrategy for BogoDiscount {
    fn kind(&self) -> DiscountKind {
        DiscountKind::Bogo
    }

    fn apply_exact(&self, price: &Money<'_, Currency>) -> Result<Decimal, DiscountError> {
        let amount = major_units(price);

        // `buy` is at least 1, so the divisor is never zero.
        let total = Decimal::from(u64::from(self.buy) + u64::from(self.free));

        let units = amount
            .checked_div(total)
            .ok_or(DiscountError::Overflow)?
            .floor();

        units
            .checked_mul(Decimal::from(self.buy))
            .and_then(|paid| paid.checked_mul(amount))
            .and_then(|scaled| scaled.checked_div(total))
            .ok_or(DiscountError::Overflow)
    }
}
