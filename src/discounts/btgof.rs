//! Buy Two Get One Free Discount
//!
//! Modelled as a flat one third off the price, with no quantity parameters.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::discounts::{DiscountError, DiscountKind, DiscountStrategy, major_units};

/// Takes a third off the price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuyTwoGetOneFreeDiscount;

impl DiscountStrategy for BuyTwoGetOneFreeDiscount {
    fn kind(&self) -> DiscountKind {
        DiscountKind::Btgof
    }

    fn apply_exact(&self, price: &Money<'_, Currency>) -> Result<Decimal, DiscountError> {
        let amount = major_units(price);

        let third = amount
            .checked_div(Decimal::from(3))
            .ok_or(DiscountError::Overflow)?;

        amount.checked_sub(third).ok_or(DiscountError::Overflow)
    }
}
