//! Free Shipping Discount

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::discounts::{DiscountError, DiscountKind, DiscountStrategy};

/// Reduces any price to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreeShippingDiscount;

impl DiscountStrategy for FreeShippingDiscount {
    fn kind(&self) -> DiscountKind {
        DiscountKind::FreeShipping
    }

    fn apply_exact(&self, _price: &Money<'_, Currency>) -> Result<Decimal, DiscountError> {
        Ok(Decimal::ZERO)
    }
}
