//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::Cart,
    discounts::{Discount, DiscountError, DiscountStrategy},
    policy::DiscountPolicy,
    products::{Catalog, ProductKey},
};

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A cart line refers to a product missing from the catalog.
    #[error("Product {0:?} is not in the catalog")]
    UnknownProduct(ProductKey),

    /// Multiplying a price by its quantity overflowed.
    #[error("Line total overflowed")]
    Overflow,

    /// The discount could not be chosen or applied.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A cart line after its discount has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedLine<'a> {
    /// Product purchased
    pub product: ProductKey,

    /// Units purchased
    pub quantity: u32,

    /// Catalog price of one unit
    pub unit_price: Money<'a, Currency>,

    /// Discount chosen for the line
    pub discount: Discount<'a>,

    /// Price of one unit after the discount
    pub discounted_price: Money<'a, Currency>,

    /// Discounted price multiplied by quantity
    pub line_total: Money<'a, Currency>,
}

impl<'a> PricedLine<'a> {
    /// Undiscounted unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the multiplication overflows.
    pub fn full_price_total(&self) -> Result<Money<'a, Currency>, PricingError> {
        line_total(self.unit_price, self.quantity)
    }
}

/// Multiplies a unit price by a quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the result does not fit in minor units.
pub fn line_total(
    unit_price: Money<'_, Currency>,
    quantity: u32,
) -> Result<Money<'_, Currency>, PricingError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Sums a list of amounts, starting from zero in `currency`.
///
/// # Errors
///
/// Returns a [`MoneyError`] if any amount is in a different currency.
pub fn total_price<'a>(
    amounts: impl IntoIterator<Item = Money<'a, Currency>>,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, MoneyError> {
    amounts
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, amount| acc.add(amount))
}

/// Prices every line of the cart, asking `policy` for each product's discount.
///
/// # Errors
///
/// Returns a [`PricingError`] if a product is missing, the policy cannot
/// produce a discount, or the discount arithmetic fails.
pub fn price_cart<'a, P>(
    cart: &Cart,
    catalog: &Catalog<'a>,
    policy: &mut P,
) -> Result<SmallVec<[PricedLine<'a>; 10]>, PricingError>
where
    P: DiscountPolicy<'a> + ?Sized,
{
    cart.iter()
        .map(|line| -> Result<PricedLine<'a>, PricingError> {
            let product = catalog
                .get(line.product())
                .ok_or(PricingError::UnknownProduct(line.product()))?;

            let discount = policy.choose(product)?;
            let discounted_price = discount.apply(product.price)?;
            let total = line_total(discounted_price, line.quantity())?;

            debug!(
                product = %product.name,
                quantity = line.quantity(),
                discount = %discount,
                unit_price = %product.price,
                discounted_price = %discounted_price,
                "applied discount"
            );

            Ok(PricedLine {
                product: line.product(),
                quantity: line.quantity(),
                unit_price: product.price,
                discount,
                discounted_price,
                line_total: total,
            })
        })
        .collect()
}
