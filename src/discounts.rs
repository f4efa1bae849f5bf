//! Discounts
//!
//! The discount strategy layer. Each [`DiscountKind`] has a strategy type that
//! validates its own parameters on construction and maps an original price to
//! a discounted price. [`Discount`] is the tagged union over all of them.

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

pub mod bogo;
pub mod btgof;
pub mod fixed_amount;
pub mod free_shipping;
pub mod percentage;

pub use self::{
    bogo::BogoDiscount, btgof::BuyTwoGetOneFreeDiscount, fixed_amount::FixedAmountDiscount,
    free_shipping::FreeShippingDiscount, percentage::PercentageDiscount,
};

/// Errors specific to discount construction and calculation.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// The requested discount kind is not one of the supported kinds.
    #[error("invalid discount kind: {0:?}")]
    InvalidDiscountKind(String),

    /// The parameters supplied do not match what the discount kind requires.
    #[error("invalid parameters for {kind} discount: {reason}")]
    InvalidParameters {
        /// Kind being constructed
        kind: DiscountKind,

        /// Human readable explanation
        reason: String,
    },

    /// A random choice was requested from an empty set of discount kinds.
    #[error("no discount kinds to choose from")]
    NoDiscountKinds,

    /// Decimal arithmetic overflowed or could not be represented in minor units.
    #[error("discount arithmetic overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl DiscountError {
    pub(crate) fn invalid(kind: DiscountKind, reason: impl Into<String>) -> Self {
        DiscountError::InvalidParameters {
            kind,
            reason: reason.into(),
        }
    }
}

/// The closed set of supported discount kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountKind {
    /// Percentage off the price.
    Percentage,

    /// Buy some, get some free.
    Bogo,

    /// Fixed amount off the price.
    FixedAmount,

    /// Price reduced to zero.
    FreeShipping,

    /// Buy two, get one free (one third off).
    Btgof,
}

impl DiscountKind {
    /// Every discount kind, in declaration order.
    pub const ALL: [DiscountKind; 5] = [
        DiscountKind::Percentage,
        DiscountKind::Bogo,
        DiscountKind::FixedAmount,
        DiscountKind::FreeShipping,
        DiscountKind::Btgof,
    ];

    /// Canonical snake case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            DiscountKind::Percentage => "percentage",
            DiscountKind::Bogo => "bogo",
            DiscountKind::FixedAmount => "fixed_amount",
            DiscountKind::FreeShipping => "free_shipping",
            DiscountKind::Btgof => "btgof",
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiscountKind {
    type Err = DiscountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace('-', "_");

        DiscountKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalised)
            .ok_or_else(|| DiscountError::InvalidDiscountKind(s.to_string()))
    }
}

/// A discount calculation, polymorphic over kind.
pub trait DiscountStrategy {
    /// The kind of discount this strategy implements.
    fn kind(&self) -> DiscountKind;

    /// Calculates the discounted price in major units, without rounding.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the arithmetic overflows or the
    /// discount and price currencies differ.
    fn apply_exact(&self, price: &Money<'_, Currency>) -> Result<Decimal, DiscountError>;

    /// Calculates the discounted price for the given original price, rounded
    /// to the currency's minor unit (midpoint away from zero).
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the arithmetic overflows or the
    /// discount and price currencies differ.
    fn apply<'a>(&self, price: Money<'a, Currency>) -> Result<Money<'a, Currency>, DiscountError> {
        from_major_units(self.apply_exact(&price)?, price.currency())
    }
}

/// Represents a single, valid discount decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Discount<'a> {
    /// Percentage off the price.
    Percentage(PercentageDiscount),

    /// Buy some, get some free.
    Bogo(BogoDiscount),

    /// Fixed amount off the price.
    FixedAmount(FixedAmountDiscount<'a>),

    /// Free shipping; the price becomes zero.
    FreeShipping(FreeShippingDiscount),

    /// Buy two, get one free.
    Btgof(BuyTwoGetOneFreeDiscount),
}

impl<'a> Discount<'a> {
    /// Creates a percentage discount.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidParameters`] if `rate` is outside `0..=100`.
    pub fn percentage(rate: Decimal) -> Result<Self, DiscountError> {
        Ok(Discount::Percentage(PercentageDiscount::new(rate)?))
    }

    /// Creates a buy-`buy`-get-`free` discount.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidParameters`] if `buy` is zero.
    pub fn bogo(buy: u32, free: u32) -> Result<Self, DiscountError> {
        Ok(Discount::Bogo(BogoDiscount::new(buy, free)?))
    }

    /// Creates a fixed amount discount.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidParameters`] if `amount` is negative.
    pub fn fixed_amount(amount: Money<'a, Currency>) -> Result<Self, DiscountError> {
        Ok(Discount::FixedAmount(FixedAmountDiscount::new(amount)?))
    }

    /// Creates a free shipping discount.
    pub fn free_shipping() -> Self {
        Discount::FreeShipping(FreeShippingDiscount)
    }

    /// Creates a buy two get one free discount.
    pub fn btgof() -> Self {
        Discount::Btgof(BuyTwoGetOneFreeDiscount)
    }
}

impl DiscountStrategy for Discount<'_> {
    fn kind(&self) -> DiscountKind {
        match self {
            Discount::Percentage(d) => d.kind(),
            Discount::Bogo(d) => d.kind(),
            Discount::FixedAmount(d) => d.kind(),
            Discount::FreeShipping(d) => d.kind(),
            Discount::Btgof(d) => d.kind(),
        }
    }

    fn apply_exact(&self, price: &Money<'_, Currency>) -> Result<Decimal, DiscountError> {
        match self {
            Discount::Percentage(d) => d.apply_exact(price),
            Discount::Bogo(d) => d.apply_exact(price),
            Discount::FixedAmount(d) => d.apply_exact(price),
            Discount::FreeShipping(d) => d.apply_exact(price),
            Discount::Btgof(d) => d.apply_exact(price),
        }
    }
}

impl fmt::Display for Discount<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discount::Percentage(d) => write!(f, "{}% off", d.rate().normalize()),
            Discount::Bogo(d) => write!(f, "Buy {}, get {} free", d.buy(), d.free()),
            Discount::FixedAmount(d) => write!(f, "{} off", d.amount()),
            Discount::FreeShipping(_) => f.write_str("Free shipping"),
            Discount::Btgof(_) => f.write_str("Buy 2 get 1 free"),
        }
    }
}

/// Returns the price as a decimal amount of major units (e.g. pounds, not pence).
pub(crate) fn major_units(price: &Money<'_, Currency>) -> Decimal {
    Decimal::new(price.to_minor_units(), price.currency().exponent)
}

/// Rounds a major unit amount to the currency's minor unit and wraps it as money.
pub(crate) fn from_major_units(
    amount: Decimal,
    currency: &Currency,
) -> Result<Money<'_, Currency>, DiscountError> {
    let mut rounded =
        amount.round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(currency.exponent);

    let minor = i64::try_from(rounded.mantissa()).map_err(|_err| DiscountError::Overflow)?;

    Ok(Money::from_minor(minor, currency))
}
