//! Discount Policies
//!
//! A policy decides which discount a product gets at checkout. Keeping that
//! decision behind [`DiscountPolicy`] leaves the discount strategies
//! deterministic; randomness lives only in [`RandomDiscountPolicy`].

use rand::{Rng, seq::SliceRandom};
use rust_decimal::Decimal;
use smallvec::{SmallVec, smallvec};

use crate::{
    config::{ConfigError, DiscountRanges},
    discounts::{Discount, DiscountError, DiscountKind, from_major_units},
    factory::{DiscountFactory, DiscountParam},
    products::Product,
};

/// Chooses a discount for a product.
pub trait DiscountPolicy<'a> {
    /// Returns the discount to apply to `product`.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the discount cannot be constructed.
    fn choose(&mut self, product: &Product<'a>) -> Result<Discount<'a>, DiscountError>;
}

impl<'a, F> DiscountPolicy<'a> for F
where
    F: FnMut(&Product<'a>) -> Result<Discount<'a>, DiscountError>,
{
    fn choose(&mut self, product: &Product<'a>) -> Result<Discount<'a>, DiscountError> {
        self(product)
    }
}

/// Applies the same discount to every product.
#[derive(Debug, Clone, Copy)]
pub struct FixedDiscountPolicy<'a> {
    discount: Discount<'a>,
}

impl<'a> FixedDiscountPolicy<'a> {
    /// Create a policy that always returns `discount`.
    pub fn new(discount: Discount<'a>) -> Self {
        Self { discount }
    }
}

impl<'a> DiscountPolicy<'a> for FixedDiscountPolicy<'a> {
    fn choose(&mut self, _product: &Product<'a>) -> Result<Discount<'a>, DiscountError> {
        Ok(self.discount)
    }
}

/// Picks a discount kind uniformly at random and synthesises its parameters
/// from the configured ranges, building the discount through [`DiscountFactory`].
///
/// Decimal parameters are sampled in hundredths.
#[derive(Debug)]
pub struct RandomDiscountPolicy<R> {
    rng: R,
    factory: DiscountFactory,
    kinds: SmallVec<[DiscountKind; 5]>,
    percentage: (i64, i64),
    bogo_buy: (u32, u32),
    bogo_free: (u32, u32),
    fixed_amount: (i64, i64),
}

impl<R: Rng> RandomDiscountPolicy<R> {
    /// Create a new random policy.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a range is invalid or no usable kinds are configured.
    pub fn new(rng: R, ranges: &DiscountRanges) -> Result<Self, ConfigError> {
        Ok(Self {
            rng,
            factory: DiscountFactory::new(),
            kinds: ranges.kinds()?,
            percentage: ranges.percentage.hundredths(
                "discounts.percentage",
                Decimal::ZERO,
                Some(Decimal::ONE_HUNDRED),
            )?,
            bogo_buy: ranges.bogo_buy.bounds("discounts.bogo_buy", 1)?,
            bogo_free: ranges.bogo_free.bounds("discounts.bogo_free", 0)?,
            fixed_amount: ranges
                .fixed_amount
                .hundredths("discounts.fixed_amount", Decimal::ZERO, None)?,
        })
    }

    fn params<'a>(
        &mut self,
        kind: DiscountKind,
        product: &Product<'a>,
    ) -> Result<SmallVec<[DiscountParam<'a>; 2]>, DiscountError> {
        let params = match kind {
            DiscountKind::Percentage => {
                let (min, max) = self.percentage;

                smallvec![Decimal::new(self.rng.gen_range(min..=max), 2).into()]
            }
            DiscountKind::Bogo => {
                let (buy_min, buy_max) = self.bogo_buy;
                let (free_min, free_max) = self.bogo_free;

                smallvec![
                    i64::from(self.rng.gen_range(buy_min..=buy_max)).into(),
                    i64::from(self.rng.gen_range(free_min..=free_max)).into(),
                ]
            }
            DiscountKind::FixedAmount => {
                let (min, max) = self.fixed_amount;
                let amount = Decimal::new(self.rng.gen_range(min..=max), 2);

                smallvec![from_major_units(amount, product.price.currency())?.into()]
            }
            DiscountKind::FreeShipping | DiscountKind::Btgof => SmallVec::new(),
        };

        Ok(params)
    }
}

impl<'a, R: Rng> DiscountPolicy<'a> for RandomDiscountPolicy<R> {
    fn choose(&mut self, product: &Product<'a>) -> Result<Discount<'a>, DiscountError> {
        let kind = self
            .kinds
            .choose(&mut self.rng)
            .copied()
            .ok_or(DiscountError::NoDiscountKinds)?;

        let params = self.params(kind, product)?;

        self.factory.create(kind, &params)
    }
}
