//! Discount Factory
//!
//! Builds a [`Discount`] from a kind and an ordered list of loosely typed
//! parameters, checking the count and type of each parameter for that kind.

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::discounts::{Discount, DiscountError, DiscountKind};

/// A single loosely typed discount parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscountParam<'a> {
    /// A decimal value, such as a percentage rate.
    Decimal(Decimal),

    /// A whole quantity, such as a buy or free count.
    Quantity(i64),

    /// A monetary amount.
    Money(Money<'a, Currency>),
}

impl DiscountParam<'_> {
    fn type_name(&self) -> &'static str {
        match self {
            DiscountParam::Decimal(_) => "decimal",
            DiscountParam::Quantity(_) => "quantity",
            DiscountParam::Money(_) => "money",
        }
    }
}

impl From<Decimal> for DiscountParam<'_> {
    fn from(value: Decimal) -> Self {
        DiscountParam::Decimal(value)
    }
}

impl From<i64> for DiscountParam<'_> {
    fn from(value: i64) -> Self {
        DiscountParam::Quantity(value)
    }
}

impl<'a> From<Money<'a, Currency>> for DiscountParam<'a> {
    fn from(value: Money<'a, Currency>) -> Self {
        DiscountParam::Money(value)
    }
}

/// Constructs discounts from a kind and its parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscountFactory;

impl DiscountFactory {
    /// Create a new factory.
    pub fn new() -> Self {
        Self
    }

    /// Creates the discount for `kind` from `params`.
    ///
    /// | Kind            | Parameters               |
    /// |-----------------|--------------------------|
    /// | `percentage`    | `[Decimal]` (rate)       |
    /// | `bogo`          | `[Quantity, Quantity]`   |
    /// | `fixed_amount`  | `[Money]`                |
    /// | `free_shipping` | none                     |
    /// | `btgof`         | none                     |
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidParameters`] if the number or type of
    /// parameters does not match the kind, or a value is out of range.
    pub fn create<'a>(
        &self,
        kind: DiscountKind,
        params: &[DiscountParam<'a>],
    ) -> Result<Discount<'a>, DiscountError> {
        match (kind, params) {
            (DiscountKind::Percentage, [DiscountParam::Decimal(rate)]) => {
                Discount::percentage(*rate)
            }
            (DiscountKind::Bogo, [DiscountParam::Quantity(buy), DiscountParam::Quantity(free)]) => {
                Discount::bogo(quantity(kind, "buy", *buy)?, quantity(kind, "free", *free)?)
            }
            (DiscountKind::FixedAmount, [DiscountParam::Money(amount)]) => {
                Discount::fixed_amount(*amount)
            }
            (DiscountKind::FreeShipping, []) => Ok(Discount::free_shipping()),
            (DiscountKind::Btgof, []) => Ok(Discount::btgof()),
            (kind, params) => Err(DiscountError::invalid(
                kind,
                format!(
                    "expected {}, got {}",
                    expected_params(kind),
                    ParamTypes(params)
                ),
            )),
        }
    }

    /// Parses `name` as a [`DiscountKind`] and creates the discount from `params`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidDiscountKind`] if `name` is not a known
    /// kind, otherwise the same errors as [`DiscountFactory::create`].
    pub fn create_named<'a>(
        &self,
        name: &str,
        params: &[DiscountParam<'a>],
    ) -> Result<Discount<'a>, DiscountError> {
        self.create(name.parse()?, params)
    }
}

fn quantity(kind: DiscountKind, field: &str, value: i64) -> Result<u32, DiscountError> {
    u32::try_from(value).map_err(|_err| {
        DiscountError::invalid(
            kind,
            format!("{field} quantity must be between 0 and {}, got {value}", u32::MAX),
        )
    })
}

fn expected_params(kind: DiscountKind) -> &'static str {
    match kind {
        DiscountKind::Percentage => "[decimal]",
        DiscountKind::Bogo => "[quantity, quantity]",
        DiscountKind::FixedAmount => "[money]",
        DiscountKind::FreeShipping | DiscountKind::Btgof => "[]",
    }
}

/// Formats the parameter types as `[decimal, money]`.
struct ParamTypes<'p, 'a>(&'p [DiscountParam<'a>]);

impl fmt::Display for ParamTypes<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;

        for (idx, param) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }

            f.write_str(param.type_name())?;
        }

        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::discounts::DiscountStrategy;

    use super::*;

    #[test]
    fn creates_every_kind_from_matching_params() -> TestResult {
        let factory = DiscountFactory::new();
        let amount = Money::from_minor(10_00, GBP);

        assert_eq!(
            factory.create(DiscountKind::Percentage, &[Decimal::from(20).into()])?,
            Discount::percentage(Decimal::from(20))?
        );
        assert_eq!(
            factory.create(DiscountKind::Bogo, &[1_i64.into(), 1_i64.into()])?,
            Discount::bogo(1, 1)?
        );
        assert_eq!(
            factory.create(DiscountKind::FixedAmount, &[amount.into()])?,
            Discount::fixed_amount(amount)?
        );
        assert_eq!(
            factory.create(DiscountKind::FreeShipping, &[])?,
            Discount::free_shipping()
        );
        assert_eq!(factory.create(DiscountKind::Btgof, &[])?, Discount::btgof());

        Ok(())
    }

    #[test]
    fn created_discount_applies_its_formula() -> TestResult {
        let discount =
            DiscountFactory::new().create(DiscountKind::Bogo, &[1_i64.into(), 1_i64.into()])?;

        assert_eq!(
            discount.apply(Money::from_minor(50_00, GBP))?,
            Money::from_minor(625_00, GBP)
        );

        Ok(())
    }

    #[test]
    fn missing_params_are_rejected() {
        let result = DiscountFactory::new().create(DiscountKind::Percentage, &[]);

        assert_eq!(
            result,
            Err(DiscountError::InvalidParameters {
                kind: DiscountKind::Percentage,
                reason: "expected [decimal], got []".to_string(),
            })
        );
    }

    #[test]
    fn wrong_param_types_are_rejected() {
        let result = DiscountFactory::new().create(
            DiscountKind::Bogo,
            &[1_i64.into(), Decimal::ONE.into()],
        );

        assert_eq!(
            result,
            Err(DiscountError::InvalidParameters {
                kind: DiscountKind::Bogo,
                reason: "expected [quantity, quantity], got [quantity, decimal]".to_string(),
            })
        );
    }

    #[test]
    fn extra_params_are_rejected_for_parameterless_kinds() {
        for kind in [DiscountKind::FreeShipping, DiscountKind::Btgof] {
            assert!(matches!(
                DiscountFactory::new().create(kind, &[1_i64.into()]),
                Err(DiscountError::InvalidParameters { .. })
            ));
        }
    }

    #[test]
    fn negative_quantities_are_rejected() {
        let result =
            DiscountFactory::new().create(DiscountKind::Bogo, &[1_i64.into(), (-1_i64).into()]);

        assert!(matches!(
            result,
            Err(DiscountError::InvalidParameters {
                kind: DiscountKind::Bogo,
                ..
            })
        ));
    }

    #[test]
    fn out_of_range_values_surface_constructor_errors() {
        let factory = DiscountFactory::new();

        assert!(matches!(
            factory.create(DiscountKind::Percentage, &[Decimal::from(150).into()]),
            Err(DiscountError::InvalidParameters { .. })
        ));
        assert!(matches!(
            factory.create(DiscountKind::Bogo, &[0_i64.into(), 1_i64.into()]),
            Err(DiscountError::InvalidParameters { .. })
        ));
        assert!(matches!(
            factory.create(
                DiscountKind::FixedAmount,
                &[Money::from_minor(-1_00, GBP).into()]
            ),
            Err(DiscountError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn create_named_parses_the_kind() -> TestResult {
        let discount = DiscountFactory::new().create_named("free-shipping", &[])?;

        assert_eq!(discount, Discount::free_shipping());

        Ok(())
    }

    #[test]
    fn create_named_rejects_unknown_kinds() {
        assert_eq!(
            DiscountFactory::new().create_named("clearance", &[]),
            Err(DiscountError::InvalidDiscountKind("clearance".to_string()))
        );
    }
}
