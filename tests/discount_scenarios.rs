//! Integration tests for the five discount kinds built through the factory.
//!
//! Each scenario creates a discount by name, the way a caller holding untyped
//! parameters would, and applies it to a single price:
//!
//! - `percentage` 20 on £100.00 -> £80.00
//! - `bogo` buy 1 free 1 on £50.00 -> £625.00 (the price is read as a unit count)
//! - `fixed_amount` £10.00 on £100.00 -> £90.00
//! - `free_shipping` on £100.00 -> £0.00
//! - `btgof` on £150.00 -> £100.00

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{GBP, USD},
};
use testresult::TestResult;

use caisse::prelude::*;

fn gbp(minor: i64) -> Money<'static, rusty_money::iso::Currency> {
    Money::from_minor(minor, GBP)
}

#[test]
fn percentage_scenario() -> TestResult {
    let discount = DiscountFactory::new().create_named("percentage", &[Decimal::from(20).into()])?;

    assert_eq!(discount.kind(), DiscountKind::Percentage);
    assert_eq!(discount.apply(gbp(100_00))?, gbp(80_00));

    Ok(())
}

#[test]
fn bogo_scenario() -> TestResult {
    let discount = DiscountFactory::new().create_named("bogo", &[1_i64.into(), 1_i64.into()])?;

    assert_eq!(discount.kind(), DiscountKind::Bogo);
    assert_eq!(discount.apply(gbp(50_00))?, gbp(625_00));

    Ok(())
}

#[test]
fn fixed_amount_scenario() -> TestResult {
    let discount = DiscountFactory::new().create_named("fixed_amount", &[gbp(10_00).into()])?;

    assert_eq!(discount.kind(), DiscountKind::FixedAmount);
    assert_eq!(discount.apply(gbp(100_00))?, gbp(90_00));

    Ok(())
}

#[test]
fn free_shipping_scenario() -> TestResult {
    let discount = DiscountFactory::new().create_named("free_shipping", &[])?;

    assert_eq!(discount.kind(), DiscountKind::FreeShipping);
    assert_eq!(discount.apply(gbp(100_00))?, gbp(0));

    Ok(())
}

#[test]
fn btgof_scenario() -> TestResult {
    let discount = DiscountFactory::new().create_named("btgof", &[])?;

    assert_eq!(discount.kind(), DiscountKind::Btgof);
    assert_eq!(discount.apply(gbp(150_00))?, gbp(100_00));

    Ok(())
}

#[test]
fn fixed_amount_below_zero_is_not_clamped() -> TestResult {
    let discount = Discount::fixed_amount(gbp(10_00))?;

    assert_eq!(discount.apply(gbp(4_00))?, gbp(-6_00));

    Ok(())
}

#[test]
fn fixed_amount_in_another_currency_fails() -> TestResult {
    let discount = Discount::fixed_amount(Money::from_minor(1_00, USD))?;

    assert!(matches!(
        discount.apply(gbp(4_00)),
        Err(DiscountError::Money(rusty_money::MoneyError::CurrencyMismatch { .. }))
    ));

    Ok(())
}

#[test]
fn unknown_kind_fails_with_invalid_discount_kind() {
    assert_eq!(
        DiscountFactory::new().create_named("loyalty", &[]),
        Err(DiscountError::InvalidDiscountKind("loyalty".to_string()))
    );
}

#[test]
fn missing_parameters_fail_with_invalid_parameters() {
    let factory = DiscountFactory::new();

    for kind in [
        DiscountKind::Percentage,
        DiscountKind::Bogo,
        DiscountKind::FixedAmount,
    ] {
        assert!(
            matches!(
                factory.create(kind, &[]),
                Err(DiscountError::InvalidParameters { kind: found, .. }) if found == kind
            ),
            "{kind} accepted no parameters"
        );
    }
}

#[test]
fn out_of_range_parameters_fail_with_invalid_parameters() {
    let factory = DiscountFactory::new();

    let cases: [(DiscountKind, Vec<DiscountParam<'static>>); 4] = [
        (DiscountKind::Percentage, vec![Decimal::from(-5).into()]),
        (DiscountKind::Percentage, vec![Decimal::from(101).into()]),
        (DiscountKind::Bogo, vec![0_i64.into(), 2_i64.into()]),
        (DiscountKind::FixedAmount, vec![gbp(-1).into()]),
    ];

    for (kind, params) in cases {
        assert!(
            matches!(
                factory.create(kind, &params),
                Err(DiscountError::InvalidParameters { .. })
            ),
            "{kind} accepted {params:?}"
        );
    }
}

#[test]
fn discounts_display_their_terms() -> TestResult {
    assert_eq!(Discount::percentage(Decimal::new(125, 1))?.to_string(), "12.5% off");
    assert_eq!(Discount::bogo(3, 1)?.to_string(), "Buy 3, get 1 free");
    assert_eq!(Discount::fixed_amount(gbp(2_50))?.to_string(), "£2.50 off");
    assert_eq!(Discount::free_shipping().to_string(), "Free shipping");
    assert_eq!(Discount::btgof().to_string(), "Buy 2 get 1 free");

    Ok(())
}
