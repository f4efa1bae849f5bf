//! Integration tests for the checkout simulation.
//!
//! Runs the full pipeline (config, generated catalog, random or fixed discount
//! policy, invoice) and checks the invoice arithmetic end to end.

use std::path::PathBuf;

use rand::{SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use testresult::TestResult;

use caisse::{pricing::total_price, prelude::*};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("config")
        .join(format!("{name}.yml"))
}

fn run_seeded(config: &SimulationConfig, seed: u64) -> TestResult<Vec<Invoice<'static>>> {
    let mut simulation = Simulation::new(config, StdRng::seed_from_u64(seed))?;
    let mut policy = RandomDiscountPolicy::new(
        StdRng::seed_from_u64(seed.wrapping_add(1)),
        &config.discounts,
    )?;

    Ok(simulation.run(&mut policy)?)
}

#[test]
fn default_fixture_matches_built_in_defaults() -> TestResult {
    let config = SimulationConfig::from_path(fixture("default"))?;

    assert_eq!(config, SimulationConfig::default());

    Ok(())
}

#[test]
fn same_seed_produces_same_invoices() -> TestResult {
    let config = SimulationConfig::default();

    let first = run_seeded(&config, 1234)?;
    let second = run_seeded(&config, 1234)?;

    assert_eq!(first.len(), config.customers);
    assert_eq!(first.len(), second.len());

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.customer(), b.customer());
        assert_eq!(a.lines(), b.lines());
        assert_eq!(a.total(), b.total());
    }

    Ok(())
}

#[test]
fn invoice_totals_add_up() -> TestResult {
    let config = SimulationConfig::default();

    for invoice in run_seeded(&config, 99)? {
        let currency = invoice.currency();

        let line_totals =
            total_price(invoice.lines().iter().map(|line| line.line_total), currency)?;
        let full_prices = invoice
            .lines()
            .iter()
            .map(PricedLine::full_price_total)
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(invoice.total(), line_totals);
        assert_eq!(invoice.subtotal(), total_price(full_prices, currency)?);
        assert_eq!(invoice.savings()?, invoice.subtotal().sub(invoice.total())?);

        for line in invoice.lines() {
            assert_eq!(
                line.discounted_price,
                line.discount.apply(line.unit_price)?,
                "discounted price does not match {}",
                line.discount
            );
        }
    }

    Ok(())
}

#[test]
fn percentage_only_fixture_discounts_every_line() -> TestResult {
    let config = SimulationConfig::from_path(fixture("percentage_only"))?;

    assert_eq!(config.currency()?, iso::EUR);

    for invoice in run_seeded(&config, 7)? {
        assert_eq!(invoice.lines().len(), config.products);

        for line in invoice.lines() {
            let Discount::Percentage(discount) = line.discount else {
                return Err(format!("unexpected discount {}", line.discount).into());
            };

            assert!(
                (Decimal::from(10)..=Decimal::from(25)).contains(&discount.rate()),
                "rate {} out of range",
                discount.rate()
            );
            assert!(line.discounted_price.to_minor_units() < line.unit_price.to_minor_units());
        }

        assert!(invoice.total().to_minor_units() < invoice.subtotal().to_minor_units());
    }

    Ok(())
}

#[test]
fn free_shipping_for_everything_totals_zero() -> TestResult {
    let mut simulation = Simulation::new(&SimulationConfig::default(), StdRng::seed_from_u64(5))?;
    let mut policy = FixedDiscountPolicy::new(Discount::free_shipping());

    for invoice in simulation.run(&mut policy)? {
        assert_eq!(invoice.total(), Money::from_minor(0, iso::GBP));
        assert_eq!(invoice.savings()?, invoice.subtotal());
    }

    Ok(())
}

#[test]
fn zero_percent_leaves_totals_unchanged() -> TestResult {
    let mut simulation = Simulation::new(&SimulationConfig::default(), StdRng::seed_from_u64(6))?;
    let mut policy = FixedDiscountPolicy::new(Discount::percentage(Decimal::ZERO)?);

    for invoice in simulation.run(&mut policy)? {
        assert_eq!(invoice.total(), invoice.subtotal());
        assert_eq!(invoice.savings()?, Money::from_minor(0, iso::GBP));
    }

    Ok(())
}

#[test]
fn closure_policy_can_vary_by_product() -> TestResult {
    let mut simulation = Simulation::new(&SimulationConfig::default(), StdRng::seed_from_u64(8))?;

    let mut policy = |product: &Product<'static>| {
        if product.price.to_minor_units() >= 50_00 {
            Discount::percentage(Decimal::from(10))
        } else {
            Ok(Discount::btgof())
        }
    };

    for invoice in simulation.run(&mut policy)? {
        for line in invoice.lines() {
            let expected = if line.unit_price.to_minor_units() >= 50_00 {
                DiscountKind::Percentage
            } else {
                DiscountKind::Btgof
            };

            assert_eq!(line.discount.kind(), expected);
        }
    }

    Ok(())
}

#[test]
fn invoices_render_for_every_customer() -> TestResult {
    let config = SimulationConfig {
        customers: 2,
        ..SimulationConfig::default()
    };

    let mut simulation = Simulation::new(&config, StdRng::seed_from_u64(10))?;
    let mut policy = RandomDiscountPolicy::new(StdRng::seed_from_u64(11), &config.discounts)?;

    let mut out = Vec::new();

    for invoice in simulation.run(&mut policy)? {
        invoice.write_to(&mut out, simulation.catalog())?;
    }

    let output = String::from_utf8(out)?;

    for customer in simulation.customers() {
        assert!(output.contains(&customer.name), "missing {}", customer.name);
    }

    assert_eq!(output.matches("Subtotal:").count(), 2);

    Ok(())
}
