//! Data Generator
//!
//! Seeded fake data for the checkout simulation.

use rand::{Rng, seq::SliceRandom};
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use slotmap::SlotMap;

use crate::{
    config::{ConfigError, DecimalRange},
    customers::Customer,
    discounts::from_major_units,
    products::{Catalog, Product},
};

const ADJECTIVES: &[&str] = &[
    "Awesome",
    "Elegant",
    "Ergonomic",
    "Fantastic",
    "Generic",
    "Gorgeous",
    "Handcrafted",
    "Incredible",
    "Intelligent",
    "Practical",
    "Refined",
    "Rustic",
    "Sleek",
    "Small",
    "Tasty",
    "Unbranded",
];

const MATERIALS: &[&str] = &[
    "Bamboo", "Bronze", "Concrete", "Cotton", "Fresh", "Frozen", "Granite", "Leather", "Metal",
    "Plastic", "Rubber", "Silk", "Soft", "Steel", "Wooden",
];

const NOUNS: &[&str] = &[
    "Bacon", "Ball", "Bike", "Car", "Chair", "Cheese", "Chicken", "Chips", "Computer", "Fish",
    "Gloves", "Hat", "Keyboard", "Mouse", "Pants", "Pizza", "Salad", "Sausages", "Shirt", "Shoes",
    "Soap", "Table", "Towels",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Amara", "Barbara", "Chen", "Dara", "Edsger", "Fatima", "Grace", "Hedy",
    "Ines", "John", "Katherine", "Linus", "Margaret", "Niklaus", "Olu", "Priya", "Radia", "Tim",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Baptiste", "Carter", "Dubois", "Evans", "Fischer", "Garcia", "Hopper", "Ito",
    "Johnson", "Kowalski", "Lovelace", "Moreau", "Nakamura", "Okafor", "Perlman", "Quinn",
    "Ritchie", "Silva", "Turing",
];

fn pick<R: Rng + ?Sized>(rng: &mut R, words: &'static [&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

/// Returns a product name such as "Rustic Steel Chair".
pub fn product_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(rng, ADJECTIVES),
        pick(rng, MATERIALS),
        pick(rng, NOUNS)
    )
}

/// Returns a first and last name.
pub fn customer_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

/// Generates `count` products priced within `price`.
///
/// Prices are sampled in hundredths of a major unit, then rounded to the
/// currency's minor unit.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the price range is invalid.
pub fn products<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    price: &DecimalRange,
    currency: &'static Currency,
) -> Result<Catalog<'static>, ConfigError> {
    let (min, max) = price.hundredths("price", Decimal::new(1, 2), None)?;
    let mut catalog = SlotMap::with_capacity_and_key(count);

    for _ in 0..count {
        let amount = Decimal::new(rng.gen_range(min..=max), 2);

        catalog.insert(Product::new(
            product_name(rng),
            from_major_units(amount, currency)?,
        ));
    }

    Ok(catalog)
}

/// Generates `count` customers.
pub fn customers<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Customer> {
    (0..count).map(|_| Customer::new(customer_name(rng))).collect()
}
