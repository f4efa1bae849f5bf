//! Caisse
//!
//! Caisse is a checkout simulation built around a pluggable discount strategy layer.
//! Discounts are created by kind through a factory, chosen per product by a policy and
//! applied to catalog prices to produce customer invoices.

pub mod cart;
pub mod config;
pub mod customers;
pub mod discounts;
pub mod factory;
pub mod generator;
pub mod invoice;
pub mod policy;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod simulation;
pub mod utils;
