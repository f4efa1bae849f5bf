//! Checkout Simulation
//!
//! Generates a catalog and a set of customers, then checks each customer out
//! with a cart holding every product at a random quantity.

use rand::Rng;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::info;

use crate::{
    cart::{Cart, CartError},
    config::{ConfigError, QuantityRange, SimulationConfig},
    customers::Customer,
    generator,
    invoice::{Invoice, InvoiceError},
    policy::DiscountPolicy,
    pricing::{PricingError, price_cart},
    products::Catalog,
};

/// Errors that can occur while running the simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Invalid simulation settings.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A cart could not be filled.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A cart could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// An invoice could not be built.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),
}

/// Simulation
#[derive(Debug)]
pub struct Simulation<R> {
    catalog: Catalog<'static>,
    customers: Vec<Customer>,
    quantity: (u32, u32),
    currency: &'static Currency,
    rng: R,
}

impl<R: Rng> Simulation<R> {
    /// Generate a catalog and customers from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] if the config is invalid.
    pub fn new(config: &SimulationConfig, mut rng: R) -> Result<Self, SimulationError> {
        config.validate()?;

        let currency = config.currency()?;
        let catalog = generator::products(&mut rng, config.products, &config.price, currency)?;
        let customers = generator::customers(&mut rng, config.customers);

        Self::with_catalog(catalog, customers, config.quantity, currency, rng)
    }

    /// Run against an existing catalog and customer list.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] if the quantity range is invalid.
    pub fn with_catalog(
        catalog: Catalog<'static>,
        customers: Vec<Customer>,
        quantity: QuantityRange,
        currency: &'static Currency,
        rng: R,
    ) -> Result<Self, SimulationError> {
        Ok(Self {
            catalog,
            customers,
            quantity: quantity.bounds("quantity", 1)?,
            currency,
            rng,
        })
    }

    /// Products for sale
    pub fn catalog(&self) -> &Catalog<'static> {
        &self.catalog
    }

    /// Customers to check out
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Currency used for every price
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Builds a cart with every catalog product at a random quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if a product cannot be added.
    pub fn fill_cart(&mut self) -> Result<Cart, CartError> {
        let (min, max) = self.quantity;
        let mut cart = Cart::new(self.currency);

        for key in self.catalog.keys() {
            cart.add(&self.catalog, key, self.rng.gen_range(min..=max))?;
        }

        Ok(cart)
    }

    /// Fills a cart for `customer`, prices it through `policy` and returns the invoice.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] if the cart cannot be filled or priced.
    #[tracing::instrument(
        name = "simulation.checkout",
        skip(self, customer, policy),
        fields(customer = %customer.name),
        err
    )]
    pub fn checkout<P>(
        &mut self,
        customer: &Customer,
        policy: &mut P,
    ) -> Result<Invoice<'static>, SimulationError>
    where
        P: DiscountPolicy<'static> + ?Sized,
    {
        let cart = self.fill_cart()?;
        let lines = price_cart(&cart, &self.catalog, policy)?;
        let invoice = Invoice::new(customer.clone(), self.currency, lines)?;

        info!(
            lines = invoice.lines().len(),
            subtotal = %invoice.subtotal(),
            total = %invoice.total(),
            "checked out"
        );

        Ok(invoice)
    }

    /// Checks out every customer in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`SimulationError`] encountered.
    pub fn run<P>(&mut self, policy: &mut P) -> Result<Vec<Invoice<'static>>, SimulationError>
    where
        P: DiscountPolicy<'static> + ?Sized,
    {
        let customers = self.customers.clone();

        customers
            .iter()
            .map(|customer| self.checkout(customer, policy))
            .collect()
    }
}
