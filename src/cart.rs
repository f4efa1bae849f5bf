//! Cart

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use smallvec::SmallVec;
use thiserror::Error;

use crate::products::{Catalog, ProductKey};

/// Errors related to cart construction.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The product key does not exist in the catalog.
    #[error("Product {0:?} is not in the catalog")]
    UnknownProduct(ProductKey),

    /// A line must contain at least one unit.
    #[error("Cannot add zero units of {0}")]
    ZeroQuantity(String),

    /// A product's currency differs from the cart currency (product, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// Merging quantities for the same product overflowed.
    #[error("Quantity of {0} overflowed")]
    QuantityOverflow(String),
}

/// A product and how many units of it are in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    product: ProductKey,
    quantity: u32,
}

impl CartLine {
    /// Returns the product key.
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Returns the number of units.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Cart
///
/// Lines keep the order in which products were first added. Adding a product
/// that is already in the cart increases that line's quantity.
#[derive(Debug)]
pub struct Cart {
    lines: SmallVec<[CartLine; 10]>,
    positions: FxHashMap<ProductKey, usize>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: SmallVec::new(),
            positions: FxHashMap::default(),
            currency,
        }
    }

    /// Add `quantity` units of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the product is unknown, the quantity is
    /// zero, the product is priced in another currency, or the merged
    /// quantity overflows.
    pub fn add(
        &mut self,
        catalog: &Catalog<'_>,
        product_key: ProductKey,
        quantity: u32,
    ) -> Result<(), CartError> {
        let product = catalog
            .get(product_key)
            .ok_or(CartError::UnknownProduct(product_key))?;

        if quantity == 0 {
            return Err(CartError::ZeroQuantity(product.name.clone()));
        }

        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.name.clone(),
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self
            .positions
            .get(&product_key)
            .and_then(|&idx| self.lines.get_mut(idx))
        {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| CartError::QuantityOverflow(product.name.clone()))?;

            return Ok(());
        }

        self.positions.insert(product_key, self.lines.len());
        self.lines.push(CartLine {
            product: product_key,
            quantity,
        });

        Ok(())
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Get the number of distinct lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
