//! Invoice

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    customers::Customer,
    pricing::{PricedLine, PricingError, total_price},
    products::{Catalog, ProductKey},
};

/// Errors that can occur when building or printing an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Error totalling the priced lines.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Error finding a product in the catalog.
    #[error("Missing product")]
    MissingProduct(ProductKey),

    /// IO error
    #[error("IO error")]
    IO,
}

/// A customer's checkout result.
#[derive(Debug, Clone)]
pub struct Invoice<'a> {
    customer: Customer,

    /// Lines in the order they were added to the cart
    lines: SmallVec<[PricedLine<'a>; 10]>,

    /// Total cost before any discounts
    subtotal: Money<'a, Currency>,

    /// Sum of the discounted line totals
    total: Money<'a, Currency>,

    currency: &'static Currency,
}

impl<'a> Invoice<'a> {
    /// Build an invoice from priced lines, computing the subtotal and total.
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError`] if a line total overflows or a line is in
    /// another currency.
    pub fn new(
        customer: Customer,
        currency: &'static Currency,
        lines: SmallVec<[PricedLine<'a>; 10]>,
    ) -> Result<Self, InvoiceError> {
        let full_prices = lines
            .iter()
            .map(PricedLine::full_price_total)
            .collect::<Result<SmallVec<[_; 10]>, _>>()?;

        let subtotal = total_price(full_prices, currency)?;
        let total = total_price(lines.iter().map(|line| line.line_total), currency)?;

        Ok(Self {
            customer,
            lines,
            subtotal,
            total,
            currency,
        })
    }

    /// Customer the invoice was issued to
    #[must_use]
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Priced lines
    #[must_use]
    pub fn lines(&self) -> &[PricedLine<'a>] {
        &self.lines
    }

    /// Total cost before any discounts
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Total amount due
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Calculate the savings made by applying discounts.
    ///
    /// Negative when a discount raised the price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Calculates the savings as a fraction of the subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings_percent(&self) -> Result<Percentage, MoneyError> {
        let savings_minor = self.savings()?.to_minor_units();
        let subtotal_minor = self.subtotal.to_minor_units();

        if subtotal_minor == 0 {
            return Ok(Percentage::from(Decimal::ZERO));
        }

        Ok(Percentage::from(
            Decimal::from(savings_minor) / Decimal::from(subtotal_minor),
        ))
    }

    /// Prints the invoice as a table followed by its totals.
    ///
    /// # Errors
    ///
    /// Returns an error if a product is missing from `catalog` or the output
    /// cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        catalog: &Catalog<'_>,
    ) -> Result<(), InvoiceError> {
        let mut builder = Builder::default();

        builder.push_record([
            "",
            "Item",
            "Qty",
            "Unit Price",
            "Discount",
            "Discounted Price",
            "Line Total",
        ]);

        for (idx, line) in self.lines.iter().enumerate() {
            let product = catalog
                .get(line.product)
                .ok_or(InvoiceError::MissingProduct(line.product))?;

            builder.push_record([
                format!("#{:<3}", idx + 1),
                product.name.clone(),
                line.quantity.to_string(),
                line.unit_price.to_string(),
                line.discount.to_string(),
                line.discounted_price.to_string(),
                line.line_total.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..4), Alignment::right());
        table.modify(Columns::new(5..7), Alignment::right());

        writeln!(out, "\n{}", self.customer.name).map_err(|_err| InvoiceError::IO)?;
        writeln!(out, "{table}").map_err(|_err| InvoiceError::IO)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), InvoiceError> {
        let savings = self.savings()?;
        let savings_points = percent_points(self.savings_percent()?);

        let rows = [
            ("Subtotal:", self.subtotal.to_string()),
            ("Total:", self.total.to_string()),
            ("Savings:", format!("({savings_points:.2}%) {savings}")),
        ];

        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in rows {
            writeln!(out, " {label:>9}  {value:>value_width$}").map_err(|_err| InvoiceError::IO)?;
        }

        writeln!(out).map_err(|_err| InvoiceError::IO)
    }
}

/// Converts a fractional percentage to percent points for display.
fn percent_points(percentage: Percentage) -> Decimal {
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2)
}
