//! Simulation Configuration
//!
//! Loaded from YAML. Every field is optional; missing fields fall back to the
//! defaults below.
//!
//! ```yaml
//! currency: GBP
//! products: 10
//! customers: 5
//! quantity: { min: 1, max: 4 }
//! price: { min: "1.00", max: "100.00" }
//! discounts:
//!   kinds: [percentage, bogo, fixed_amount, free_shipping, btgof]
//!   percentage: { min: "1", max: "50" }
//!   bogo_buy: { min: 1, max: 5 }
//!   bogo_free: { min: 1, max: 5 }
//!   fixed_amount: { min: "1.00", max: "10.00" }
//! ```

use std::{fs, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{self, Currency};
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::discounts::{DiscountError, DiscountKind};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A count that must be positive was zero
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),

    /// A min/max range is unusable
    #[error("Invalid {field} range: {reason}")]
    InvalidRange {
        /// Config field holding the range
        field: &'static str,

        /// Why the range was rejected
        reason: String,
    },

    /// The discount kind list is empty
    #[error("At least one discount kind must be configured")]
    NoDiscountKinds,

    /// Discount errors, such as an unknown discount kind
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Inclusive range of whole quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuantityRange {
    /// Smallest value
    pub min: u32,

    /// Largest value
    pub max: u32,
}

impl QuantityRange {
    /// Create a new range.
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Returns `(min, max)` after checking `floor <= min <= max`.
    pub(crate) fn bounds(
        self,
        field: &'static str,
        floor: u32,
    ) -> Result<(u32, u32), ConfigError> {
        if self.min < floor {
            return Err(ConfigError::InvalidRange {
                field,
                reason: format!("min must be at least {floor}, got {}", self.min),
            });
        }

        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                field,
                reason: format!("min {} is greater than max {}", self.min, self.max),
            });
        }

        Ok((self.min, self.max))
    }
}

/// Inclusive range of decimal values, sampled in hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecimalRange {
    /// Smallest value
    pub min: Decimal,

    /// Largest value
    pub max: Decimal,
}

impl DecimalRange {
    /// Create a new range.
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Returns the range in whole hundredths after checking
    /// `floor <= min <= max <= ceiling`.
    pub(crate) fn hundredths(
        &self,
        field: &'static str,
        floor: Decimal,
        ceiling: Option<Decimal>,
    ) -> Result<(i64, i64), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidRange { field, reason };

        if self.min < floor {
            return Err(invalid(format!("min must be at least {floor}, got {}", self.min)));
        }

        match ceiling {
            Some(ceiling) if self.max > ceiling => {
                return Err(invalid(format!(
                    "max must be at most {ceiling}, got {}",
                    self.max
                )));
            }
            _ => {}
        }

        if self.min > self.max {
            return Err(invalid(format!(
                "min {} is greater than max {}",
                self.min, self.max
            )));
        }

        let to_hundredths = |value: Decimal| {
            value
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|scaled| scaled.round().to_i64())
                .ok_or_else(|| invalid(format!("{value} is too large")))
        };

        Ok((to_hundredths(self.min)?, to_hundredths(self.max)?))
    }
}

/// Ranges used to synthesise random discount parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscountRanges {
    /// Discount kinds to choose between, by name
    pub kinds: Vec<String>,

    /// Percentage rate, in percent points
    pub percentage: DecimalRange,

    /// Quantity bought for buy/free offers
    pub bogo_buy: QuantityRange,

    /// Quantity given free for buy/free offers
    pub bogo_free: QuantityRange,

    /// Fixed amount taken off, in major units
    pub fixed_amount: DecimalRange,
}

impl Default for DiscountRanges {
    fn default() -> Self {
        Self {
            kinds: DiscountKind::ALL.iter().map(ToString::to_string).collect(),
            percentage: DecimalRange::new(Decimal::ONE, Decimal::from(50)),
            bogo_buy: QuantityRange::new(1, 5),
            bogo_free: QuantityRange::new(1, 5),
            fixed_amount: DecimalRange::new(Decimal::ONE, Decimal::TEN),
        }
    }
}

impl DiscountRanges {
    /// Parse the configured kind names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDiscountKinds`] if the list is empty, or
    /// [`DiscountError::InvalidDiscountKind`] for a name that is not a kind.
    pub fn kinds(&self) -> Result<SmallVec<[DiscountKind; 5]>, ConfigError> {
        if self.kinds.is_empty() {
            return Err(ConfigError::NoDiscountKinds);
        }

        let mut kinds = SmallVec::new();

        for name in &self.kinds {
            let kind = name.parse::<DiscountKind>()?;

            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }

        Ok(kinds)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.kinds()?;
        self.percentage.hundredths(
            "discounts.percentage",
            Decimal::ZERO,
            Some(Decimal::ONE_HUNDRED),
        )?;
        self.bogo_buy.bounds("discounts.bogo_buy", 1)?;
        self.bogo_free.bounds("discounts.bogo_free", 0)?;
        self.fixed_amount
            .hundredths("discounts.fixed_amount", Decimal::ZERO, None)?;

        Ok(())
    }
}

/// Checkout simulation settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// ISO 4217 currency code for every price
    pub currency: String,

    /// Number of products to generate
    pub products: usize,

    /// Number of customers to check out
    pub customers: usize,

    /// Units of each product per cart
    pub quantity: QuantityRange,

    /// Product price, in major units
    pub price: DecimalRange,

    /// Random discount parameter ranges
    pub discounts: DiscountRanges,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            currency: iso::GBP.iso_alpha_code.to_string(),
            products: 10,
            customers: 5,
            quantity: QuantityRange::new(1, 4),
            price: DecimalRange::new(Decimal::ONE, Decimal::ONE_HUNDRED),
            discounts: DiscountRanges::default(),
        }
    }
}

impl SimulationConfig {
    /// Load and validate a config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse and validate a config from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed or fails validation.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_norway::from_str(contents)?;

        config.validate()?;

        Ok(config)
    }

    /// Check every setting.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.currency()?;

        if self.products == 0 {
            return Err(ConfigError::ZeroCount("products"));
        }

        if self.customers == 0 {
            return Err(ConfigError::ZeroCount("customers"));
        }

        self.quantity.bounds("quantity", 1)?;
        self.price.hundredths("price", Decimal::new(1, 2), None)?;
        self.discounts.validate()
    }

    /// Resolve the configured currency code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] if the code is not an ISO currency.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        iso::find(&self.currency.trim().to_ascii_uppercase())
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }
}
