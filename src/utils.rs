//! Utils

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, SimulationConfig};

/// Arguments for the checkout simulation
#[derive(Debug, Parser)]
#[command(name = "caisse", about = "Simulate discounted checkouts")]
pub struct SimulationArgs {
    /// YAML config file
    #[arg(short, long, env = "CAISSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of products to generate
    #[arg(short, long)]
    pub products: Option<usize>,

    /// Number of customers to check out
    #[arg(short = 'n', long)]
    pub customers: Option<usize>,

    /// Random seed; a fresh one is drawn when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl SimulationArgs {
    /// Loads the config file, if any, and applies command line overrides.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be loaded or the result is invalid.
    pub fn load_config(&self) -> Result<SimulationConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_path(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(products) = self.products {
            config.products = products;
        }

        if let Some(customers) = self.customers {
            config.customers = customers;
        }

        config.validate()?;

        Ok(config)
    }
}
