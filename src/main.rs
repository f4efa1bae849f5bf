//! Caisse
//!
//! Runs the checkout simulation and prints one invoice per customer.

use std::{io, time::Instant};

use anyhow::Result;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use caisse::{policy::RandomDiscountPolicy, simulation::Simulation, utils::SimulationArgs};

/// Caisse entry point
#[expect(clippy::print_stdout, reason = "CLI output")]
pub fn main() -> Result<()> {
    let args = SimulationArgs::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = args.load_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);

    info!(seed, products = config.products, customers = config.customers, "starting simulation");

    let start = Instant::now();

    let mut simulation = Simulation::new(&config, StdRng::seed_from_u64(seed))?;
    let mut policy = RandomDiscountPolicy::new(
        StdRng::seed_from_u64(seed.wrapping_add(1)),
        &config.discounts,
    )?;

    let invoices = simulation.run(&mut policy)?;

    let elapsed = start.elapsed().as_secs_f32();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    for invoice in &invoices {
        invoice.write_to(&mut handle, simulation.catalog())?;
    }

    println!("Seed: {seed}");
    println!("Simulation: {elapsed}s");

    Ok(())
}
