//! Caisse prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    config::{ConfigError, DecimalRange, DiscountRanges, QuantityRange, SimulationConfig},
    customers::Customer,
    discounts::{
        BogoDiscount, BuyTwoGetOneFreeDiscount, Discount, DiscountError, DiscountKind,
        DiscountStrategy, FixedAmountDiscount, FreeShippingDiscount, PercentageDiscount,
    },
    factory::{DiscountFactory, DiscountParam},
    invoice::{Invoice, InvoiceError},
    policy::{DiscountPolicy, FixedDiscountPolicy, RandomDiscountPolicy},
    pricing::{PricedLine, PricingError, price_cart},
    products::{Catalog, Product, ProductKey},
    simulation::{Simulation, SimulationError},
};
