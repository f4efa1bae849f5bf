//! Customers

/// Customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Full name
    pub name: String,
}

impl Customer {
    /// Create a new customer.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
