// src/model/center.rs

use std::fmt;

use rust_decimal::Decimal;

use crate::error::{DomainError, Result};
use crate::model::cost::{non_empty, CostCollection};

/// A physical location where goods are stored before moving on: a warehouse,
/// a distribution center, a refrigerated facility...
#[derive(Debug, Clone, PartialEq)]
pub struct Center {
    name: String,
    address: String,

    /// Fixed costs of running the center.
    pub fixed_costs: CostCollection,
}

impl Center {
    /// Creates a center with no address and no costs.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: non_empty("center", "name", name.into())?,
            address: String::new(),
            fixed_costs: CostCollection::new(),
        })
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Result<Self> {
        self.set_address(address)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Empty until an address is set.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = non_empty("center", "name", name.into())?;
        Ok(())
    }

    pub fn set_address(&mut self, address: impl Into<String>) -> Result<()> {
        self.address = non_empty("center", "address", address.into())?;
        Ok(())
    }

    pub fn total_fixed_cost(&self) -> std::result::Result<Decimal, DomainError> {
        self.fixed_costs.total()
    }
}

impl fmt::Display for Center {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Center: {} - {}>", self.name, self.address)
    }
}
