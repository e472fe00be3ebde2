// src/model/product.rs

use std::fmt;

use rust_decimal::Decimal;

use crate::error::{DomainError, Result};
use crate::model::cost::{non_empty, non_negative, CostCollection};
use crate::strategy::optimization::economic_order_quantity;

/// Where a product comes from. Decides what the variable costs stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    /// Made in one of the company's own factories: variable costs are production costs.
    Produced,
    /// Bought from an external company: variable costs are purchase costs.
    Purchased,
}

/// A good moving through the supply chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    kind: ProductKind,
    name: String,
    inventory: Decimal,
    demand: Decimal,
    lead_time: Decimal,
    price: Decimal,

    /// Annual holding cost per unit, itemized.
    pub storage_costs: CostCollection,
    /// Production or purchase costs, depending on `kind`.
    pub variable_costs: CostCollection,
}

impl Product {
    /// Creates a product with every quantity at zero and empty cost collections.
    pub fn new(kind: ProductKind, name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            kind,
            name: non_empty("product", "name", name.into())?,
            inventory: Decimal::ZERO,
            demand: Decimal::ZERO,
            lead_time: Decimal::ZERO,
            price: Decimal::ZERO,
            storage_costs: CostCollection::new(),
            variable_costs: CostCollection::new(),
        })
    }

    pub fn produced(name: impl Into<String>) -> Result<Self> {
        Self::new(ProductKind::Produced, name)
    }

    pub fn purchased(name: impl Into<String>) -> Result<Self> {
        Self::new(ProductKind::Purchased, name)
    }

    pub fn with_inventory(mut self, inventory: Decimal) -> Result<Self> {
        self.set_inventory(inventory)?;
        Ok(self)
    }

    pub fn with_demand(mut self, demand: Decimal) -> Result<Self> {
        self.set_demand(demand)?;
        Ok(self)
    }

    pub fn with_lead_time(mut self, lead_time: Decimal) -> Result<Self> {
        self.set_lead_time(lead_time)?;
        Ok(self)
    }

    pub fn with_price(mut self, price: Decimal) -> Result<Self> {
        self.set_price(price)?;
        Ok(self)
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inventory(&self) -> Decimal {
        self.inventory
    }

    pub fn demand(&self) -> Decimal {
        self.demand
    }

    pub fn lead_time(&self) -> Decimal {
        self.lead_time
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = non_empty("product", "name", name.into())?;
        Ok(())
    }

    pub fn set_inventory(&mut self, inventory: Decimal) -> Result<()> {
        self.inventory = non_negative("inventory", inventory)?;
        Ok(())
    }

    pub fn set_demand(&mut self, demand: Decimal) -> Result<()> {
        self.demand = non_negative("demand", demand)?;
        Ok(())
    }

    pub fn set_lead_time(&mut self, lead_time: Decimal) -> Result<()> {
        self.lead_time = non_negative("lead time", lead_time)?;
        Ok(())
    }

    pub fn set_price(&mut self, price: Decimal) -> Result<()> {
        self.price = non_negative("price", price)?;
        Ok(())
    }

    /// The variable costs when this is a produced product.
    pub fn production_costs(&self) -> Option<&CostCollection> {
        (self.kind == ProductKind::Produced).then_some(&self.variable_costs)
    }

    /// The variable costs when this is a purchased product.
    pub fn purchase_costs(&self) -> Option<&CostCollection> {
        (self.kind == ProductKind::Purchased).then_some(&self.variable_costs)
    }

    pub fn total_storage_cost(&self) -> std::result::Result<Decimal, DomainError> {
        self.storage_costs.total()
    }

    pub fn total_variable_cost(&self) -> std::result::Result<Decimal, DomainError> {
        self.variable_costs.total()
    }

    /// The Economic Order Quantity for this product.
    ///
    /// Demand is D, the total variable cost stands in for the per-order cost
    /// K and the total storage cost is the holding cost h.
    pub fn optimum_inventory_level(&self) -> std::result::Result<Decimal, DomainError> {
        economic_order_quantity(
            self.demand,
            self.total_variable_cost()?,
            self.total_storage_cost()?,
        )
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Product: {} - {}>", self.name, self.inventory)
    }
}
