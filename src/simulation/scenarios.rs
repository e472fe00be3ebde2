// src/simulation/scenarios.rs

//! Bundled Monte Carlo scenarios.
//!
//! Each scenario builds a center or a product from scratch with randomized
//! costs, then returns the figure of interest. One call is one trial.

use rand::Rng;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::model::center::Center;
use crate::model::cost::Cost;
use crate::model::product::Product;
use crate::simulation::config::RunnerConfig;
use crate::simulation::sampler::normal_with;

/// (name, mean, std, upper, lower)
type CostSpec = (&'static str, f64, f64, f64, f64);

const CENTER_FIXED_COSTS: [CostSpec; 7] = [
    ("Quality Control Costs", 100.0, 20.0, 3000.0, 50.0),
    ("Labor Costs", 500.0, 100.0, 1000.0, 0.0),
    ("Energy Costs", 150.0, 180.0, 1000.0, 100.0),
    ("Equipment Costs", 200.0, 40.0, 320.0, 160.0),
    ("Overhead Costs", 30.0, 20.0, 300.0, 0.0),
    ("Warehouse Rent", 300.0, 50.0, 400.0, 200.0),
    ("Inventory Management Software", 10.0, 5.0, 80.0, 0.0),
];

const PRODUCTION_COSTS: [CostSpec; 2] = [
    ("Energy Costs", 2.0, 1.0, 5.0, 0.0),
    ("Labor Costs", 7.0, 2.0, 10.0, 5.0),
];

// Every storage line shares the same distribution.
const STORAGE_COSTS: [&str; 9] = [
    "Warehousing",
    "Utilities",
    "Insurance",
    "Taxes",
    "Freight",
    "Placement",
    "Ordering",
    "Obsolescence",
    "Refrigeration",
];
const STORAGE_DISTRIBUTION: (f64, f64, f64, f64) = (0.1, 0.1, 0.5, 0.0);

fn sampled_costs<'a, R: Rng + ?Sized>(
    rng: &'a mut R,
    specs: &'a [CostSpec],
) -> impl Iterator<Item = Result<Cost>> + 'a {
    specs.iter().map(move |&(name, mean, std, upper, lower)| {
        Cost::new(name, normal_with(&mut *rng, mean, std, upper, lower)?)
    })
}

fn storage_specs(count: usize) -> Vec<CostSpec> {
    let (mean, std, upper, lower) = STORAGE_DISTRIBUTION;
    STORAGE_COSTS[..count]
        .iter()
        .map(|&name| (name, mean, std, upper, lower))
        .collect()
}

/// Total fixed cost of a storage center with seven randomized cost lines.
pub fn center_fixed_cost<R: Rng + ?Sized>(rng: &mut R) -> Result<Decimal> {
    let mut center = Center::new("My Center I")?.with_address("450 Hawk St.")?;
    for cost in sampled_costs(rng, &CENTER_FIXED_COSTS) {
        center.fixed_costs.add(cost?);
    }
    Ok(center.total_fixed_cost()?)
}

/// Total variable cost of a produced product.
pub fn product_variable_cost<R: Rng + ?Sized>(rng: &mut R) -> Result<Decimal> {
    let mut product = Product::produced("Product I")?.with_inventory(Decimal::from(100))?;
    for cost in sampled_costs(rng, &PRODUCTION_COSTS) {
        product.variable_costs.add(cost?);
    }
    Ok(product.total_variable_cost()?)
}

/// Total storage cost of a purchased product.
pub fn product_storage_cost<R: Rng + ?Sized>(rng: &mut R) -> Result<Decimal> {
    let mut product = Product::purchased("Product II")?.with_inventory(Decimal::from(100))?;
    for cost in sampled_costs(rng, &storage_specs(8)) {
        product.storage_costs.add(cost?);
    }
    Ok(product.total_storage_cost()?)
}

/// EOQ of a produced product with randomized demand and costs.
pub fn optimum_inventory_level<R: Rng + ?Sized>(rng: &mut R) -> Result<Decimal> {
    let demand = normal_with(rng, 1000.0, 1000.0, 3000.0, 0.0)?;
    let mut product = Product::produced("Product III")?
        .with_inventory(Decimal::from(100))?
        .with_demand(demand)?;
    for cost in sampled_costs(rng, &PRODUCTION_COSTS) {
        product.variable_costs.add(cost?);
    }
    for cost in sampled_costs(rng, &storage_specs(STORAGE_COSTS.len())) {
        product.storage_costs.add(cost?);
    }
    Ok(product.optimum_inventory_level()?)
}

/// A single draw, for checking the sampler itself.
pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Result<Decimal> {
    Ok(normal_with(rng, 3.0, 1.0, 10.0, 1.0)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    CenterFixedCost,
    ProductVariableCost,
    ProductStorageCost,
    OptimumInventoryLevel,
    Sample,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::CenterFixedCost,
        Scenario::ProductVariableCost,
        Scenario::ProductStorageCost,
        Scenario::OptimumInventoryLevel,
        Scenario::Sample,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Scenario::CenterFixedCost => "Total Fixed Cost",
            Scenario::ProductVariableCost => "Product Variable Cost",
            Scenario::ProductStorageCost => "Product Storage Cost",
            Scenario::OptimumInventoryLevel => "Product Optimum Inventory Level",
            Scenario::Sample => "Example",
        }
    }

    pub fn default_times(self) -> usize {
        match self {
            Scenario::CenterFixedCost => 100,
            _ => 10,
        }
    }

    /// Runner settings, optionally overriding the trial count.
    pub fn config(self, times: Option<usize>) -> RunnerConfig {
        RunnerConfig::new(times.unwrap_or(self.default_times()), self.title())
    }

    /// Runs one trial of this scenario.
    pub fn trial<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Decimal> {
        match self {
            Scenario::CenterFixedCost => center_fixed_cost(rng),
            Scenario::ProductVariableCost => product_variable_cost(rng),
            Scenario::ProductStorageCost => product_storage_cost(rng),
            Scenario::OptimumInventoryLevel => optimum_inventory_level(rng),
            Scenario::Sample => sample(rng),
        }
    }
}
