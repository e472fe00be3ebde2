//! Supply-chain cost accounting with Monte Carlo sampling.
//!
//! Costs are aggregated into collections attached to storage centers and
//! products. Products expose their Economic Order Quantity, and a trial
//! runner repeats randomized computations built on a truncated normal
//! sampler.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{CostingError, DomainError, RangeError, Result, TrialError, ValidationError};
pub use model::center::Center;
pub use model::cost::{Cost, CostCollection};
pub use model::product::{Product, ProductKind};
pub use simulation::runner::{run_trials, RunnerState, Summary, TrialRunner};
pub use simulation::sampler::{normal, normal_with, TruncatedNormal};
pub use strategy::optimization::economic_order_quantity;
