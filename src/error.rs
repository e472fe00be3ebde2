// src/error.rs

//! Error types for supply costing.
//!
//! Every failure is raised at the smallest scope that can detect it (a
//! constructor, a setter, a formula precondition) and propagated to the
//! caller untouched. Nothing in this crate retries or recovers.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::simulation::runner::RunnerState;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum CostingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Range(#[from] RangeError),

    /// A trial run aborted. The failing trial's cause stays reachable
    /// through `source()`.
    #[error("failed to run trial runner '{title}'")]
    Trial {
        title: String,
        #[source]
        source: TrialError,
    },
}

/// Malformed construction arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {entity} {field}: must not be empty")]
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("invalid {field}: {input:?} is not a decimal number")]
    InvalidNumber { field: &'static str, input: String },
}

/// Business-rule violations on well-typed data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("the {field} can not be negative: {value}")]
    Negative { field: &'static str, value: Decimal },

    #[error("demand must be positive")]
    DemandNotPositive,

    #[error("storage cost must be positive")]
    StorageCostNotPositive,

    #[error("variable cost must be positive")]
    VariableCostNotPositive,

    #[error("the {0} is outside the decimal range")]
    Overflow(&'static str),
}

/// Sampler precondition violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("mean too high: {mean} > upper bound {upper}")]
    MeanTooHigh { mean: f64, upper: f64 },

    #[error("mean too low: {mean} < lower bound {lower}")]
    MeanTooLow { mean: f64, lower: f64 },

    #[error("standard deviation must be finite and positive, got {0}")]
    InvalidStdDev(f64),

    #[error("sampling parameters must not be NaN")]
    NotANumber,

    #[error("mean must be finite, got {0}")]
    NonFiniteMean(f64),

    #[error("sampled value {0} has no decimal representation")]
    NotRepresentable(f64),
}

/// Failures of a single trial inside a run.
#[derive(Debug, Error)]
pub enum TrialError {
    #[error("trial {trial} failed")]
    Raised {
        trial: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("trial results could not be aggregated")]
    Aggregate(#[source] DomainError),

    #[error("runner can only run once, it is already {state:?}")]
    AlreadyRun { state: RunnerState },
}

impl CostingError {
    /// Wrap a trial failure with the runner context.
    pub fn trial(title: impl Into<String>, source: TrialError) -> Self {
        Self::Trial {
            title: title.into(),
            source,
        }
    }
}

/// Result type alias for supply costing.
pub type Result<T> = std::result::Result<T, CostingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn trial_error_keeps_the_root_cause() {
        let cause = CostingError::from(DomainError::DemandNotPositive);
        let err = CostingError::trial(
            "Example",
            TrialError::Raised {
                trial: 3,
                source: Box::new(cause),
            },
        );

        assert_eq!(err.to_string(), "failed to run trial runner 'Example'");
        let trial = err.source().expect("trial error");
        assert_eq!(trial.to_string(), "trial 3 failed");
        let root = trial.source().expect("root cause");
        assert_eq!(root.to_string(), "demand must be positive");
    }

    #[test]
    fn category_errors_render_transparently() {
        let err: CostingError = RangeError::MeanTooHigh {
            mean: 11.0,
            upper: 10.0,
        }
        .into();
        assert_eq!(err.to_string(), "mean too high: 11 > upper bound 10");
    }
}
