// src/simulation/runner.rs

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{CostingError, DomainError, Result, TrialError};
use crate::simulation::config::RunnerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running,
    Done,
    Failed,
}

/// Aggregates of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub title: String,
    pub times: usize,
    pub average: Decimal,
    pub maximum: Decimal,
    pub minimum: Decimal,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(50);
        writeln!(f, "{rule}")?;
        writeln!(f, "{} Summary:", self.title)?;
        writeln!(f, "- Simulated: {} times", self.times)?;
        writeln!(f, "- Average: {}", self.average)?;
        writeln!(f, "- Maximum: {}", self.maximum)?;
        writeln!(f, "- Minimum: {}", self.minimum)?;
        write!(f, "{rule}")
    }
}

/// Monte Carlo trial runner.
///
/// Runs a caller-supplied computation a fixed number of times, strictly one
/// after the other, and keeps every result in call order.
#[derive(Debug)]
pub struct TrialRunner {
    config: RunnerConfig,
    state: RunnerState,
    results: Vec<Decimal>,
}

impl TrialRunner {
    pub fn new(times: usize, title: impl Into<String>) -> Result<Self> {
        Self::from_config(RunnerConfig::new(times, title))
    }

    pub fn from_config(config: RunnerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            results: Vec::with_capacity(config.times),
            config,
            state: RunnerState::Idle,
        })
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn times(&self) -> usize {
        self.config.times
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn results(&self) -> &[Decimal] {
        &self.results
    }

    /// Runs every trial and prints the summary to stdout.
    ///
    /// The first failing trial aborts the run: results recorded before it are
    /// kept, no summary is printed and the error is returned wrapped with the
    /// runner's title.
    pub fn run<F, E>(&mut self, trial: F) -> Result<Summary>
    where
        F: FnMut() -> std::result::Result<Decimal, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let summary = self.execute(trial)?;
        println!("{summary}");
        Ok(summary)
    }

    /// Like [`TrialRunner::run`], without printing.
    ///
    /// Trials must produce a [`Decimal`]. Floats are not converted:
    ///
    /// ```compile_fail
    /// use std::convert::Infallible;
    /// use supply_costing::TrialRunner;
    ///
    /// let mut runner = TrialRunner::new(2, "Floats").unwrap();
    /// runner.execute(|| Ok::<_, Infallible>(1.5_f64)).unwrap();
    /// ```
    pub fn execute<F, E>(&mut self, mut trial: F) -> Result<Summary>
    where
        F: FnMut() -> std::result::Result<Decimal, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if self.state != RunnerState::Idle {
            let state = self.state;
            return Err(self.context(TrialError::AlreadyRun { state }));
        }
        self.state = RunnerState::Running;

        for trial_number in 0..self.config.times {
            info!(trial = trial_number, "Simulator | Test[{}]: Starting...", trial_number);

            let result = match trial() {
                Ok(result) => result,
                Err(err) => {
                    return Err(self.fail(TrialError::Raised {
                        trial: trial_number,
                        source: err.into(),
                    }))
                }
            };

            info!(trial = trial_number, %result, "Simulator | Test[{}]: {}", trial_number, result);
            self.results.push(result);
        }

        let summary = match self.summary() {
            Ok(summary) => summary,
            Err(err) => return Err(self.fail(TrialError::Aggregate(err))),
        };
        self.state = RunnerState::Done;
        Ok(summary)
    }

    fn fail(&mut self, err: TrialError) -> CostingError {
        self.state = RunnerState::Failed;
        warn!(
            title = %self.config.title,
            completed = self.results.len(),
            error = %err,
            "Simulator | run aborted"
        );
        self.context(err)
    }

    fn context(&self, err: TrialError) -> CostingError {
        CostingError::trial(self.config.title.clone(), err)
    }

    /// Mean of the results, zero when there are none.
    pub fn average(&self) -> std::result::Result<Decimal, DomainError> {
        if self.results.is_empty() {
            return Ok(Decimal::ZERO);
        }
        let total = self
            .results
            .iter()
            .try_fold(Decimal::ZERO, |acc, &value| acc.checked_add(value))
            .ok_or(DomainError::Overflow("sum of trial results"))?;
        Ok(total / Decimal::from(self.results.len()))
    }

    pub fn maximum(&self) -> Decimal {
        self.results.iter().copied().max().unwrap_or(Decimal::ZERO)
    }

    pub fn minimum(&self) -> Decimal {
        self.results.iter().copied().min().unwrap_or(Decimal::ZERO)
    }

    pub fn summary(&self) -> std::result::Result<Summary, DomainError> {
        Ok(Summary {
            title: self.config.title.clone(),
            times: self.config.times,
            average: self.average()?,
            maximum: self.maximum(),
            minimum: self.minimum(),
        })
    }
}

/// Builds a runner and runs `trial` `times` times, printing the summary.
pub fn run_trials<F, E>(times: usize, title: impl Into<String>, trial: F) -> Result<TrialRunner>
where
    F: FnMut() -> std::result::Result<Decimal, E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let mut runner = TrialRunner::new(times, title)?;
    runner.run(trial)?;
    Ok(runner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainError, ValidationError};
    use std::convert::Infallible;
    use std::error::Error as _;

    fn constant(value: i64) -> impl FnMut() -> std::result::Result<Decimal, Infallible> {
        move || Ok(Decimal::from(value))
    }

    #[test]
    fn empty_title_is_rejected() {
        assert!(matches!(
            TrialRunner::new(3, ""),
            Err(CostingError::Validation(ValidationError::EmptyField { .. }))
        ));
    }

    #[test]
    fn constant_trial_summarizes_to_itself() {
        let mut runner = TrialRunner::new(3, "Answer").unwrap();
        assert_eq!(runner.state(), RunnerState::Idle);

        let summary = runner.execute(constant(42)).unwrap();

        let answer = Decimal::from(42);
        assert_eq!(runner.state(), RunnerState::Done);
        assert_eq!(runner.results(), &[answer, answer, answer]);
        assert_eq!(summary.average, answer);
        assert_eq!(summary.maximum, answer);
        assert_eq!(summary.minimum, answer);
        assert_eq!(summary.times, 3);
    }

    #[test]
    fn results_keep_call_order() {
        let mut next = 0;
        let mut runner = TrialRunner::new(4, "Counting").unwrap();
        runner
            .execute(|| {
                next += 1;
                Ok::<_, Infallible>(Decimal::from(next))
            })
            .unwrap();

        let expected: Vec<Decimal> = (1..=4).map(Decimal::from).collect();
        assert_eq!(runner.results(), expected.as_slice());
        assert_eq!(runner.average().unwrap(), Decimal::new(25, 1));
        assert_eq!(runner.maximum(), Decimal::from(4));
        assert_eq!(runner.minimum(), Decimal::ONE);
    }

    #[test]
    fn zero_trials_summarize_to_zero() {
        let mut runner = TrialRunner::new(0, "Nothing").unwrap();
        let summary = runner.execute(constant(7)).unwrap();

        assert!(runner.results().is_empty());
        assert_eq!(summary.average, Decimal::ZERO);
        assert_eq!(summary.maximum, Decimal::ZERO);
        assert_eq!(summary.minimum, Decimal::ZERO);
    }

    #[test]
    fn failing_trial_aborts_and_keeps_prior_results() {
        let mut calls = 0;
        let mut runner = TrialRunner::new(5, "Fragile").unwrap();
        let err = runner
            .execute(|| {
                calls += 1;
                if calls == 3 {
                    Err(CostingError::from(DomainError::DemandNotPositive))
                } else {
                    Ok(Decimal::from(calls))
                }
            })
            .unwrap_err();

        assert_eq!(calls, 3);
        assert_eq!(runner.state(), RunnerState::Failed);
        assert_eq!(runner.results(), &[Decimal::ONE, Decimal::TWO]);
        assert_eq!(err.to_string(), "failed to run trial runner 'Fragile'");
        assert!(matches!(
            err,
            CostingError::Trial {
                source: TrialError::Raised { trial: 2, .. },
                ..
            }
        ));
        let cause = err.source().and_then(|trial| trial.source()).unwrap();
        assert_eq!(cause.to_string(), "demand must be positive");
    }

    #[test]
    fn overflowing_average_fails_the_run() {
        let mut runner = TrialRunner::new(2, "Huge").unwrap();
        let err = runner
            .execute(|| Ok::<_, Infallible>(Decimal::MAX))
            .unwrap_err();

        assert_eq!(runner.state(), RunnerState::Failed);
        assert_eq!(runner.results(), &[Decimal::MAX, Decimal::MAX]);
        assert_eq!(
            runner.average(),
            Err(DomainError::Overflow("sum of trial results"))
        );
        assert!(matches!(
            err,
            CostingError::Trial {
                source: TrialError::Aggregate(DomainError::Overflow(_)),
                ..
            }
        ));
        assert_eq!(runner.maximum(), Decimal::MAX);
    }

    #[test]
    fn runner_only_runs_once() {
        let mut runner = TrialRunner::new(1, "Once").unwrap();
        runner.execute(constant(1)).unwrap();
        let err = runner.execute(constant(1)).unwrap_err();

        assert!(matches!(
            err,
            CostingError::Trial {
                source: TrialError::AlreadyRun {
                    state: RunnerState::Done
                },
                ..
            }
        ));
        assert_eq!(runner.results().len(), 1);
    }

    #[test]
    fn summary_block_layout() {
        let summary = Summary {
            title: "Total Fixed Cost".to_string(),
            times: 2,
            average: Decimal::new(15, 1),
            maximum: Decimal::TWO,
            minimum: Decimal::ONE,
        };
        let rule = "-".repeat(50);
        let expected = format!(
            "{rule}\nTotal Fixed Cost Summary:\n- Simulated: 2 times\n- Average: 1.5\n- Maximum: 2\n- Minimum: 1\n{rule}"
        );
        assert_eq!(summary.to_string(), expected);
    }

    #[test]
    fn run_trials_returns_the_finished_runner() {
        let runner = run_trials(2, "Helper", constant(5)).unwrap();
        assert_eq!(runner.state(), RunnerState::Done);
        assert_eq!(runner.average().unwrap(), Decimal::from(5));
    }
}
