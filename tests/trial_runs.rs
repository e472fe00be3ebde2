use std::convert::Infallible;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;

use supply_costing::io::reporting;
use supply_costing::simulation::scenarios::Scenario;
use supply_costing::{
    normal_with, run_trials, Cost, CostingError, DomainError, Product, RangeError, RunnerState,
    TrialError, TrialRunner,
};

#[test]
fn constant_trials_end_to_end() {
    let runner = run_trials(3, "Constant", || Ok::<_, Infallible>(Decimal::from(42))).unwrap();

    let answer = Decimal::from(42);
    assert_eq!(runner.results(), &[answer, answer, answer]);
    assert_eq!(runner.average().unwrap(), answer);
    assert_eq!(runner.minimum(), answer);
    assert_eq!(runner.maximum(), answer);
}

#[test]
fn average_is_sum_over_count() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut runner = TrialRunner::new(25, "Product Variable Cost").unwrap();
    runner
        .execute(|| Scenario::ProductVariableCost.trial(&mut rng))
        .unwrap();

    let results = runner.results();
    assert_eq!(results.len(), 25);
    let total: Decimal = results.iter().sum();
    let average = runner.average().unwrap();
    assert_eq!(average, total / Decimal::from(25));
    assert!(runner.minimum() <= average);
    assert!(average <= runner.maximum());
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut runner = TrialRunner::from_config(Scenario::CenterFixedCost.config(Some(5))).unwrap();
        runner
            .execute(|| Scenario::CenterFixedCost.trial(&mut rng))
            .unwrap();
        runner.results().to_vec()
    };
    assert_eq!(run(9), run(9));
}

#[test]
fn sampler_failure_inside_a_trial_aborts_the_run() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut calls = 0;
    let mut runner = TrialRunner::new(4, "Bad Bounds").unwrap();

    let err = runner
        .execute(|| {
            calls += 1;
            let mean = if calls < 3 { 5.0 } else { 11.0 };
            let value = normal_with(&mut rng, mean, 1.0, 10.0, 1.0)?;
            Ok::<_, CostingError>(Cost::new("Sampled", value)?.value())
        })
        .unwrap_err();

    assert_eq!(runner.state(), RunnerState::Failed);
    assert_eq!(runner.results().len(), 2);
    match err {
        CostingError::Trial {
            title,
            source: TrialError::Raised { trial, source },
        } => {
            assert_eq!(title, "Bad Bounds");
            assert_eq!(trial, 2);
            let cause = source.downcast_ref::<CostingError>().unwrap();
            assert!(matches!(
                cause,
                CostingError::Range(RangeError::MeanTooHigh { .. })
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn eoq_trial_with_zero_storage_cost_fails() {
    let mut runner = TrialRunner::new(1, "No Storage").unwrap();
    let err = runner
        .execute(|| {
            let mut product = Product::produced("Product III")?.with_demand(Decimal::from(1000))?;
            product
                .variable_costs
                .add(Cost::new("Labor Costs", Decimal::from(100))?);
            Ok::<_, CostingError>(product.optimum_inventory_level()?)
        })
        .unwrap_err();

    match err {
        CostingError::Trial {
            source: TrialError::Raised { source, .. },
            ..
        } => assert!(matches!(
            source.downcast_ref::<CostingError>(),
            Some(CostingError::Domain(DomainError::StorageCostNotPositive))
        )),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn trial_log_covers_every_runner() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut runners = Vec::new();
    for scenario in [Scenario::Sample, Scenario::ProductStorageCost] {
        let mut runner = TrialRunner::from_config(scenario.config(Some(4))).unwrap();
        runner.execute(|| scenario.trial(&mut rng)).unwrap();
        runners.push(runner);
    }

    let records: Vec<_> = runners.iter().flat_map(reporting::trial_records).collect();
    assert_eq!(records.len(), 8);
    assert_eq!(records[0].title, "Example");
    assert_eq!(records[4].title, "Product Storage Cost");
    assert_eq!(records[4].trial, 0);

    let mut out = Vec::new();
    reporting::write_csv(&mut out, &records).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 9);
    assert!(text.starts_with("title,trial,value\n"));
}
