// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approxmi::error::{ApproxMiError, ConfigError};
use approxmi::estimators::{ErrorStrategy, MutualInformation};
use approxmi::experiment::{Experiment, ExperimentConfig};
use approxmi::noise::NoiseModel;
use rstest::rstest;

fn descriptor(mi: &str) -> String {
    format!(
        r#"{{
            "name": "pipeline",
            "number_solutions": 8,
            "noise_model": "trunc-gauss_2",
            "repetitions_for_mi": 2000,
            "repetitions_for_error": 2000,
            "mi_computing_type": "{mi}",
            "error_computing_type": "error_computing_1",
            "gamma_val_low": 0,
            "gamma_val_high": 7,
            "gamma_val_step": 2,
            "seed": 17
        }}"#
    )
}

#[rstest]
#[case("mi_computing_1")]
#[case("mi_computing_2")]
#[case("mi_computing_3")]
#[case("mi_computing_4")]
fn every_strategy_runs_end_to_end(#[case] mi: &str) {
    let experiment = ExperimentConfig::from_json(&descriptor(mi)).unwrap().build().unwrap();
    assert_eq!(experiment.gammas(), &[0, 2, 4, 6]);

    let report = experiment.run();
    assert!(report.is_complete());
    assert_eq!(report.gammas(), vec![0, 2, 4, 6]);
    assert_eq!(report.mutual_information().len(), 4);
    assert_eq!(report.mean_errors().len(), 4);
    assert_eq!(report.joint_stack().dim(), (4, 8, 8));
    assert!(report.std_errors().iter().all(|&s| s >= 0.0));
}

#[test]
fn seeded_experiments_are_reproducible() {
    let config = ExperimentConfig::from_json(&descriptor("histogram")).unwrap();
    let first = config.build().unwrap().run();
    let second = config.build().unwrap().run();
    assert_eq!(first, second);
}

#[test]
fn parallel_run_matches_single_jobs() {
    let config = ExperimentConfig::from_json(&descriptor("histogram")).unwrap();
    let experiment = config.build().unwrap();
    let report = experiment.run();
    for (job, res) in report.results.iter().enumerate() {
        assert_eq!(res, &experiment.run_job(job).unwrap());
    }
    assert!(matches!(
        experiment.run_job(4),
        Err(ApproxMiError::Config(ConfigError::JobOutOfRange { index: 4, jobs: 4 }))
    ));
}

#[test]
fn exact_strategy_results_are_independent_of_seed() {
    let mut config = ExperimentConfig::from_json(&descriptor("pairwise")).unwrap();
    let a = config.build().unwrap().run();
    config.seed = Some(99);
    let b = config.build().unwrap().run();
    assert_eq!(a.mutual_information(), b.mutual_information());
    assert_ne!(a.mean_errors(), b.mean_errors());
}

#[test]
fn set_pair_strategy_reports_empty_joints() {
    let report = ExperimentConfig::from_json(&descriptor("approx-set-pairs"))
        .unwrap()
        .build()
        .unwrap()
        .run();
    assert!(report.joint_stack().iter().all(|&p| p == 0.0));
    assert!(report.joint_entropies().iter().all(|&h| h == 0.0));
    assert!(report.marginal_cross_entropies().iter().all(|&h| h == 0.0));
}

#[test]
fn report_serialises_for_hand_off() {
    let report = ExperimentConfig::from_json(&descriptor("conditional"))
        .unwrap()
        .build()
        .unwrap()
        .run();
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"mutual_information\""));
    assert!(json.contains("\"mean_absolute_error\""));
}

#[test]
fn failing_gamma_does_not_affect_others() {
    // Built directly so that an out-of-range gamma reaches the estimator.
    let model = NoiseModel::parse("trunc-gauss_2", 5).unwrap();
    let error = ErrorStrategy::from_selector("sampled", 100).unwrap();
    let mi = MutualInformation::new_pairwise();
    let experiment = Experiment::new("partial", model, mi, error, vec![1, 7, 2], Some(3));

    let report = experiment.run();
    assert!(!report.is_complete());
    assert_eq!(report.gammas(), vec![1, 2]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].gamma, 7);
    assert_eq!(report.failures[0].job, 1);
}

#[rstest]
#[case("noise_model", "\"laplace_2\"")]
#[case("noise_model", "\"trunc-gauss_-2\"")]
#[case("mi_computing_type", "\"mi_computing_9\"")]
#[case("error_computing_type", "\"error_computing_2\"")]
#[case("number_solutions", "0")]
#[case("gamma_val_high", "12")]
#[case("gamma_val_step", "0")]
#[case("gamma_val_low", "-2")]
#[case("gamma_val_high", "9223372036854775807")]
#[case("repetitions_for_mi", "0")]
#[case("repetitions_for_error", "0")]
fn invalid_descriptors_are_config_errors(#[case] field: &str, #[case] value: &str) {
    let mut json: serde_json::Value = serde_json::from_str(&descriptor("histogram")).unwrap();
    json[field] = serde_json::from_str(value).unwrap();
    let config: ExperimentConfig = serde_json::from_value(json).unwrap();
    let built = config.build();
    assert!(matches!(built, Err(ApproxMiError::Config(_))), "{field}={value}");
}

#[rstest]
#[case("approx-set-pairs")]
#[case("pairwise")]
#[case("conditional")]
fn zero_mi_repetitions_are_rejected_for_exact_strategies(#[case] mi: &str) {
    let mut config = ExperimentConfig::from_json(&descriptor(mi)).unwrap();
    config.repetitions_for_mi = 0;
    assert!(matches!(
        config.build(),
        Err(ApproxMiError::Config(ConfigError::ZeroRepetitions("repetitions_for_mi")))
    ));
}

#[test]
fn huge_gamma_bound_is_rejected_before_running() {
    let mut config = ExperimentConfig::from_json(&descriptor("pairwise")).unwrap();
    config.gamma_val_high = i64::MAX;
    assert!(matches!(
        config.build(),
        Err(ApproxMiError::Config(ConfigError::GammaOutOfRange {
            gamma: 8,
            number_solutions: 8
        }))
    ));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        ExperimentConfig::from_json("{\"name\": 3}"),
        Err(ApproxMiError::Config(ConfigError::Parse(_)))
    ));
}
