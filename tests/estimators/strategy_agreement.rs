// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approxmi::estimators::approaches::{HistogramMi, PairwiseMi};
use approxmi::estimators::{MutualInformation, MutualInformationEstimator};
use approxmi::noise::NoiseModel;
use rstest::rstest;

use crate::test_helpers::{all_models, assert_abs_diff_eq, mean_std, seeded};

fn exact_mi(strategy: &str, model: &NoiseModel, gamma: usize) -> f64 {
    let est = match strategy {
        "approx-set-pairs" => MutualInformation::new_approx_set_pairs(),
        "pairwise" => MutualInformation::new_pairwise(),
        "conditional" => MutualInformation::new_conditional(),
        _ => unreachable!(),
    };
    est.estimate(model, gamma, &mut seeded(0)).unwrap().mutual_information
}

#[rstest]
#[case(6, 0)]
#[case(6, 1)]
#[case(6, 3)]
#[case(9, 2)]
fn exact_strategies_agree_on_independent_channel(#[case] n: usize, #[case] gamma: usize) {
    let model = NoiseModel::parse("two-independent", n).unwrap();
    let a = exact_mi("approx-set-pairs", &model, gamma);
    let c = exact_mi("pairwise", &model, gamma);
    assert_abs_diff_eq!(a, c, epsilon = 1e-9);
    assert_abs_diff_eq!(a, 0.0, epsilon = 1e-9);
}

#[rstest]
#[case(4)]
#[case(7)]
fn exact_strategies_agree_on_singleton_sets(#[case] n: usize) {
    // With gamma = 0 both labels are the raw observations.
    for model in all_models(n) {
        let a = exact_mi("approx-set-pairs", &model, 0);
        let c = exact_mi("pairwise", &model, 0);
        assert_abs_diff_eq!(a, c, epsilon = 1e-9);
    }
}

#[test]
fn drawing_a_point_never_adds_information() {
    // The pairwise label is a randomised function of the set label.
    for model in all_models(7) {
        for gamma in 0..7 {
            let a = exact_mi("approx-set-pairs", &model, gamma);
            let c = exact_mi("pairwise", &model, gamma);
            assert!(
                c <= a + 1e-9,
                "{model} gamma={gamma}: pairwise {c} > set pairs {a}"
            );
            assert!(c >= -1e-9);
        }
    }
}

#[test]
fn deterministic_channel_reference_values() {
    let model = NoiseModel::one_peaked_running(8).unwrap();
    assert_abs_diff_eq!(exact_mi("approx-set-pairs", &model, 2), 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(exact_mi("pairwise", &model, 1), 1.0589, epsilon = 1e-4);
    assert_abs_diff_eq!(exact_mi("conditional", &model, 1), 1.5512, epsilon = 1e-4);
}

#[test]
fn truncated_gaussian_reference_values() {
    let model = NoiseModel::parse("trunc-gauss_2", 10).unwrap();
    let pairwise = exact_mi("pairwise", &model, 2);
    let set_pairs = exact_mi("approx-set-pairs", &model, 2);
    assert_abs_diff_eq!(pairwise, 0.177370400505, epsilon = 1e-9);
    assert_abs_diff_eq!(set_pairs, 0.326264332164, epsilon = 1e-9);
}

#[test]
fn histogram_converges_to_pairwise() {
    let (n, gamma) = (10, 2);
    let model = NoiseModel::parse("trunc-gauss_2", n).unwrap();
    let exact = exact_mi("pairwise", &model, gamma);

    let deviation = |repetitions: usize| -> (f64, f64) {
        let est = HistogramMi::new(repetitions).unwrap();
        let runs: Vec<f64> = (0..6)
            .map(|seed| {
                est.estimate(&model, gamma, &mut seeded(100 + seed))
                    .unwrap()
                    .mutual_information
            })
            .collect();
        let (mean, std) = mean_std(&runs);
        ((mean - exact).abs(), std)
    };

    let (bias_small, std_small) = deviation(100);
    let (bias_large, std_large) = deviation(100_000);
    assert!(bias_large < bias_small, "bias {bias_large} !< {bias_small}");
    assert!(std_large < std_small, "std {std_large} !< {std_small}");
    assert!(bias_large < 0.01, "bias {bias_large} at 100k repetitions");
}

#[test]
fn histogram_joint_approaches_pairwise_joint() {
    let (n, gamma) = (8, 1);
    let model = NoiseModel::parse("trunc-gauss_1.5", n).unwrap();
    let exact = PairwiseMi::joint(&model, gamma);
    let sampled = HistogramMi::new(200_000)
        .unwrap()
        .estimate(&model, gamma, &mut seeded(21))
        .unwrap()
        .joint
        .unwrap();
    for (e, s) in exact.iter().zip(sampled.iter()) {
        assert_abs_diff_eq!(e, s, epsilon = 3e-3);
    }
}

#[test]
fn out_of_range_gamma_is_rejected_by_every_strategy() {
    let model = NoiseModel::parse("trunc-gauss_2", 5).unwrap();
    for strategy in ["approx-set-pairs", "histogram", "pairwise", "conditional"] {
        let est = approxmi::MiStrategy::from_selector(strategy, 10).unwrap();
        let (rejected, accepted) = (
            est.estimate(&model, 5, &mut seeded(1)),
            est.estimate(&model, 4, &mut seeded(1)),
        );
        assert!(rejected.is_err(), "{strategy}");
        assert!(accepted.is_ok(), "{strategy}");
    }
}
