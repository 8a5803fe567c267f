// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approxmi::noise::NoiseModel;

use crate::test_helpers::{assert_abs_diff_eq, seeded};

#[test]
fn deterministic_channels_repeat_mu() {
    let mut rng = seeded(5);
    for model in [
        NoiseModel::one_peaked_running(9).unwrap(),
        NoiseModel::one_peaked_fixed(4.0, 9).unwrap(),
    ] {
        for _ in 0..1_000 {
            let pair = model.sample_pair(&mut rng);
            assert_eq!(pair.x1, pair.mu);
            assert_eq!(pair.x2, pair.mu);
        }
    }
}

#[test]
fn hidden_value_is_uniform() {
    // mu is drawn uniformly even when the prior is a point mass.
    let model = NoiseModel::one_peaked_fixed(0.0, 5).unwrap();
    let mut rng = seeded(6);
    let draws = 50_000;
    let mut counts = [0usize; 5];
    for _ in 0..draws {
        counts[model.sample_pair(&mut rng).mu] += 1;
    }
    for c in counts {
        assert_abs_diff_eq!(c as f64 / draws as f64, 0.2, epsilon = 0.01);
    }
}

#[test]
fn observations_follow_likelihood() {
    let model = NoiseModel::truncated_gaussian(1.5, 7).unwrap();
    let mut rng = seeded(7);
    let mut counts = vec![[0usize; 7]; 7];
    let mut per_mu = [0usize; 7];
    for _ in 0..140_000 {
        let pair = model.sample_pair(&mut rng);
        counts[pair.mu][pair.x1] += 1;
        counts[pair.mu][pair.x2] += 1;
        per_mu[pair.mu] += 2;
    }
    for mu in 0..7 {
        for x in 0..7 {
            let freq = counts[mu][x] as f64 / per_mu[mu] as f64;
            assert_abs_diff_eq!(freq, model.likelihood(x, mu), epsilon = 0.01);
        }
    }
}

#[test]
fn independent_channel_ignores_mu() {
    let model = NoiseModel::two_independent(4).unwrap();
    let mut rng = seeded(8);
    let mut same = 0usize;
    let draws = 40_000;
    for _ in 0..draws {
        let pair = model.sample_pair(&mut rng);
        if pair.x1 == pair.mu {
            same += 1;
        }
    }
    assert_abs_diff_eq!(same as f64 / draws as f64, 0.25, epsilon = 0.01);
}

#[test]
fn seeded_sampling_is_reproducible() {
    let model = NoiseModel::truncated_gaussian(3.0, 12).unwrap();
    let (mut a, mut b) = (seeded(9), seeded(9));
    for _ in 0..100 {
        assert_eq!(model.sample_pair(&mut a), model.sample_pair(&mut b));
    }
}
