// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array2, Axis};
use rand::Rng;

use super::joint::{check_all, summarize};
use super::validate_gamma;
use crate::error::Result;
use crate::estimators::traits::{MiResult, MutualInformationEstimator};
use crate::geometry::{ApproxSet, set_lengths};
use crate::noise::NoiseModel;

/// Exact joint over points drawn uniformly from two approximation sets, built by
/// explicit marginalisation over the raw observation pairs.
///
/// For every upper-triangular index pair `(i, j)` and every `(x1, x2)` in
/// `S(i) × S(j)`:
///
/// p(i, j) += p(x1, x2) / (|S(x1)| |S(x2)|),  p(x1, x2) = Σ_mu p(mu) p(x1|mu) p(x2|mu)
///
/// mirrored into `p(j, i)`. The Monte-Carlo histogram converges to this matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairwiseMi;

impl PairwiseMi {
    pub fn new() -> Self {
        Self
    }

    /// `p(x1, x2)` for all observation pairs: `Lᵀ diag(prior) L`.
    pub fn observation_pair_table(model: &NoiseModel) -> Array2<f64> {
        let likelihood = model.likelihood_matrix();
        let prior = model.prior_vector().insert_axis(Axis(1));
        let weighted = likelihood * &prior;
        likelihood.t().dot(&weighted)
    }

    /// The symmetric joint matrix over index pairs.
    pub fn joint(model: &NoiseModel, gamma: usize) -> Array2<f64> {
        let n = model.number_solutions();
        let pair_table = Self::observation_pair_table(model);
        let lengths = set_lengths(gamma, n);

        let mut p_joint = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            let around_i = ApproxSet::around(i, gamma, n);
            for j in i..n {
                let around_j = ApproxSet::around(j, gamma, n);
                let mut acc = 0.0_f64;
                for x1 in around_i.range() {
                    for x2 in around_j.range() {
                        acc += pair_table[[x1, x2]] / (lengths[x1] * lengths[x2]) as f64;
                    }
                }
                p_joint[[i, j]] = acc;
                p_joint[[j, i]] = acc;
            }
        }
        p_joint
    }
}

impl MutualInformationEstimator for PairwiseMi {
    fn estimate<R: Rng + ?Sized>(
        &self,
        model: &NoiseModel,
        gamma: usize,
        _rng: &mut R,
    ) -> Result<MiResult> {
        validate_gamma(gamma, model.number_solutions())?;

        let p_joint = Self::joint(model, gamma);
        check_all(p_joint.iter(), "pairwise joint")?;
        // Symmetric, so row and column marginals coincide.
        let p_single = p_joint.sum_axis(Axis(1));

        let summary = summarize(&p_joint, p_single.view(), p_single.view())?;
        tracing::debug!(
            strategy = "pairwise",
            gamma,
            mi = summary.mutual_information,
            "estimate complete"
        );
        Ok(MiResult::with_joint(p_joint, summary))
    }
}
