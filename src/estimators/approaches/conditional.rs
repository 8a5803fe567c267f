// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array2;
use rand::Rng;

use super::joint::{check_all, marginals, summarize};
use super::validate_gamma;
use crate::error::Result;
use crate::estimators::traits::{MiResult, MutualInformationEstimator};
use crate::geometry::{ApproxSet, set_lengths};
use crate::noise::NoiseModel;

/// Mutual information between a point drawn from the approximation set and the
/// hidden value itself.
///
/// p(i, mu) = p(mu) Σ_{x ∈ S(i)} p(x | mu) / |S(x)|
///
/// This is a different quantity from the other strategies, which relate two
/// independently observed labels. Entropy terms are not computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionalMi;

impl ConditionalMi {
    pub fn new() -> Self {
        Self
    }

    /// Joint matrix with rows indexed by the reported point `i` and columns by `mu`.
    pub fn joint(model: &NoiseModel, gamma: usize) -> Array2<f64> {
        let n = model.number_solutions();
        let lengths = set_lengths(gamma, n);
        Array2::from_shape_fn((n, n), |(i, mu)| {
            let p_i_given_mu: f64 = ApproxSet::around(i, gamma, n)
                .range()
                .map(|x| model.likelihood(x, mu) / lengths[x] as f64)
                .sum();
            model.prior(mu) * p_i_given_mu
        })
    }
}

impl MutualInformationEstimator for ConditionalMi {
    fn estimate<R: Rng + ?Sized>(
        &self,
        model: &NoiseModel,
        gamma: usize,
        _rng: &mut R,
    ) -> Result<MiResult> {
        validate_gamma(gamma, model.number_solutions())?;

        let p_joint = Self::joint(model, gamma);
        check_all(p_joint.iter(), "conditional joint")?;
        let (p_i, p_mu) = marginals(&p_joint);

        let mi = summarize(&p_joint, p_i.view(), p_mu.view())?.mutual_information;
        tracing::debug!(strategy = "conditional", gamma, mi, "estimate complete");
        Ok(MiResult::joint_only(mi, p_joint))
    }
}
