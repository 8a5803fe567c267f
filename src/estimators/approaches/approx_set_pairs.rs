// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, Axis};
use rand::Rng;

use super::joint::{check_all, summarize};
use super::validate_gamma;
use crate::error::Result;
use crate::estimators::traits::{MiResult, MutualInformationEstimator};
use crate::geometry::ApproxSet;
use crate::noise::NoiseModel;

/// Exact mutual information between the approximation sets reported for two
/// independent observations of the same hidden value.
///
/// Every interval `[lo, hi)` of the solution space (upper-triangular enumeration of
/// `lo <= hi - 1`) is a candidate label. `P(S | mu)` sums the likelihood over the
/// observations whose approximation set is exactly `S`, then
///
/// I = Σ_{S1,S2} P(S1,S2) log2( P(S1,S2) / (P(S1) P(S2)) ),
/// P(S1,S2) = Σ_mu p(mu) P(S1|mu) P(S2|mu).
///
/// Intervals no observation can produce have `P(S | mu) = 0` and are dropped before
/// the pair summation. No joint matrix over observation indices exists for this
/// strategy, so the result carries `joint: None` and zero entropy placeholders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApproxSetPairsMi;

impl ApproxSetPairsMi {
    pub fn new() -> Self {
        Self
    }

    /// `P(S | mu)` for one set and hidden value.
    pub fn set_given_mu(model: &NoiseModel, set: ApproxSet, gamma: usize, mu: usize) -> f64 {
        let n = model.number_solutions();
        set.centers(gamma, n).map(|x| model.likelihood(x, mu)).sum()
    }

    /// Reachable approximation sets and the table `P(S | mu)` (rows: sets, cols: mu).
    pub fn conditional_table(model: &NoiseModel, gamma: usize) -> (Vec<ApproxSet>, Array2<f64>) {
        let n = model.number_solutions();
        let sets: Vec<ApproxSet> = (0..n)
            .flat_map(|lo| (lo..n).map(move |last| ApproxSet { lo, hi: last + 1 }))
            .filter(|set| !set.centers(gamma, n).is_empty())
            .collect();

        let table = Array2::from_shape_fn((sets.len(), n), |(s, mu)| {
            Self::set_given_mu(model, sets[s], gamma, mu)
        });
        (sets, table)
    }

    fn compute(&self, model: &NoiseModel, gamma: usize) -> Result<MiResult> {
        validate_gamma(gamma, model.number_solutions())?;

        let (_, conditional) = Self::conditional_table(model, gamma);
        check_all(conditional.iter(), "P(S | mu)")?;

        let prior: Array1<f64> = model.prior_vector().to_owned();
        let weighted = &conditional * &prior.view().insert_axis(Axis(0));
        let pair_joint = weighted.dot(&conditional.t());
        let set_marginal = conditional.dot(&prior);

        let summary = summarize(&pair_joint, set_marginal.view(), set_marginal.view())?;
        tracing::debug!(
            strategy = "approx-set-pairs",
            gamma,
            sets = set_marginal.len(),
            mi = summary.mutual_information,
            "estimate complete"
        );
        Ok(MiResult::scalar(summary.mutual_information))
    }
}

impl MutualInformationEstimator for ApproxSetPairsMi {
    fn estimate<R: Rng + ?Sized>(
        &self,
        model: &NoiseModel,
        gamma: usize,
        _rng: &mut R,
    ) -> Result<MiResult> {
        self.compute(model, gamma)
    }
}
