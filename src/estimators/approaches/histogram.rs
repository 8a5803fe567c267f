// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, s};
use rand::Rng;

use super::joint::{normalize_in_place, summarize};
use super::validate_gamma;
use crate::error::{ConfigError, Result};
use crate::estimators::traits::{MiResult, MutualInformationEstimator};
use crate::geometry::ApproxSet;
use crate::noise::NoiseModel;

/// Monte-Carlo histogram estimate of the mutual information between points drawn
/// uniformly from two approximation sets.
///
/// Each trial samples `(x1, x2, mu)`, spreads mass `1 / (|S1| |S2|)` uniformly over
/// `S1 × S2` in a joint histogram over observation values, and half of `1 / |S|` over
/// each set in a single-axis histogram. Both are normalised after all trials.
///
/// The estimate is consistent: its expectation is the joint computed exactly by
/// [`PairwiseMi`](super::PairwiseMi), with bias and variance shrinking as the number
/// of repetitions grows. Cost is O(repetitions × gamma²), independent of N⁴.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramMi {
    repetitions: usize,
}

impl HistogramMi {
    pub fn new(repetitions: usize) -> std::result::Result<Self, ConfigError> {
        if repetitions == 0 {
            return Err(ConfigError::ZeroRepetitions("repetitions_for_mi"));
        }
        Ok(Self { repetitions })
    }

    #[inline]
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }
}

impl MutualInformationEstimator for HistogramMi {
    fn estimate<R: Rng + ?Sized>(
        &self,
        model: &NoiseModel,
        gamma: usize,
        rng: &mut R,
    ) -> Result<MiResult> {
        let n = model.number_solutions();
        validate_gamma(gamma, n)?;

        let mut p_joint = Array2::<f64>::zeros((n, n));
        let mut p_single = Array1::<f64>::zeros(n);

        for _ in 0..self.repetitions {
            let pair = model.sample_pair(rng);
            let s1 = ApproxSet::around(pair.x1, gamma, n);
            let s2 = ApproxSet::around(pair.x2, gamma, n);
            let (len1, len2) = (s1.len() as f64, s2.len() as f64);

            p_joint
                .slice_mut(s![s1.lo..s1.hi, s2.lo..s2.hi])
                .mapv_inplace(|v| v + 1.0 / (len1 * len2));
            p_single.slice_mut(s![s1.lo..s1.hi]).mapv_inplace(|v| v + 0.5 / len1);
            p_single.slice_mut(s![s2.lo..s2.hi]).mapv_inplace(|v| v + 0.5 / len2);
        }

        normalize_in_place(&mut p_joint);
        normalize_in_place(&mut p_single);

        let summary = summarize(&p_joint, p_single.view(), p_single.view())?;
        tracing::debug!(
            strategy = "histogram",
            gamma,
            repetitions = self.repetitions,
            mi = summary.mutual_information,
            "estimate complete"
        );
        Ok(MiResult::with_joint(p_joint, summary))
    }
}
