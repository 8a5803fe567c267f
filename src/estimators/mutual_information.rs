// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use rand::Rng;
use std::fmt;

use crate::error::{ConfigError, Result};
use crate::estimators::approaches::{ApproxSetPairsMi, ConditionalMi, HistogramMi, PairwiseMi};
pub use crate::estimators::traits::{MiResult, MutualInformationEstimator};
use crate::noise::NoiseModel;

/// The four mutual information strategies, selectable at run time.
///
/// | Selector | Legacy selector | Strategy |
/// |----------|-----------------|----------|
/// | `approx-set-pairs` | `mi_computing_1` | exact, summed over approximation-set pairs |
/// | `histogram` | `mi_computing_2` | Monte-Carlo histogram |
/// | `pairwise` | `mi_computing_3` | exact, explicit pairwise marginalisation |
/// | `conditional` | `mi_computing_4` | reported point vs. hidden value |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiStrategy {
    ApproxSetPairs(ApproxSetPairsMi),
    Histogram(HistogramMi),
    Pairwise(PairwiseMi),
    Conditional(ConditionalMi),
}

impl MiStrategy {
    /// Resolve a selector. `repetitions_for_mi` is only consulted by the histogram.
    pub fn from_selector(
        selector: &str,
        repetitions_for_mi: usize,
    ) -> std::result::Result<Self, ConfigError> {
        match selector {
            "approx-set-pairs" | "mi_computing_1" => Ok(MutualInformation::new_approx_set_pairs()),
            "histogram" | "mi_computing_2" => MutualInformation::new_histogram(repetitions_for_mi),
            "pairwise" | "mi_computing_3" => Ok(MutualInformation::new_pairwise()),
            "conditional" | "mi_computing_4" => Ok(MutualInformation::new_conditional()),
            other => Err(ConfigError::UnknownMiStrategy(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MiStrategy::ApproxSetPairs(_) => "approx-set-pairs",
            MiStrategy::Histogram(_) => "histogram",
            MiStrategy::Pairwise(_) => "pairwise",
            MiStrategy::Conditional(_) => "conditional",
        }
    }

    /// Whether the strategy consumes randomness.
    pub fn is_sampled(&self) -> bool {
        matches!(self, MiStrategy::Histogram(_))
    }
}

impl fmt::Display for MiStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl MutualInformationEstimator for MiStrategy {
    fn estimate<R: Rng + ?Sized>(
        &self,
        model: &NoiseModel,
        gamma: usize,
        rng: &mut R,
    ) -> Result<MiResult> {
        match self {
            MiStrategy::ApproxSetPairs(est) => est.estimate(model, gamma, rng),
            MiStrategy::Histogram(est) => est.estimate(model, gamma, rng),
            MiStrategy::Pairwise(est) => est.estimate(model, gamma, rng),
            MiStrategy::Conditional(est) => est.estimate(model, gamma, rng),
        }
    }
}

/// Factory for mutual information strategies.
pub struct MutualInformation;

impl MutualInformation {
    /// Exact MI between approximation-set labels, O(N⁴) in the worst case.
    pub fn new_approx_set_pairs() -> MiStrategy {
        MiStrategy::ApproxSetPairs(ApproxSetPairsMi::new())
    }

    /// Monte-Carlo histogram estimate with `repetitions` sampled pairs.
    pub fn new_histogram(repetitions: usize) -> std::result::Result<MiStrategy, ConfigError> {
        HistogramMi::new(repetitions).map(MiStrategy::Histogram)
    }

    /// Exact joint over points drawn from two approximation sets.
    pub fn new_pairwise() -> MiStrategy {
        MiStrategy::Pairwise(PairwiseMi::new())
    }

    /// MI between a point drawn from the approximation set and the hidden value.
    pub fn new_conditional() -> MiStrategy {
        MiStrategy::Conditional(ConditionalMi::new())
    }
}
