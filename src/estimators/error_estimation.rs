// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;
use rand::Rng;
use std::fmt;

use crate::error::{ConfigError, Result};
pub use crate::estimators::traits::{ErrorEstimator, ErrorResult};
use crate::geometry::ApproxSet;
use crate::noise::NoiseModel;

/// Monte-Carlo estimate of `|reported - mu|`, where `reported` is drawn uniformly from
/// the approximation set around one observation of `mu`.
///
/// Returns the mean and the population standard deviation over all trials. Any
/// `gamma` is accepted; radii of `N` or more report from the whole domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampledError {
    repetitions: usize,
}

impl SampledError {
    pub fn new(repetitions: usize) -> std::result::Result<Self, ConfigError> {
        if repetitions == 0 {
            return Err(ConfigError::ZeroRepetitions("repetitions_for_error"));
        }
        Ok(Self { repetitions })
    }

    #[inline]
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }
}

impl ErrorEstimator for SampledError {
    fn estimate_error<R: Rng + ?Sized>(
        &self,
        model: &NoiseModel,
        gamma: usize,
        rng: &mut R,
    ) -> Result<ErrorResult> {
        let n = model.number_solutions();
        let mut errors = Array1::<f64>::zeros(self.repetitions);
        for err in errors.iter_mut() {
            let pair = model.sample_pair(rng);
            let set = ApproxSet::around(pair.x1, gamma, n);
            let reported = rng.gen_range(set.lo..set.hi);
            *err = reported.abs_diff(pair.mu) as f64;
        }

        let result = ErrorResult {
            mean_absolute_error: errors.mean().unwrap_or(0.0),
            std_absolute_error: errors.std(0.0),
        };
        tracing::debug!(
            gamma,
            mean = result.mean_absolute_error,
            std = result.std_absolute_error,
            "error estimate complete"
        );
        Ok(result)
    }
}

/// Error estimators selectable at run time. Only the sampled estimator exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStrategy {
    Sampled(SampledError),
}

impl ErrorStrategy {
    pub fn from_selector(
        selector: &str,
        repetitions_for_error: usize,
    ) -> std::result::Result<Self, ConfigError> {
        match selector {
            "sampled" | "error_computing_1" => {
                SampledError::new(repetitions_for_error).map(ErrorStrategy::Sampled)
            }
            other => Err(ConfigError::UnknownErrorEstimator(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorStrategy::Sampled(_) => "sampled",
        }
    }
}

impl fmt::Display for ErrorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ErrorEstimator for ErrorStrategy {
    fn estimate_error<R: Rng + ?Sized>(
        &self,
        model: &NoiseModel,
        gamma: usize,
        rng: &mut R,
    ) -> Result<ErrorResult> {
        match self {
            ErrorStrategy::Sampled(est) => est.estimate_error(model, gamma, rng),
        }
    }
}
