// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Experiment descriptors and per-gamma evaluation.
//!
//! An [`ExperimentConfig`] is the plain descriptor handed over by an orchestration
//! layer. [`ExperimentConfig::build`] validates it once into an [`Experiment`], whose
//! jobs (one per gamma value) are independent: each gets its own random streams and
//! a failing job never affects the others.

use ndarray::{Array1, Array3};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::estimators::{
    ErrorEstimator, ErrorResult, ErrorStrategy, MiResult, MiStrategy, MutualInformationEstimator,
};
use crate::noise::NoiseModel;

const MI_STREAM: u64 = 0;
const ERROR_STREAM: u64 = 1;

/// Experiment descriptor, field for field as the orchestration layer stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub name: String,
    pub number_solutions: usize,
    /// Noise model identifier, e.g. `trunc-gauss_2`.
    pub noise_model: String,
    pub repetitions_for_mi: usize,
    pub repetitions_for_error: usize,
    pub mi_computing_type: String,
    pub error_computing_type: String,
    pub gamma_val_low: i64,
    pub gamma_val_high: i64,
    pub gamma_val_step: i64,
    /// Base seed for reproducible runs; OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ExperimentConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Gamma values `low, low + step, ...` below `high`.
    pub fn gammas(&self) -> std::result::Result<Vec<usize>, ConfigError> {
        gamma_range(
            self.gamma_val_low,
            self.gamma_val_high,
            self.gamma_val_step,
            self.number_solutions,
        )
    }

    /// Validate every field and resolve the model and strategies.
    pub fn build(&self) -> Result<Experiment> {
        let model = NoiseModel::parse(&self.noise_model, self.number_solutions)?;
        // Exact strategies ignore the count, but the descriptor must still be valid.
        if self.repetitions_for_mi == 0 {
            return Err(ConfigError::ZeroRepetitions("repetitions_for_mi").into());
        }
        let mi = MiStrategy::from_selector(&self.mi_computing_type, self.repetitions_for_mi)?;
        let error =
            ErrorStrategy::from_selector(&self.error_computing_type, self.repetitions_for_error)?;
        let gammas = self.gammas()?;
        Ok(Experiment {
            name: self.name.clone(),
            model,
            mi,
            error,
            gammas,
            seed: self.seed,
        })
    }
}

/// Half-open range `[low, high)` with stride `step`; every value must be `< number_solutions`.
pub fn gamma_range(
    low: i64,
    high: i64,
    step: i64,
    number_solutions: usize,
) -> std::result::Result<Vec<usize>, ConfigError> {
    if step < 1 || high <= low {
        return Err(ConfigError::InvalidGammaRange { low, high, step });
    }
    if low < 0 {
        return Err(ConfigError::NegativeGamma(low));
    }
    // Bound-check against the last value before materialising the range.
    let (lo, hi, st) = (i128::from(low), i128::from(high), i128::from(step));
    let n = number_solutions as i128;
    let last = lo + (hi - 1 - lo) / st * st;
    if last >= n {
        let first_out = if lo >= n {
            lo
        } else {
            lo + (n - lo + st - 1) / st * st
        };
        return Err(ConfigError::GammaOutOfRange {
            gamma: usize::try_from(first_out).unwrap_or(usize::MAX),
            number_solutions,
        });
    }
    let gammas = (low as usize..high as usize)
        .step_by(step as usize)
        .collect();
    Ok(gammas)
}

/// Results for one gamma value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GammaResult {
    pub job: usize,
    pub gamma: usize,
    pub mi: MiResult,
    pub error: ErrorResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GammaFailure {
    pub job: usize,
    pub gamma: usize,
    pub message: String,
}

/// A validated experiment.
#[derive(Debug, Clone)]
pub struct Experiment {
    name: String,
    model: NoiseModel,
    mi: MiStrategy,
    error: ErrorStrategy,
    gammas: Vec<usize>,
    seed: Option<u64>,
}

impl Experiment {
    pub fn new(
        name: impl Into<String>,
        model: NoiseModel,
        mi: MiStrategy,
        error: ErrorStrategy,
        gammas: Vec<usize>,
        seed: Option<u64>,
    ) -> Self {
        Self {
            name: name.into(),
            model,
            mi,
            error,
            gammas,
            seed,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &NoiseModel {
        &self.model
    }

    pub fn mi_strategy(&self) -> MiStrategy {
        self.mi
    }

    pub fn error_strategy(&self) -> ErrorStrategy {
        self.error
    }

    pub fn gammas(&self) -> &[usize] {
        &self.gammas
    }

    /// Independent stream `stream` of job `job`.
    fn rng(&self, job: usize, stream: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(derive_seed(seed, job, stream)),
            None => StdRng::from_entropy(),
        }
    }

    /// Evaluate a single gamma value: the selected MI strategy once, then the error.
    pub fn run_job(&self, job: usize) -> Result<GammaResult> {
        let gamma = *self
            .gammas
            .get(job)
            .ok_or(ConfigError::JobOutOfRange {
                index: job,
                jobs: self.gammas.len(),
            })?;

        tracing::debug!(experiment = %self.name, job, gamma, strategy = %self.mi, "running job");
        let mut mi_rng = self.rng(job, MI_STREAM);
        let mut error_rng = self.rng(job, ERROR_STREAM);
        let mi = self.mi.estimate(&self.model, gamma, &mut mi_rng)?;
        let error = self.error.estimate_error(&self.model, gamma, &mut error_rng)?;
        Ok(GammaResult {
            job,
            gamma,
            mi,
            error,
        })
    }

    /// Evaluate every gamma value in parallel, one task per value.
    pub fn run(&self) -> ExperimentReport {
        tracing::info!(
            experiment = %self.name,
            number_solutions = self.model.number_solutions(),
            noise_model = %self.model,
            mi = %self.mi,
            error = %self.error,
            jobs = self.gammas.len(),
            "starting experiment"
        );

        let outcomes: Vec<(usize, Result<GammaResult>)> = (0..self.gammas.len())
            .into_par_iter()
            .map(|job| (job, self.run_job(job)))
            .collect();

        let mut results = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for (job, outcome) in outcomes {
            match outcome {
                Ok(res) => results.push(res),
                Err(err) => {
                    let gamma = self.gammas[job];
                    tracing::warn!(experiment = %self.name, job, gamma, error = %err, "job failed");
                    failures.push(GammaFailure {
                        job,
                        gamma,
                        message: err.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            experiment = %self.name,
            succeeded = results.len(),
            failed = failures.len(),
            "experiment finished"
        );
        ExperimentReport {
            name: self.name.clone(),
            number_solutions: self.model.number_solutions(),
            results,
            failures,
        }
    }
}

fn derive_seed(seed: u64, job: usize, stream: u64) -> u64 {
    // splitmix64 finaliser over the combined key
    let mut z = seed
        .wrapping_add((job as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(stream.wrapping_mul(0xD1B5_4A32_D192_ED03));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Aggregated output of an experiment, ordered by job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub name: String,
    pub number_solutions: usize,
    pub results: Vec<GammaResult>,
    pub failures: Vec<GammaFailure>,
}

impl ExperimentReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn gammas(&self) -> Vec<usize> {
        self.results.iter().map(|r| r.gamma).collect()
    }

    pub fn mutual_information(&self) -> Array1<f64> {
        self.results.iter().map(|r| r.mi.mutual_information).collect()
    }

    pub fn joint_entropies(&self) -> Array1<f64> {
        self.results.iter().map(|r| r.mi.joint_entropy).collect()
    }

    pub fn marginal_cross_entropies(&self) -> Array1<f64> {
        self.results.iter().map(|r| r.mi.marginal_cross_entropy).collect()
    }

    pub fn mean_errors(&self) -> Array1<f64> {
        self.results.iter().map(|r| r.error.mean_absolute_error).collect()
    }

    pub fn std_errors(&self) -> Array1<f64> {
        self.results.iter().map(|r| r.error.std_absolute_error).collect()
    }

    /// Joint matrices stacked along the first axis; zeros where a strategy has none.
    pub fn joint_stack(&self) -> Array3<f64> {
        let n = self.number_solutions;
        let mut stack = Array3::<f64>::zeros((self.results.len(), n, n));
        for (mut slot, res) in stack.outer_iter_mut().zip(&self.results) {
            if let Some(joint) = &res.mi.joint {
                slot.assign(joint);
            }
        }
        stack
    }
}
