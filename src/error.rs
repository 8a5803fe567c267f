// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Top-level error type for approxmi.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApproxMiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Numeric degeneracy: {0}")]
    Numeric(#[from] NumericError),
}

pub type Result<T> = std::result::Result<T, ApproxMiError>;

/// Invalid experiment or model configuration. Always fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Unknown noise model: {0:?}")]
    UnknownNoiseModel(String),

    #[error("Noise model {model:?} requires parameter {parameter}")]
    MissingParameter {
        model: String,
        parameter: &'static str,
    },

    #[error("Invalid parameter for {model:?}: {value:?}")]
    InvalidParameter { model: String, value: String },

    #[error("Invalid sigma: {0} (must be > 0)")]
    NonPositiveSigma(f64),

    #[error("number_solutions must be > 0")]
    NonPositiveSolutionCount,

    #[error("Invalid gamma: {0} (must be >= 0)")]
    NegativeGamma(i64),

    #[error("gamma {gamma} out of range for {number_solutions} solutions")]
    GammaOutOfRange {
        gamma: usize,
        number_solutions: usize,
    },

    #[error("Invalid gamma range: low={low}, high={high}, step={step}")]
    InvalidGammaRange { low: i64, high: i64, step: i64 },

    #[error("Job {index} out of range for {jobs} gamma values")]
    JobOutOfRange { index: usize, jobs: usize },

    #[error("{0} must be > 0")]
    ZeroRepetitions(&'static str),

    #[error("Unknown mutual information strategy: {0:?}")]
    UnknownMiStrategy(String),

    #[error("Unknown error estimator: {0:?}")]
    UnknownErrorEstimator(String),

    #[error("Malformed experiment descriptor: {0}")]
    Parse(String),
}

/// Intermediate probabilities that cannot occur in a correct computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    #[error("negative probability {value} in {context}")]
    NegativeProbability { context: &'static str, value: f64 },

    #[error("non-finite value {value} in {context}")]
    NotFinite { context: &'static str, value: f64 },

    #[error("observation distribution for mu={mu} carries no mass")]
    DegenerateDistribution { mu: usize },
}
