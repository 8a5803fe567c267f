// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # approxmi
//!
//! Mutual information and estimation error of approximation sets reported by a
//! noisy channel over a discrete solution space `[0, N)`.
//!
//! A hidden value `mu` is observed through a [`NoiseModel`]; the channel reports the
//! approximation set `[x - gamma, x + gamma]` (clipped to the domain) around each
//! observation `x`. This crate measures how much two such reports share, and how far
//! a point drawn from a report lies from `mu`.
//!
//! ## Quick Start
//!
//! ```rust
//! use approxmi::estimators::{MutualInformation, MutualInformationEstimator};
//! use approxmi::noise::NoiseModel;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let model = NoiseModel::parse("trunc-gauss_2", 10).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! // Exact
//! let exact = MutualInformation::new_pairwise().estimate(&model, 2, &mut rng).unwrap();
//! // Monte-Carlo
//! let sampled = MutualInformation::new_histogram(10_000)
//!     .unwrap()
//!     .estimate(&model, 2, &mut rng)
//!     .unwrap();
//! assert!((exact.mutual_information - sampled.mutual_information).abs() < 0.5);
//! ```
//!
//! ## Strategies
//!
//! | Strategy | Kind | Quantity | Joint | Entropies |
//! |----------|------|----------|-------|-----------|
//! | `approx-set-pairs` | exact | I(S1; S2) over set labels | ❌ | ❌ |
//! | `histogram` | Monte-Carlo | I(i; j), points drawn from S1, S2 | ✅ | ✅ |
//! | `pairwise` | exact | I(i; j), points drawn from S1, S2 | ✅ | ✅ |
//! | `conditional` | exact | I(i; mu), point drawn from S vs. hidden value | ✅ | ❌ |
//!
//! All values are in bits. Probabilities within `1e-8` of zero are skipped in the
//! sums; negative or non-finite probabilities are reported as
//! [`NumericError`](error::NumericError).
//!
//! ## Architecture
//!
//! 1. **Noise models** ([`noise`]): typed variants parsed once from identifiers,
//!    with cached prior and likelihood tables.
//! 2. **Geometry** ([`geometry`]): approximation sets and their inversion.
//! 3. **Estimators** ([`estimators`]): MI strategies and the sampled error estimator.
//! 4. **Experiments** ([`experiment`]): validated descriptors, one parallel job per gamma.

pub mod error;
pub mod estimators;
pub mod experiment;
pub mod geometry;
pub mod noise;

pub use error::{ApproxMiError, ConfigError, NumericError, Result};
pub use estimators::{
    ErrorEstimator, ErrorResult, ErrorStrategy, MiResult, MiStrategy, MutualInformation,
    MutualInformationEstimator,
};
pub use experiment::{Experiment, ExperimentConfig, ExperimentReport, GammaResult};
pub use geometry::{ApproxSet, approx_set};
pub use noise::{NoiseKind, NoiseModel, ObservationPair};
