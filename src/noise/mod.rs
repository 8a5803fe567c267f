// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Noise models: a prior over hidden values `mu` in `[0, N)` and the conditional
//! distribution of an observation `x` given `mu`.
//!
//! Models are parsed once from identifiers of the form `<variant>_<param...>`:
//!
//! | Identifier | Prior | Likelihood |
//! |------------|-------|------------|
//! | `trunc-gauss_<sigma>` | uniform | discretised normal truncated to `[0, N-1]` |
//! | `one-peaked-debug_<mu0>` | point mass at index 0 | `x == mu` |
//! | `one-peaked-running-debug` | uniform | `x == mu` |
//! | `two-independent` | uniform | uniform, independent of `mu` |

pub mod truncated_gaussian;

use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use std::fmt;

use crate::error::{ConfigError, NumericError, Result};
pub use truncated_gaussian::TruncatedGaussian;

pub const TRUNC_GAUSS: &str = "trunc-gauss";
pub const ONE_PEAKED_DEBUG: &str = "one-peaked-debug";
pub const ONE_PEAKED_RUNNING_DEBUG: &str = "one-peaked-running-debug";
pub const TWO_INDEPENDENT: &str = "two-independent";

/// The four noise-model variants with their typed parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseKind {
    TruncatedGaussian(TruncatedGaussian),
    /// Deterministic channel. The prior puts all mass on index 0; `mu0` is kept
    /// for the identifier only.
    OnePeakedFixed { mu0: f64 },
    /// Deterministic channel with a uniform prior.
    OnePeakedRunning,
    /// Observations carry no information about `mu`.
    TwoIndependent,
}

impl NoiseKind {
    /// Parse an identifier such as `trunc-gauss_2.5`.
    pub fn parse(identifier: &str) -> std::result::Result<Self, ConfigError> {
        let mut parts = identifier.split('_');
        let variant = parts.next().unwrap_or_default();
        let params: Vec<&str> = parts.collect();

        let kind = match variant {
            TRUNC_GAUSS => {
                let sigma = single_param(identifier, &params, "sigma")?;
                NoiseKind::TruncatedGaussian(TruncatedGaussian::new(sigma)?)
            }
            ONE_PEAKED_DEBUG => {
                let mu0 = single_param(identifier, &params, "mu0")?;
                NoiseKind::OnePeakedFixed { mu0 }
            }
            ONE_PEAKED_RUNNING_DEBUG => {
                no_params(identifier, &params)?;
                NoiseKind::OnePeakedRunning
            }
            TWO_INDEPENDENT => {
                no_params(identifier, &params)?;
                NoiseKind::TwoIndependent
            }
            _ => return Err(ConfigError::UnknownNoiseModel(identifier.to_string())),
        };
        Ok(kind)
    }

    fn prior(&self, mu: usize, n: usize) -> f64 {
        match self {
            NoiseKind::OnePeakedFixed { .. } => {
                if mu == 0 { 1.0 } else { 0.0 }
            }
            NoiseKind::TruncatedGaussian(_)
            | NoiseKind::OnePeakedRunning
            | NoiseKind::TwoIndependent => 1.0 / n as f64,
        }
    }

    fn likelihood(&self, x: usize, mu: usize, n: usize) -> f64 {
        match self {
            NoiseKind::TruncatedGaussian(tg) => tg.mass(x, mu, n),
            NoiseKind::OnePeakedFixed { .. } | NoiseKind::OnePeakedRunning => {
                if x == mu { 1.0 } else { 0.0 }
            }
            NoiseKind::TwoIndependent => 1.0 / n as f64,
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseKind::TruncatedGaussian(tg) => write!(f, "{TRUNC_GAUSS}_{}", tg.sigma()),
            NoiseKind::OnePeakedFixed { mu0 } => write!(f, "{ONE_PEAKED_DEBUG}_{mu0}"),
            NoiseKind::OnePeakedRunning => f.write_str(ONE_PEAKED_RUNNING_DEBUG),
            NoiseKind::TwoIndependent => f.write_str(TWO_INDEPENDENT),
        }
    }
}

fn single_param(
    identifier: &str,
    params: &[&str],
    name: &'static str,
) -> std::result::Result<f64, ConfigError> {
    match params {
        [] => Err(ConfigError::MissingParameter {
            model: identifier.to_string(),
            parameter: name,
        }),
        [raw] => raw.parse::<f64>().map_err(|_| ConfigError::InvalidParameter {
            model: identifier.to_string(),
            value: raw.to_string(),
        }),
        [_, extra, ..] => Err(ConfigError::InvalidParameter {
            model: identifier.to_string(),
            value: extra.to_string(),
        }),
    }
}

fn no_params(identifier: &str, params: &[&str]) -> std::result::Result<(), ConfigError> {
    match params.first() {
        None => Ok(()),
        Some(extra) => Err(ConfigError::InvalidParameter {
            model: identifier.to_string(),
            value: extra.to_string(),
        }),
    }
}

/// Two observations drawn independently given the same hidden value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationPair {
    pub x1: usize,
    pub x2: usize,
    pub mu: usize,
}

/// Immutable noise model over a solution space of size `N`.
///
/// Prior and likelihood tables are evaluated and validated once at construction,
/// so every query afterwards is a lookup and the model can be shared freely
/// across threads.
#[derive(Debug, Clone)]
pub struct NoiseModel {
    kind: NoiseKind,
    number_solutions: usize,
    prior: Array1<f64>,
    /// Rows indexed by `mu`, columns by `x`.
    likelihood: Array2<f64>,
    samplers: Vec<WeightedIndex<f64>>,
}

impl NoiseModel {
    /// Build a model from an identifier string, e.g. `"trunc-gauss_2"`.
    pub fn parse(identifier: &str, number_solutions: usize) -> Result<Self> {
        let kind = NoiseKind::parse(identifier)?;
        Self::new(kind, number_solutions)
    }

    pub fn new(kind: NoiseKind, number_solutions: usize) -> Result<Self> {
        let n = number_solutions;
        if n == 0 {
            return Err(ConfigError::NonPositiveSolutionCount.into());
        }

        let prior = Array1::from_shape_fn(n, |mu| kind.prior(mu, n));
        let likelihood = Array2::from_shape_fn((n, n), |(mu, x)| kind.likelihood(x, mu, n));

        if let Some(&bad) = likelihood.iter().find(|p| !p.is_finite()) {
            return Err(NumericError::NotFinite {
                context: "likelihood table",
                value: bad,
            }
            .into());
        }

        let samplers = likelihood
            .outer_iter()
            .enumerate()
            .map(|(mu, row)| {
                WeightedIndex::<f64>::new(row.iter().copied())
                    .map_err(|_| NumericError::DegenerateDistribution { mu }.into())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            kind,
            number_solutions: n,
            prior,
            likelihood,
            samplers,
        })
    }

    pub fn truncated_gaussian(sigma: f64, number_solutions: usize) -> Result<Self> {
        let tg = TruncatedGaussian::new(sigma)?;
        Self::new(NoiseKind::TruncatedGaussian(tg), number_solutions)
    }

    pub fn one_peaked_fixed(mu0: f64, number_solutions: usize) -> Result<Self> {
        Self::new(NoiseKind::OnePeakedFixed { mu0 }, number_solutions)
    }

    pub fn one_peaked_running(number_solutions: usize) -> Result<Self> {
        Self::new(NoiseKind::OnePeakedRunning, number_solutions)
    }

    pub fn two_independent(number_solutions: usize) -> Result<Self> {
        Self::new(NoiseKind::TwoIndependent, number_solutions)
    }

    #[inline]
    pub fn kind(&self) -> &NoiseKind {
        &self.kind
    }

    #[inline]
    pub fn number_solutions(&self) -> usize {
        self.number_solutions
    }

    /// Prior probability of hidden value `mu`; zero outside the solution space.
    #[inline]
    pub fn prior(&self, mu: usize) -> f64 {
        self.prior.get(mu).copied().unwrap_or(0.0)
    }

    /// Probability of observing `x` given hidden value `mu`; zero outside the solution space.
    #[inline]
    pub fn likelihood(&self, x: usize, mu: usize) -> f64 {
        self.likelihood.get((mu, x)).copied().unwrap_or(0.0)
    }

    pub fn prior_vector(&self) -> ArrayView1<'_, f64> {
        self.prior.view()
    }

    /// Likelihood table with rows indexed by `mu` and columns by `x`.
    pub fn likelihood_matrix(&self) -> &Array2<f64> {
        &self.likelihood
    }

    /// Distribution of a single observation given `mu`.
    pub fn observation_distribution(&self, mu: usize) -> ArrayView1<'_, f64> {
        self.likelihood.row(mu)
    }

    /// Draw `mu` uniformly, then two observations independently from `likelihood(., mu)`.
    pub fn sample_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> ObservationPair {
        let mu = rng.gen_range(0..self.number_solutions);
        let sampler = &self.samplers[mu];
        let x1 = sampler.sample(rng);
        let x2 = sampler.sample(rng);
        ObservationPair { x1, x2, mu }
    }
}

impl fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}
