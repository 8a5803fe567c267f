// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Mutual information strategies and the summation helpers they share.

pub mod approx_set_pairs;
pub mod conditional;
pub mod histogram;
pub mod joint;
pub mod pairwise;

pub use approx_set_pairs::ApproxSetPairsMi;
pub use conditional::ConditionalMi;
pub use histogram::HistogramMi;
pub use pairwise::PairwiseMi;

use crate::error::ConfigError;

/// Mutual information estimators only accept `gamma < N`; larger radii make every
/// approximation set the full domain.
pub fn validate_gamma(gamma: usize, number_solutions: usize) -> Result<(), ConfigError> {
    if gamma >= number_solutions {
        return Err(ConfigError::GammaOutOfRange {
            gamma,
            number_solutions,
        });
    }
    Ok(())
}
