// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod approaches;
pub mod error_estimation;
pub mod mutual_information;
pub mod traits;

pub use error_estimation::{ErrorStrategy, SampledError};
pub use mutual_information::{MiStrategy, MutualInformation};
pub use traits::{ErrorEstimator, ErrorResult, MiResult, MutualInformationEstimator};
