// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::estimators::approaches::joint::JointSummary;
use crate::noise::NoiseModel;

/// Output of a mutual information strategy.
///
/// Strategies that do not compute entropy terms report `0.0` for them, and strategies
/// without a joint matrix report `None`, so every strategy returns the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiResult {
    /// Mutual information in bits.
    pub mutual_information: f64,
    pub joint: Option<Array2<f64>>,
    pub joint_entropy: f64,
    pub marginal_cross_entropy: f64,
}

impl MiResult {
    pub fn scalar(mutual_information: f64) -> Self {
        Self {
            mutual_information,
            joint: None,
            joint_entropy: 0.0,
            marginal_cross_entropy: 0.0,
        }
    }

    pub fn with_joint(joint: Array2<f64>, summary: JointSummary) -> Self {
        Self {
            mutual_information: summary.mutual_information,
            joint: Some(joint),
            joint_entropy: summary.joint_entropy,
            marginal_cross_entropy: summary.marginal_cross_entropy,
        }
    }

    /// Joint matrix and MI only; entropy terms left at the zero placeholder.
    pub fn joint_only(mutual_information: f64, joint: Array2<f64>) -> Self {
        Self {
            mutual_information,
            joint: Some(joint),
            joint_entropy: 0.0,
            marginal_cross_entropy: 0.0,
        }
    }
}

/// Mean and standard deviation of `|reported - mu|` over independent trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub mean_absolute_error: f64,
    pub std_absolute_error: f64,
}

/// A strategy computing mutual information for a noise model at tolerance `gamma`.
///
/// Exact strategies ignore `rng`; sampling strategies draw everything from it, so a
/// seeded generator makes a call reproducible.
pub trait MutualInformationEstimator {
    fn estimate<R: Rng + ?Sized>(
        &self,
        model: &NoiseModel,
        gamma: usize,
        rng: &mut R,
    ) -> Result<MiResult>;
}

/// Interface for estimators of the error made by reporting a point of the approximation set.
pub trait ErrorEstimator {
    fn estimate_error<R: Rng + ?Sized>(
        &self,
        model: &NoiseModel,
        gamma: usize,
        rng: &mut R,
    ) -> Result<ErrorResult>;
}
