// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::error::NumericError;

/// Probabilities with `|p| <= ZERO_TOLERANCE` are treated as exact zeros and skipped.
pub const ZERO_TOLERANCE: f64 = 1e-8;

#[inline]
pub fn is_negligible(p: f64) -> bool {
    p.abs() <= ZERO_TOLERANCE
}

/// Reject NaN/inf and negative values beyond the zero tolerance.
#[inline]
pub fn check_probability(p: f64, context: &'static str) -> Result<f64, NumericError> {
    if !p.is_finite() {
        return Err(NumericError::NotFinite { context, value: p });
    }
    if p < -ZERO_TOLERANCE {
        return Err(NumericError::NegativeProbability { context, value: p });
    }
    Ok(p)
}

pub fn check_all<'a>(
    values: impl IntoIterator<Item = &'a f64>,
    context: &'static str,
) -> Result<(), NumericError> {
    values.into_iter().try_for_each(|&p| check_probability(p, context).map(|_| ()))
}

/// Information terms (bits) read off a joint distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSummary {
    pub mutual_information: f64,
    pub joint_entropy: f64,
    /// `-sum p(i, j) log2 p_row(i)`, over entries whose row marginal is non-zero.
    pub marginal_cross_entropy: f64,
}

/// Sum MI, joint entropy and row cross-entropy over all cells with non-negligible mass.
pub fn summarize(
    joint: &Array2<f64>,
    rows: ArrayView1<'_, f64>,
    cols: ArrayView1<'_, f64>,
) -> Result<JointSummary, NumericError> {
    check_all(joint.iter(), "joint distribution")?;
    check_all(rows.iter(), "row marginal")?;
    check_all(cols.iter(), "column marginal")?;

    let mut mi = 0.0_f64;
    let mut h_joint = 0.0_f64;
    let mut h_cross = 0.0_f64;
    for ((i, j), &p) in joint.indexed_iter() {
        if is_negligible(p) {
            continue;
        }
        mi += p * (p / (rows[i] * cols[j])).log2();
        h_joint -= p * p.log2();
        if !is_negligible(rows[i]) {
            h_cross -= p * rows[i].log2();
        }
    }

    if !mi.is_finite() {
        return Err(NumericError::NotFinite {
            context: "mutual information",
            value: mi,
        });
    }
    Ok(JointSummary {
        mutual_information: mi,
        joint_entropy: h_joint,
        marginal_cross_entropy: h_cross,
    })
}

/// Mutual information (bits) of a joint distribution, marginals taken as row/column sums.
pub fn mutual_information_bits(joint: &Array2<f64>) -> Result<f64, NumericError> {
    let (rows, cols) = marginals(joint);
    summarize(joint, rows.view(), cols.view()).map(|s| s.mutual_information)
}

/// Row sums and column sums.
pub fn marginals(joint: &Array2<f64>) -> (Array1<f64>, Array1<f64>) {
    (joint.sum_axis(Axis(1)), joint.sum_axis(Axis(0)))
}

/// Scale a non-empty histogram to unit mass.
pub fn normalize_in_place<D: ndarray::Dimension>(hist: &mut ndarray::Array<f64, D>) {
    let total = hist.sum();
    if total > 0.0 {
        hist.mapv_inplace(|v| v / total);
    }
}
