// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Approximation sets: clipped intervals `[x - gamma, x + gamma]` around an observation.

use std::ops::Range;

/// Half-open interval `[lo, hi)` inside the solution space `[0, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApproxSet {
    pub lo: usize,
    pub hi: usize,
}

impl ApproxSet {
    /// Approximation set reported for observation `point` with radius `gamma`.
    ///
    /// Points at or beyond `n` are clamped to `n - 1`, so for `n > 0` the result
    /// always satisfies `0 <= lo < hi <= n`.
    #[inline]
    pub fn around(point: usize, gamma: usize, n: usize) -> Self {
        let point = point.min(n.saturating_sub(1));
        let lo = point.saturating_sub(gamma);
        let hi = point.saturating_add(gamma).saturating_add(1).min(n);
        Self { lo, hi }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hi.saturating_sub(self.lo)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hi <= self.lo
    }

    #[inline]
    pub fn contains(&self, x: usize) -> bool {
        self.lo <= x && x < self.hi
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.lo..self.hi
    }

    /// Observations `x` whose approximation set is exactly `self`.
    ///
    /// An edge that is not clipped pins the centre: `lo > 0` forces `x = lo + gamma`
    /// and `hi < n` forces `x = hi - gamma - 1`. A clipped edge only bounds it:
    /// `lo == 0` needs `x <= gamma`, `hi == n` needs `x >= n - 1 - gamma`.
    /// Intervals no observation produces yield an empty range.
    pub fn centers(&self, gamma: usize, n: usize) -> Range<usize> {
        if self.is_empty() || self.hi > n {
            return 0..0;
        }
        let (mut first, mut last) = (0usize, n);

        if self.lo > 0 {
            first = first.max(self.lo + gamma);
            last = last.min(self.lo + gamma + 1);
        } else {
            last = last.min(gamma + 1);
        }

        if self.hi < n {
            match self.hi.checked_sub(gamma + 1) {
                Some(c) => {
                    first = first.max(c);
                    last = last.min(c + 1);
                }
                None => return 0..0,
            }
        } else {
            first = first.max((n - 1).saturating_sub(gamma));
        }

        if first >= last { 0..0 } else { first..last }
    }
}

/// Bounds `(lo, hi)` of the approximation set around `point`.
pub fn approx_set(point: usize, gamma: usize, n: usize) -> (usize, usize) {
    let set = ApproxSet::around(point, gamma, n);
    (set.lo, set.hi)
}

/// Length of the approximation set around every observation in `[0, n)`.
pub(crate) fn set_lengths(gamma: usize, n: usize) -> Vec<usize> {
    (0..n).map(|x| ApproxSet::around(x, gamma, n).len()).collect()
}
