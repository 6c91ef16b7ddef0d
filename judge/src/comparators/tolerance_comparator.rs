//! A comparator that accepts a field when it is close to the oracle's value under either an
//! absolute or a relative bound.
//!
//! The absolute bound handles values near zero, where relative error is meaningless; the
//! relative bound (scaled by `max(1, |expected|)`) keeps large magnitudes from needing an
//! impractically tight absolute match.

use crate::traits::comparator::{Comparison, ResultComparator};
use util::judge_settings::JudgeSettings;
use util::task_spec::NumericResult;

/// True when `actual` is within `abs_tol` of `expected`, or within `rel_tol` relative to
/// `max(1, |expected|)`.
///
/// The absolute branch is symmetric in its two arguments; the relative branch is not, since
/// only the expected magnitude scales the bound. Any NaN involvement fails both branches.
pub fn close_enough(actual: f64, expected: f64, abs_tol: f64, rel_tol: f64) -> bool {
    let diff = (actual - expected).abs();
    if diff <= abs_tol {
        return true;
    }
    let denom = expected.abs().max(1.0);
    diff / denom <= rel_tol
}

/// Compares field by field in the oracle's order and stops at the first failure.
///
/// A field the oracle produced but the actual result lacks counts as a mismatch.
pub fn compare(
    expected: &NumericResult,
    actual: &NumericResult,
    abs_tol: f64,
    rel_tol: f64,
) -> Comparison {
    for (field, expected_value) in expected.iter() {
        let matches = actual
            .get(field)
            .is_some_and(|actual_value| close_enough(actual_value, expected_value, abs_tol, rel_tol));
        if !matches {
            return Comparison::Mismatch {
                field: field.to_string(),
            };
        }
    }
    Comparison::Match
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceComparator {
    pub abs_tol: f64,
    pub rel_tol: f64,
}

impl ToleranceComparator {
    pub fn new(abs_tol: f64, rel_tol: f64) -> Self {
        Self { abs_tol, rel_tol }
    }
}

impl Default for ToleranceComparator {
    fn default() -> Self {
        Self::from(&JudgeSettings::default())
    }
}

impl From<&JudgeSettings> for ToleranceComparator {
    fn from(settings: &JudgeSettings) -> Self {
        Self::new(settings.abs_tol, settings.rel_tol)
    }
}

impl ResultComparator for ToleranceComparator {
    fn compare(&self, expected: &NumericResult, actual: &NumericResult) -> Comparison {
        compare(expected, actual, self.abs_tol, self.rel_tol)
    }
}
