use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-run knobs for the judge: the wall-clock budget applied to each guarded stage and the
/// tolerance pair used when comparing floating point outputs.
///
/// Immutable for the duration of one judgement. Missing fields fall back to their defaults
/// when deserialised, so `{}` is a valid settings document.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct JudgeSettings {
    /// Budget for the load stage and for every single test invocation.
    /// Zero or negative disables enforcement (trusted callers only).
    #[serde(default = "default_time_limit_seconds")]
    pub time_limit_seconds: f64,

    #[serde(default = "default_abs_tol")]
    pub abs_tol: f64,

    #[serde(default = "default_rel_tol")]
    pub rel_tol: f64,
}

impl Default for JudgeSettings {
    fn default() -> Self {
        Self {
            time_limit_seconds: default_time_limit_seconds(),
            abs_tol: default_abs_tol(),
            rel_tol: default_rel_tol(),
        }
    }
}

impl JudgeSettings {
    /// The time limit as a `Duration`, or `None` when the limit is not enforced.
    ///
    /// Non-finite limits are treated as unenforced as well.
    pub fn time_budget(&self) -> Option<Duration> {
        if self.time_limit_seconds > 0.0 {
            Duration::try_from_secs_f64(self.time_limit_seconds).ok()
        } else {
            None
        }
    }

    pub fn with_time_limit_seconds(mut self, seconds: f64) -> Self {
        self.time_limit_seconds = seconds;
        self
    }

    pub fn with_tolerances(mut self, abs_tol: f64, rel_tol: f64) -> Self {
        self.abs_tol = abs_tol;
        self.rel_tol = rel_tol;
        self
    }
}

//Default Functions

pub(crate) fn default_time_limit_seconds() -> f64 {
    1.0
}

pub(crate) fn default_abs_tol() -> f64 {
    1e-6
}

pub(crate) fn default_rel_tol() -> f64 {
    1e-6
}
