//! # Judge Report Module
//!
//! The terminal artifact of a judgement. A [`JudgeReport`] is built exactly once per
//! submission through one of the named constructors below, so every verdict carries the same
//! message and the same optional fields wherever it is produced.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "verdict": "WA",
//!   "passed": 1,
//!   "total": 3,
//!   "message": "Wrong answer",
//!   "failed_test_index": 1,
//!   "failed_field": "p_eq"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Final classification of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Ac,
    Wa,
    Re,
    Tle,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Ac => "AC",
            Verdict::Wa => "WA",
            Verdict::Re => "RE",
            Verdict::Tle => "TLE",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeReport {
    pub verdict: Verdict,
    /// Tests passed before the terminal outcome.
    pub passed: usize,
    pub total: usize,
    pub message: String,
    /// Zero-based index of the failing test. Absent for AC and for compile-stage outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_test_index: Option<usize>,
    /// First mismatching output field. Present only for numeric mismatches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_field: Option<String>,
}

impl JudgeReport {
    fn new(verdict: Verdict, passed: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            verdict,
            passed,
            total,
            message: message.into(),
            failed_test_index: None,
            failed_field: None,
        }
    }

    fn at(mut self, index: usize) -> Self {
        self.failed_test_index = Some(index);
        self
    }

    pub fn accepted(total: usize) -> Self {
        Self::new(Verdict::Ac, total, total, "Accepted")
    }

    pub fn compile_timeout(total: usize) -> Self {
        Self::new(Verdict::Tle, 0, total, "TLE during compilation")
    }

    pub fn compile_error(total: usize, err: impl fmt::Display) -> Self {
        Self::new(Verdict::Re, 0, total, format!("Compile error: {err}"))
    }

    pub fn timeout(passed: usize, total: usize, index: usize) -> Self {
        Self::new(Verdict::Tle, passed, total, "TLE").at(index)
    }

    pub fn runtime_error(passed: usize, total: usize, index: usize, err: impl fmt::Display) -> Self {
        Self::new(Verdict::Re, passed, total, format!("Runtime error: {err}")).at(index)
    }

    pub fn wrong_format(passed: usize, total: usize, index: usize) -> Self {
        Self::new(Verdict::Wa, passed, total, "Wrong output format/keys").at(index)
    }

    pub fn wrong_answer(passed: usize, total: usize, index: usize, field: impl Into<String>) -> Self {
        let mut report = Self::new(Verdict::Wa, passed, total, "Wrong answer").at(index);
        report.failed_field = Some(field.into());
        report
    }

    /// The oracle could not solve a fixture. Not the user's fault, but still terminal.
    pub fn invalid_test_case(
        passed: usize,
        total: usize,
        index: usize,
        err: impl fmt::Display,
    ) -> Self {
        Self::new(Verdict::Re, passed, total, format!("Invalid test case: {err}")).at(index)
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Ac
    }
}
