//! # Judge Library
//!
//! Core logic for judging one user solution against a task's trusted oracle.
//!
//! A judgement loads the user's source once, runs the resulting solution on every test case
//! in order, and stops at the first failure. Each step that runs user code is wrapped in a
//! per-call [`deadline`](crate::deadline) so a runaway script becomes a verdict rather than
//! a hung worker.
//!
//! ## Key Concepts
//! - **JudgeJob**: one judgement of one submission, configured with builder methods.
//! - **Runners**: pluggable backends that turn source into a callable [`Solution`].
//! - **Validator**: checks a raw result has exactly the declared numeric outputs.
//! - **Comparators**: decide whether a validated result matches the oracle's.
//! - **Reports**: the single [`JudgeReport`] each judgement produces.
//!
//! ## Verdict precedence
//! Compile failure pre-empts everything. Within the per-test stage the first failing test
//! decides the verdict, and for a single test a timeout beats a raised error, which beats a
//! malformed result, which beats a numeric mismatch.

pub mod comparators;
pub mod deadline;
pub mod error;
pub mod report;
pub mod runners;
pub mod traits;
pub mod types;
pub mod validator;

use crate::comparators::tolerance_comparator::ToleranceComparator;
use crate::deadline::{GuardError, run_with_deadline};
use crate::report::JudgeReport;
use crate::runners::rhai_runner::RhaiLoader;
use crate::traits::comparator::{Comparison, ResultComparator};
use crate::traits::oracle::Oracle;
use crate::traits::runner::{Solution, SolutionLoader};
use tracing::{debug, info, warn};
use util::judge_settings::JudgeSettings;
use util::task_spec::{Params, TaskSpec};

/// Name of the function every solution must define.
pub const ENTRY_POINT: &str = "solve";

/// One judgement of one submission.
///
/// # Fields
/// - `spec`: the task whose declared outputs drive validation.
/// - `oracle`: trusted reference producing the expected result per test.
/// - `user_code`: the submitted source.
/// - `tests`: test cases, judged strictly in this order.
/// - `settings`: time budget and tolerances.
/// - `loader`: backend that turns `user_code` into a [`Solution`].
/// - `comparator`: overrides the tolerance comparator derived from `settings`.
pub struct JudgeJob<'a> {
    spec: &'a TaskSpec,
    oracle: &'a dyn Oracle,
    user_code: &'a str,
    tests: &'a [Params],
    settings: JudgeSettings,
    loader: Box<dyn SolutionLoader + 'a>,
    comparator: Option<Box<dyn ResultComparator + 'a>>,
}

impl<'a> JudgeJob<'a> {
    /// Create a judgement with default settings and the Rhai backend.
    pub fn new(
        spec: &'a TaskSpec,
        oracle: &'a dyn Oracle,
        user_code: &'a str,
        tests: &'a [Params],
    ) -> Self {
        Self {
            spec,
            oracle,
            user_code,
            tests,
            settings: JudgeSettings::default(),
            loader: Box::new(RhaiLoader::new()),
            comparator: None,
        }
    }

    pub fn with_settings(mut self, settings: JudgeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the execution backend.
    pub fn with_loader<L: SolutionLoader + 'a>(mut self, loader: L) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Replace the comparison strategy. Without this the job compares with the tolerances
    /// from its settings.
    pub fn with_comparator<C: ResultComparator + 'a>(mut self, comparator: C) -> Self {
        self.comparator = Some(Box::new(comparator));
        self
    }

    /// Run the judgement.
    ///
    /// Always produces a report: every failure, including panics inside the backend and
    /// oracle faults, is folded into a verdict.
    pub fn run(self) -> JudgeReport {
        let report = self.judge();
        info!(
            task_id = %self.spec.id,
            verdict = %report.verdict,
            passed = report.passed,
            total = report.total,
            "judgement finished"
        );
        report
    }

    fn judge(&self) -> JudgeReport {
        let total = self.tests.len();
        let budget = self.settings.time_budget();

        let loaded = run_with_deadline(budget, |deadline| {
            self.loader.load(self.user_code, deadline)
        });
        let solution = match loaded {
            Ok(solution) => solution,
            Err(GuardError::Timeout) => return JudgeReport::compile_timeout(total),
            Err(err) => return JudgeReport::compile_error(total, err),
        };

        let default_comparator;
        let comparator: &dyn ResultComparator = match &self.comparator {
            Some(c) => c.as_ref(),
            None => {
                default_comparator = ToleranceComparator::from(&self.settings);
                &default_comparator
            }
        };

        let mut passed = 0;
        for (index, params) in self.tests.iter().enumerate() {
            if let Some(report) = self.judge_one(solution.as_ref(), comparator, params, index, passed) {
                return report;
            }
            debug!(task_id = %self.spec.id, index, "test passed");
            passed += 1;
        }

        JudgeReport::accepted(total)
    }

    /// Runs test `index`. `None` means it passed; `Some` is the terminal report.
    fn judge_one(
        &self,
        solution: &dyn Solution,
        comparator: &dyn ResultComparator,
        params: &Params,
        index: usize,
        passed: usize,
    ) -> Option<JudgeReport> {
        let total = self.tests.len();

        let raw = match run_with_deadline(self.settings.time_budget(), |deadline| {
            solution.evaluate(params, deadline)
        }) {
            Ok(raw) => raw,
            Err(GuardError::Timeout) => return Some(JudgeReport::timeout(passed, total, index)),
            Err(err) => return Some(JudgeReport::runtime_error(passed, total, index, err)),
        };

        let actual = match validator::validate(self.spec, &raw) {
            Ok(actual) => actual,
            Err(rejection) => {
                debug!(task_id = %self.spec.id, index, %rejection, "output rejected");
                return Some(JudgeReport::wrong_format(passed, total, index));
            }
        };

        let expected = match self.oracle.solve(params) {
            Ok(expected) => expected,
            Err(err) => {
                warn!(task_id = %self.spec.id, index, error = %err, "oracle could not solve test case");
                return Some(JudgeReport::invalid_test_case(passed, total, index, err));
            }
        };

        match comparator.compare(&expected, &actual) {
            Comparison::Match => None,
            Comparison::Mismatch { field } => {
                Some(JudgeReport::wrong_answer(passed, total, index, field))
            }
        }
    }
}
