//! Judge Error Types
//!
//! Failures raised by an execution backend. None of these escape the orchestrator: each
//! one is folded into a [`JudgeReport`](crate::report::JudgeReport) with the matching
//! verdict.

use crate::ENTRY_POINT;

/// Failure while turning source text into a callable solution.
///
/// Every variant is reported as a compile error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    /// The source does not parse.
    #[error("{0}")]
    Syntax(String),
    /// Top-level statements failed while being evaluated.
    #[error("{0}")]
    Evaluation(String),
    /// No entry point bound under the well-known name.
    #[error(
        "User code must define function {entry}(params) returning a map of numbers",
        entry = ENTRY_POINT
    )]
    MissingEntryPoint,
    /// The entry point exists but does not take exactly one argument.
    #[error(
        "Function {entry} must take exactly one parameter, found {0}",
        entry = ENTRY_POINT
    )]
    EntryPointArity(usize),
}

/// Failure raised by user code while evaluating one test case.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct EvalError(pub String);
