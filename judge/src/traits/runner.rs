//! Runner Traits
//!
//! The isolation boundary between the judge and user code. The orchestrator only ever sees
//! these two traits, so an out-of-process backend (separate worker, container, syscall
//! filtering, resource caps) can replace the embedded script engine without touching any
//! caller.
//!
//! Both operations receive the [`Deadline`] of the guarded call they run under and are
//! expected to stop promptly once it expires.

use crate::deadline::Deadline;
use crate::error::{EvalError, LoadError};
use crate::types::RawValue;
use util::task_spec::Params;

/// Turns source text into a [`Solution`].
///
/// Implementations must fail with a [`LoadError`] when the source does not parse, when its
/// top-level evaluation fails, or when it does not expose the expected entry point.
pub trait SolutionLoader: Send + Sync {
    fn load(&self, source: &str, deadline: &Deadline) -> Result<Box<dyn Solution>, LoadError>;
}

/// A loaded user function: one call per test case, one [`Params`] argument, an
/// unconstrained value back.
pub trait Solution {
    fn evaluate(&self, params: &Params, deadline: &Deadline) -> Result<RawValue, EvalError>;
}
