//!
//! # Oracle Trait
//!
//! The trusted reference implementation bound to a task. Oracles run in-process, without a
//! deadline, and must be safe to share across concurrent judgements.

use util::task_spec::{NumericResult, Params};

/// The oracle could not produce an expected result for a test case.
///
/// This is a fixture problem, not a user fault.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct OracleError(pub String);

pub trait Oracle: Send + Sync {
    fn solve(&self, params: &Params) -> Result<NumericResult, OracleError>;
}

/// Plain functions and closures are oracles.
impl<F> Oracle for F
where
    F: Fn(&Params) -> Result<NumericResult, OracleError> + Send + Sync,
{
    fn solve(&self, params: &Params) -> Result<NumericResult, OracleError> {
        self(params)
    }
}
