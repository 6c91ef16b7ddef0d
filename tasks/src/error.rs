use judge::traits::oracle::OracleError;

/// Domain-level failures raised by market models and their solvers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No equilibrium: {0}")]
    NoEquilibrium(String),
}

impl From<DomainError> for OracleError {
    fn from(err: DomainError) -> Self {
        OracleError(err.to_string())
    }
}

/// Failures of the catalog use cases. None of these are user-code faults; a judgement that
/// gets past them always ends in a report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskError {
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Oracle failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("Oracle returned keys {got:?}, expected {expected:?}")]
    OracleOutputMismatch {
        expected: Vec<String>,
        got: Vec<String>,
    },
}
