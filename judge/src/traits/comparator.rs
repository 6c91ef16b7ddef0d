use util::task_spec::NumericResult;

/// Result of comparing a validated user result against the oracle's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Match,
    /// The first field, in the oracle's iteration order, that did not match.
    Mismatch { field: String },
}

/// ResultComparator is a strategy trait for comparing numeric results.
///
/// Implementations iterate the `expected` (oracle) fields and stop at the first field that
/// fails; later fields are not inspected.
pub trait ResultComparator: Send + Sync {
    fn compare(&self, expected: &NumericResult, actual: &NumericResult) -> Comparison;
}
