//! Errors in the evaluation core.
use thiserror::Error;

/// Errors in the evaluation core.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Aggregation was requested over zero episode records.
    ///
    /// The orchestrator guarantees at least one completed episode before
    /// aggregating; seeing this error means the caller broke that contract.
    #[error("cannot aggregate an empty set of episode records")]
    EmptyMetricsSet,

    /// A metric value was requested under a name no record carries.
    #[error("metric not found: {0}")]
    MetricNotFound(String),
}
