/// The host cannot report geometry right now (typically a hidden or not yet
/// rendered element).
///
/// Always recovered locally: the current layout pass is skipped and the
/// previous state is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricsUnavailable;

impl std::fmt::Display for MetricsUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("geometry is unavailable for a hidden or unrendered element")
    }
}

impl std::error::Error for MetricsUnavailable {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackpackError {
    /// The caller used an operation in a state where it is never valid.
    ContractViolation {
        operation: &'static str,
        reason: &'static str,
    },
}

impl std::fmt::Display for BackpackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContractViolation { operation, reason } => {
                write!(f, "contract violation in `{operation}`: {reason}")
            }
        }
    }
}

impl std::error::Error for BackpackError {}
