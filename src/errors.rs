//! Error types.

/// An error raised by the analysis or its queries.
///
/// Every variant reports a programming error on the host side; the
/// analysis itself has no I/O and no recoverable failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LivenessError {
    /// A query or internal lookup referenced a label that is not
    /// present in the result.
    UnknownLabel(String),
    /// The host adapter broke an invariant the analysis relies on: a
    /// duplicate label in the postorder, a successor with no
    /// corresponding block, or a debug entry point invoked on a result
    /// analyzed without debug output enabled.
    InvariantViolation(String),
}

impl std::fmt::Display for LivenessError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl std::error::Error for LivenessError {}

pub type Result<T> = std::result::Result<T, LivenessError>;
