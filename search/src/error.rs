//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (goal reached, frontier exhausted, expansion limit) are expressed via
//! [`crate::trace::TerminationReasonV1`] and always produce a trace.

use octile_kernel::carrier::grid_state::StateError;

/// Typed failure for pre-flight search validation.
///
/// These errors are returned before search execution begins. No
/// `SearchTraceV1` is produced because no search steps were taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A start or goal sequence is not a permutation of `0..=8`.
    InvalidState(StateError),
    /// The policy cannot drive a search (e.g. a zero expansion budget).
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidState(err) => write!(f, "{err}"),
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidState(err) => Some(err),
            Self::InvalidPolicy { .. } => None,
        }
    }
}

impl From<StateError> for SearchError {
    fn from(err: StateError) -> Self {
        Self::InvalidState(err)
    }
}
