//! Search policy types.

use crate::error::SearchError;

/// Default expansion budget, sized for a readable demonstration trace.
pub const DEFAULT_MAX_EXPANSIONS: u64 = 15;

/// Search budget configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Hard cap on node expansions. Must be at least 1.
    pub max_expansions: u64,
}

impl SearchPolicyV1 {
    /// Policy with the given expansion cap.
    #[must_use]
    pub fn with_max_expansions(max_expansions: u64) -> Self {
        Self { max_expansions }
    }

    /// Validate that this policy can drive a search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_expansions` is zero.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}
