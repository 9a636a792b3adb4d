//! Fixture runner: search, then package the result as a bundle.
//!
//! # Pipeline
//!
//! ```text
//! PuzzleFixtureV1 → search() → trace canonical JSON → render_trace()
//!   → build_bundle(fixture.json, search_trace.json, report.txt)
//! ```

use octile_kernel::proof::canon::CanonError;
use octile_search::error::SearchError;
use octile_search::search::{search, SearchResult};

use crate::bundle::{build_bundle, RunBundleV1};
use crate::fixture::PuzzleFixtureV1;
use crate::report::render_trace;

/// Canonical fixture echo (normative).
pub const FIXTURE_ARTIFACT: &str = "fixture.json";
/// Canonical search trace (normative).
pub const TRACE_ARTIFACT: &str = "search_trace.json";
/// Rendered report (observational).
pub const REPORT_ARTIFACT: &str = "report.txt";

/// Error during a fixture run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The search rejected its inputs before running.
    Search(SearchError),
    /// Canonical JSON serialization failed.
    Canon(CanonError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(e) => write!(f, "search failed: {e}"),
            Self::Canon(e) => write!(f, "serialization failed: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            Self::Canon(e) => Some(e),
        }
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<CanonError> for RunError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// A completed run: the search result and its bundle.
#[derive(Debug, Clone)]
pub struct RunOutcomeV1 {
    pub result: SearchResult,
    pub bundle: RunBundleV1,
}

/// Run a fixture and package the artifacts.
///
/// # Errors
///
/// Returns [`RunError`] if the search rejects the fixture policy or an
/// artifact cannot be serialized.
pub fn run_fixture(fixture: &PuzzleFixtureV1) -> Result<RunBundleV1, RunError> {
    run_fixture_with_result(fixture).map(|outcome| outcome.bundle)
}

/// Like [`run_fixture`], but also returns the in-memory search result.
///
/// # Errors
///
/// See [`run_fixture`].
pub fn run_fixture_with_result(fixture: &PuzzleFixtureV1) -> Result<RunOutcomeV1, RunError> {
    let result = search(&fixture.start, &fixture.goal, &fixture.policy)?;

    let fixture_bytes = fixture.to_canonical_json_bytes()?;
    let trace_bytes = result.trace.to_canonical_json_bytes()?;
    let report = render_trace(&result);

    let bundle = build_bundle(vec![
        (FIXTURE_ARTIFACT.into(), fixture_bytes, true),
        (TRACE_ARTIFACT.into(), trace_bytes, true),
        (REPORT_ARTIFACT.into(), report.into_bytes(), false),
    ])?;

    tracing::info!(
        digest = bundle.digest.as_str(),
        reason = result.trace.metadata.termination_reason.as_str(),
        "run bundled"
    );

    Ok(RunOutcomeV1 { result, bundle })
}
