//! Puzzle fixtures: the JSON run configuration for a search.
//!
//! ```json
//! {"goal": [1,2,3,8,0,4,7,6,5], "max_expansions": 15, "start": [0,1,3,8,2,6,7,5,4]}
//! ```
//!
//! `max_expansions` is optional and defaults to [`DEFAULT_MAX_EXPANSIONS`].
//! Unknown keys are rejected so a typo cannot silently fall back to a default.

use std::path::Path;

use octile_kernel::carrier::grid_state::{GridStateV1, StateError};
use octile_kernel::proof::canon::{canonical_json_bytes, CanonError};
use octile_search::policy::{SearchPolicyV1, DEFAULT_MAX_EXPANSIONS};

/// Start of the built-in demonstration run.
pub const DEMO_START: [u8; 9] = [0, 1, 3, 8, 2, 6, 7, 5, 4];

/// Goal of the built-in demonstration run.
pub const DEMO_GOAL: [u8; 9] = [1, 2, 3, 8, 0, 4, 7, 6, 5];

const KNOWN_FIELDS: &[&str] = &["goal", "max_expansions", "start"];

/// A validated run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleFixtureV1 {
    pub start: GridStateV1,
    pub goal: GridStateV1,
    pub policy: SearchPolicyV1,
}

/// Why a fixture could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// The fixture file could not be read.
    Io { path: String, detail: String },
    /// The bytes are not a JSON object.
    Json { detail: String },
    /// A required field is absent.
    MissingField { field: &'static str },
    /// A field is present but has the wrong shape, or is not recognized.
    InvalidField { field: String, detail: String },
    /// A cell array is not a permutation of `0..=8`.
    InvalidState { field: &'static str, source: StateError },
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, detail } => write!(f, "cannot read fixture {path}: {detail}"),
            Self::Json { detail } => write!(f, "fixture is not valid JSON: {detail}"),
            Self::MissingField { field } => write!(f, "fixture is missing \"{field}\""),
            Self::InvalidField { field, detail } => {
                write!(f, "fixture field \"{field}\": {detail}")
            }
            Self::InvalidState { field, source } => write!(f, "fixture \"{field}\": {source}"),
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidState { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl PuzzleFixtureV1 {
    /// Canonical JSON form (sorted keys, `max_expansions` always present).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&serde_json::json!({
            "goal": self.goal.cells(),
            "max_expansions": self.policy.max_expansions,
            "start": self.start.cells(),
        }))
    }
}

/// The demonstration run: the corner-blank start, the centered-blank goal
/// and a budget of 15 expansions.
///
/// # Errors
///
/// Never fails for the built-in cells; the `Result` keeps construction on the
/// validated path.
pub fn demo_fixture() -> Result<PuzzleFixtureV1, FixtureError> {
    Ok(PuzzleFixtureV1 {
        start: to_state("start", &DEMO_START)?,
        goal: to_state("goal", &DEMO_GOAL)?,
        policy: SearchPolicyV1::default(),
    })
}

/// Parse and validate fixture JSON.
///
/// # Errors
///
/// Returns [`FixtureError`] for malformed JSON, missing or unknown fields,
/// out-of-range cells, invalid permutations or a zero budget.
pub fn parse_fixture(bytes: &[u8]) -> Result<PuzzleFixtureV1, FixtureError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| FixtureError::Json {
            detail: e.to_string(),
        })?;
    let obj = value.as_object().ok_or_else(|| FixtureError::Json {
        detail: "top level is not an object".into(),
    })?;

    if let Some(unknown) = obj.keys().find(|k| !KNOWN_FIELDS.contains(&k.as_str())) {
        return Err(FixtureError::InvalidField {
            field: unknown.clone(),
            detail: "unknown field".into(),
        });
    }

    let start = cells_field(obj, "start")?;
    let goal = cells_field(obj, "goal")?;

    let max_expansions = match obj.get("max_expansions") {
        None => DEFAULT_MAX_EXPANSIONS,
        Some(v) => v.as_u64().ok_or_else(|| FixtureError::InvalidField {
            field: "max_expansions".into(),
            detail: format!("expected a non-negative integer, got {v}"),
        })?,
    };
    let policy = SearchPolicyV1::with_max_expansions(max_expansions);
    policy.validate().map_err(|e| FixtureError::InvalidField {
        field: "max_expansions".into(),
        detail: e.to_string(),
    })?;

    Ok(PuzzleFixtureV1 {
        start: to_state("start", &start)?,
        goal: to_state("goal", &goal)?,
        policy,
    })
}

/// Read and parse a fixture file.
///
/// # Errors
///
/// Returns [`FixtureError::Io`] if the file cannot be read, then any error
/// from [`parse_fixture`].
pub fn load_fixture(path: &Path) -> Result<PuzzleFixtureV1, FixtureError> {
    let bytes = std::fs::read(path).map_err(|e| FixtureError::Io {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    parse_fixture(&bytes)
}

fn cells_field(
    obj: &serde_json::Map<String, serde_json::Value>,
    field: &'static str,
) -> Result<Vec<u8>, FixtureError> {
    let invalid = |detail: String| FixtureError::InvalidField {
        field: field.into(),
        detail,
    };
    let items = obj
        .get(field)
        .ok_or(FixtureError::MissingField { field })?
        .as_array()
        .ok_or_else(|| invalid("expected an array of integers".into()))?;

    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| invalid(format!("{item} is not a cell value")))
        })
        .collect()
}

fn to_state(field: &'static str, cells: &[u8]) -> Result<GridStateV1, FixtureError> {
    GridStateV1::from_slice(cells).map_err(|source| FixtureError::InvalidState { field, source })
}
