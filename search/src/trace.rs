//! `SearchTraceV1`: the expansion log.
//!
//! The normative decision surface is the ordered list of
//! `ExpansionRecordV1` entries, one per expansion, each listing every
//! neighbor considered and what happened to it.

use octile_kernel::carrier::grid_state::GridStateV1;
use octile_kernel::operators::cost::Cost;
use octile_kernel::operators::moves::BlankMove;
use octile_kernel::proof::canon::{canonical_json_bytes, CanonError};
use octile_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_TRACE};

/// The complete search trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTraceV1 {
    /// Ordered expansion records (expansion order = insertion order).
    pub expansions: Vec<ExpansionRecordV1>,
    /// Aggregate counters and termination.
    pub metadata: TraceMetadataV1,
}

/// One frontier pop that was expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionRecordV1 {
    /// 1-based, strictly increasing.
    pub expansion_index: u64,
    /// Registry id of the expanded node.
    pub node_id: u64,
    pub state: GridStateV1,
    pub g: Cost,
    pub h: Cost,
    /// The expanded state is the goal; the search stops after this record.
    pub is_goal: bool,
    /// Every neighbor considered, in move enumeration order.
    pub children: Vec<ChildRecordV1>,
}

impl ExpansionRecordV1 {
    #[must_use]
    pub fn f(&self) -> Cost {
        self.g + self.h
    }
}

/// A neighbor considered during an expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRecordV1 {
    /// Index in the expansion's neighbor list.
    pub index: u64,
    pub mv: BlankMove,
    pub state: GridStateV1,
    pub g: Cost,
    pub h: Cost,
    pub outcome: ChildOutcomeV1,
}

impl ChildRecordV1 {
    #[must_use]
    pub fn f(&self) -> Cost {
        self.g + self.h
    }
}

/// What happened to a neighbor during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcomeV1 {
    /// First discovery; a new node was queued.
    Queued { node_id: u64 },
    /// Cheaper than the entry already queued; a new node replaced it.
    Superseded { node_id: u64, previous_g: Cost },
    /// Already queued at equal or lower cost; not re-added.
    AlreadyQueued { existing_g: Cost },
    /// Already expanded at equal or lower cost; not re-added.
    AlreadyClosed { closed_g: Cost },
}

impl ChildOutcomeV1 {
    /// The node created for this child, if one was.
    #[must_use]
    pub fn node_id(self) -> Option<u64> {
        match self {
            Self::Queued { node_id } | Self::Superseded { node_id, .. } => Some(node_id),
            Self::AlreadyQueued { .. } | Self::AlreadyClosed { .. } => None,
        }
    }

    /// True when this child was added to the frontier for the first time.
    #[must_use]
    pub fn is_newly_queued(self) -> bool {
        matches!(self, Self::Queued { .. })
    }
}

/// Aggregate metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceMetadataV1 {
    pub start_fingerprint: String,
    pub goal_fingerprint: String,
    /// Policy echo.
    pub max_expansions: u64,

    // Counters
    pub total_expansions: u64,
    pub total_children_generated: u64,
    pub total_queued: u64,
    pub total_superseded: u64,
    pub total_already_queued: u64,
    pub total_already_closed: u64,
    /// Frontier pops discarded without expansion.
    pub total_stale_discarded: u64,
    pub frontier_high_water: u64,
    pub termination_reason: TerminationReasonV1,
}

/// Why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// The goal state was expanded.
    GoalReached { node_id: u64 },
    /// Frontier emptied without reaching the goal.
    FrontierExhausted,
    /// `max_expansions` expansions were performed without reaching the goal.
    ExpansionLimitReached { limit: u64 },
    /// A popped entry referenced a node missing from the registry.
    FrontierInvariantViolation,
}

impl TerminationReasonV1 {
    /// Stable `snake_case` tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionLimitReached { .. } => "expansion_limit_reached",
            Self::FrontierInvariantViolation => "frontier_invariant_violation",
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchTraceV1 {
    /// Serialize the trace to canonical JSON bytes.
    ///
    /// Costs are written as integer tenths (`g_tenths`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_TRACE, &bytes))
    }

    #[must_use]
    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expansion_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
        })
    }
}

fn expansion_to_json(e: &ExpansionRecordV1) -> serde_json::Value {
    serde_json::json!({
        "children": e.children.iter().map(child_to_json).collect::<Vec<_>>(),
        "expansion_index": e.expansion_index,
        "f_tenths": e.f().tenths(),
        "g_tenths": e.g.tenths(),
        "h_tenths": e.h.tenths(),
        "is_goal": e.is_goal,
        "node_id": e.node_id,
        "state": e.state.cells(),
    })
}

fn child_to_json(c: &ChildRecordV1) -> serde_json::Value {
    serde_json::json!({
        "f_tenths": c.f().tenths(),
        "g_tenths": c.g.tenths(),
        "h_tenths": c.h.tenths(),
        "index": c.index,
        "move": c.mv.as_str(),
        "outcome": outcome_to_json(c.outcome),
        "state": c.state.cells(),
    })
}

fn outcome_to_json(o: ChildOutcomeV1) -> serde_json::Value {
    match o {
        ChildOutcomeV1::Queued { node_id } => {
            serde_json::json!({"node_id": node_id, "type": "queued"})
        }
        ChildOutcomeV1::Superseded {
            node_id,
            previous_g,
        } => serde_json::json!({
            "node_id": node_id,
            "previous_g_tenths": previous_g.tenths(),
            "type": "superseded",
        }),
        ChildOutcomeV1::AlreadyQueued { existing_g } => {
            serde_json::json!({"existing_g_tenths": existing_g.tenths(), "type": "already_queued"})
        }
        ChildOutcomeV1::AlreadyClosed { closed_g } => {
            serde_json::json!({"closed_g_tenths": closed_g.tenths(), "type": "already_closed"})
        }
    }
}

fn metadata_to_json(m: &TraceMetadataV1) -> serde_json::Value {
    serde_json::json!({
        "frontier_high_water": m.frontier_high_water,
        "goal_fingerprint": m.goal_fingerprint,
        "max_expansions": m.max_expansions,
        "start_fingerprint": m.start_fingerprint,
        "termination_reason": termination_reason_to_json(m.termination_reason),
        "total_already_closed": m.total_already_closed,
        "total_already_queued": m.total_already_queued,
        "total_children_generated": m.total_children_generated,
        "total_expansions": m.total_expansions,
        "total_queued": m.total_queued,
        "total_stale_discarded": m.total_stale_discarded,
        "total_superseded": m.total_superseded,
    })
}

fn termination_reason_to_json(r: TerminationReasonV1) -> serde_json::Value {
    match r {
        TerminationReasonV1::GoalReached { node_id } => {
            serde_json::json!({"node_id": node_id, "type": r.as_str()})
        }
        TerminationReasonV1::ExpansionLimitReached { limit } => {
            serde_json::json!({"limit": limit, "type": r.as_str()})
        }
        TerminationReasonV1::FrontierExhausted | TerminationReasonV1::FrontierInvariantViolation => {
            serde_json::json!({"type": r.as_str()})
        }
    }
}
