//! Search entry point and expansion loop.

use std::collections::HashMap;

use octile_kernel::carrier::grid_state::GridStateV1;
use octile_kernel::operators::cost::Cost;
use octile_kernel::operators::moves::{neighbors, BlankMove};

use crate::error::SearchError;
use crate::frontier::BestFirstFrontier;
use crate::heuristic::{Heuristic, OctileHeuristic};
use crate::node::SearchNodeV1;
use crate::policy::SearchPolicyV1;
use crate::trace::{
    ChildOutcomeV1, ChildRecordV1, ExpansionRecordV1, SearchTraceV1, TerminationReasonV1,
    TraceMetadataV1,
};

/// Result of a search execution.
///
/// Always contains the complete trace regardless of how the search
/// terminated. Check [`SearchResult::is_goal_reached`] or inspect
/// `trace.metadata.termination_reason` to determine the outcome.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The expanded goal node (if reached).
    pub goal_node: Option<SearchNodeV1>,
    /// The complete expansion trace.
    pub trace: SearchTraceV1,
    /// All nodes created during search, indexed by `node_id`.
    pub nodes: Vec<SearchNodeV1>,
}

impl SearchResult {
    /// Returns `true` if the search terminated because the goal was expanded.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.trace.metadata.termination_reason,
            TerminationReasonV1::GoalReached { .. }
        )
    }

    /// Returns `true` if the expansion budget stopped the search.
    #[must_use]
    pub fn is_limit_reached(&self) -> bool {
        matches!(
            self.trace.metadata.termination_reason,
            TerminationReasonV1::ExpansionLimitReached { .. }
        )
    }

    /// Node ids from start to goal, or `None` if the goal was not reached.
    #[must_use]
    pub fn solution_path(&self) -> Option<Vec<u64>> {
        self.goal_node
            .as_ref()
            .map(|goal| reconstruct_path(&self.nodes, goal.node_id))
    }

    /// States from start to goal (empty if the goal was not reached).
    #[must_use]
    pub fn solution_states(&self) -> Vec<GridStateV1> {
        self.solution_nodes().map(|n| n.state).collect()
    }

    /// Blank moves from start to goal (empty if the goal was not reached).
    #[must_use]
    pub fn solution_moves(&self) -> Vec<BlankMove> {
        self.solution_nodes().filter_map(|n| n.producing_move).collect()
    }

    fn solution_nodes(&self) -> impl Iterator<Item = &SearchNodeV1> {
        self.solution_path()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| node_at(&self.nodes, id))
    }
}

/// Run best-first search from `start` to `goal` with the octile heuristic.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] for pre-flight policy failures.
pub fn search(
    start: &GridStateV1,
    goal: &GridStateV1,
    policy: &SearchPolicyV1,
) -> Result<SearchResult, SearchError> {
    search_with_heuristic(start, goal, policy, &OctileHeuristic)
}

/// Validate raw row-major cell sequences, then [`search`].
///
/// # Errors
///
/// Returns [`SearchError::InvalidState`] if either sequence is not a
/// permutation of `0..=8`, or [`SearchError::InvalidPolicy`]. No search step
/// runs in either case.
pub fn search_cells(
    start: &[u8],
    goal: &[u8],
    policy: &SearchPolicyV1,
) -> Result<SearchResult, SearchError> {
    let start = GridStateV1::from_slice(start)?;
    let goal = GridStateV1::from_slice(goal)?;
    search(&start, &goal, policy)
}

/// Run best-first search with a caller-supplied heuristic.
///
/// Expansion budget exhaustion and frontier exhaustion return
/// `Ok(SearchResult)` with the trace preserved.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] only for pre-flight policy
/// validation failures.
#[allow(clippy::too_many_lines)]
pub fn search_with_heuristic(
    start: &GridStateV1,
    goal: &GridStateV1,
    policy: &SearchPolicyV1,
    heuristic: &dyn Heuristic,
) -> Result<SearchResult, SearchError> {
    policy.validate()?;

    let mut frontier = BestFirstFrontier::new();
    let mut closed: HashMap<GridStateV1, Cost> = HashMap::new();
    let mut nodes: Vec<SearchNodeV1> = Vec::new();
    let mut expansions: Vec<ExpansionRecordV1> = Vec::new();
    let mut counters = Counters::default();

    let root = SearchNodeV1::root(*start, heuristic.estimate(start, goal));
    frontier.push(&root);
    nodes.push(root);

    let termination_reason = loop {
        if expansions.len() as u64 >= policy.max_expansions {
            break TerminationReasonV1::ExpansionLimitReached {
                limit: policy.max_expansions,
            };
        }

        let Some(popped) = frontier.pop() else {
            break TerminationReasonV1::FrontierExhausted;
        };
        if popped.superseded {
            counters.stale_discarded += 1;
            tracing::trace!(node_id = popped.node_id, "discarded superseded frontier entry");
            continue;
        }
        let Some(current) = node_at(&nodes, popped.node_id).cloned() else {
            break TerminationReasonV1::FrontierInvariantViolation;
        };
        if closed.get(&current.state).is_some_and(|&g| g <= current.g) {
            counters.stale_discarded += 1;
            tracing::trace!(node_id = current.node_id, "discarded already-closed state");
            continue;
        }

        closed.insert(current.state, current.g);
        let expansion_index = expansions.len() as u64 + 1;
        let is_goal = current.state == *goal;

        let mut children = Vec::new();
        for (index, succ) in neighbors(&current.state).into_iter().enumerate() {
            let g = current.g + succ.cost;
            let h = heuristic.estimate(&succ.state, goal);

            let outcome = match closed.get(&succ.state) {
                Some(&closed_g) if closed_g <= g => ChildOutcomeV1::AlreadyClosed { closed_g },
                _ => match frontier.queued_g(&succ.state) {
                    Some(existing_g) if existing_g <= g => {
                        ChildOutcomeV1::AlreadyQueued { existing_g }
                    }
                    previous => {
                        let node_id = nodes.len() as u64;
                        let child = SearchNodeV1 {
                            node_id,
                            parent_id: Some(current.node_id),
                            state: succ.state,
                            depth: current.depth + 1,
                            g,
                            h,
                            producing_move: Some(succ.mv),
                            move_cost: succ.cost,
                        };
                        frontier.push(&child);
                        nodes.push(child);
                        match previous {
                            Some(previous_g) => ChildOutcomeV1::Superseded {
                                node_id,
                                previous_g,
                            },
                            None => ChildOutcomeV1::Queued { node_id },
                        }
                    }
                },
            };
            counters.record(outcome);

            children.push(ChildRecordV1 {
                index: index as u64,
                mv: succ.mv,
                state: succ.state,
                g,
                h,
                outcome,
            });
        }

        tracing::debug!(
            expansion = expansion_index,
            node_id = current.node_id,
            g = %current.g,
            h = %current.h,
            f = %current.f(),
            children = children.len(),
            is_goal,
            "expanded node"
        );

        expansions.push(ExpansionRecordV1 {
            expansion_index,
            node_id: current.node_id,
            state: current.state,
            g: current.g,
            h: current.h,
            is_goal,
            children,
        });

        if is_goal {
            break TerminationReasonV1::GoalReached {
                node_id: current.node_id,
            };
        }
    };

    tracing::info!(
        reason = termination_reason.as_str(),
        expansions = expansions.len(),
        nodes = nodes.len(),
        frontier_high_water = frontier.high_water(),
        "search terminated"
    );

    let goal_node = match termination_reason {
        TerminationReasonV1::GoalReached { node_id } => node_at(&nodes, node_id).cloned(),
        _ => None,
    };

    let metadata = TraceMetadataV1 {
        start_fingerprint: start.fingerprint().hex_digest().to_string(),
        goal_fingerprint: goal.fingerprint().hex_digest().to_string(),
        max_expansions: policy.max_expansions,
        total_expansions: expansions.len() as u64,
        total_children_generated: counters.children,
        total_queued: counters.queued,
        total_superseded: counters.superseded,
        total_already_queued: counters.already_queued,
        total_already_closed: counters.already_closed,
        total_stale_discarded: counters.stale_discarded,
        frontier_high_water: frontier.high_water(),
        termination_reason,
    };

    Ok(SearchResult {
        goal_node,
        trace: SearchTraceV1 {
            expansions,
            metadata,
        },
        nodes,
    })
}

/// Reconstruct the path from the root to `goal_node_id`, root first.
#[must_use]
pub fn reconstruct_path(nodes: &[SearchNodeV1], goal_node_id: u64) -> Vec<u64> {
    let mut path = Vec::new();
    let mut current_id = Some(goal_node_id);

    while let Some(id) = current_id {
        path.push(id);
        current_id = node_at(nodes, id).and_then(|n| n.parent_id);
    }

    path.reverse();
    path
}

fn node_at(nodes: &[SearchNodeV1], node_id: u64) -> Option<&SearchNodeV1> {
    usize::try_from(node_id).ok().and_then(|i| nodes.get(i))
}

#[derive(Debug, Default)]
struct Counters {
    children: u64,
    queued: u64,
    superseded: u64,
    already_queued: u64,
    already_closed: u64,
    stale_discarded: u64,
}

impl Counters {
    fn record(&mut self, outcome: ChildOutcomeV1) {
        self.children += 1;
        match outcome {
            ChildOutcomeV1::Queued { .. } => self.queued += 1,
            ChildOutcomeV1::Superseded { .. } => self.superseded += 1,
            ChildOutcomeV1::AlreadyQueued { .. } => self.already_queued += 1,
            ChildOutcomeV1::AlreadyClosed { .. } => self.already_closed += 1,
        }
    }
}
