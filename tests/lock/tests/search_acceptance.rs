//! End-to-end acceptance cases for the bounded search.

use lock_tests::{state, DEMO_START, GOAL};
use octile_kernel::carrier::grid_state::StateError;
use octile_kernel::operators::cost::Cost;
use octile_kernel::operators::moves::{apply_move, BlankMove};
use octile_search::error::SearchError;
use octile_search::heuristic::ZeroHeuristic;
use octile_search::policy::SearchPolicyV1;
use octile_search::search::{search, search_cells, search_with_heuristic};
use octile_search::trace::{ChildOutcomeV1, TerminationReasonV1};

#[test]
fn start_equal_to_goal_is_found_immediately() {
    let result = search_cells(&GOAL, &GOAL, &SearchPolicyV1::with_max_expansions(5)).unwrap();

    assert!(result.is_goal_reached());
    assert_eq!(result.trace.expansions.len(), 1);
    let record = &result.trace.expansions[0];
    assert_eq!(record.expansion_index, 1);
    assert_eq!(record.g, Cost::ZERO);
    assert_eq!(record.h, Cost::ZERO);
    assert_eq!(record.f(), Cost::ZERO);
    assert!(record.is_goal);
    // The goal record still lists its successors for inspection.
    assert_eq!(record.children.len(), 8);
}

#[test]
fn demo_with_one_expansion_stops_at_the_limit() {
    let result =
        search_cells(&DEMO_START, &GOAL, &SearchPolicyV1::with_max_expansions(1)).unwrap();

    assert!(!result.is_goal_reached());
    assert_eq!(
        result.trace.metadata.termination_reason,
        TerminationReasonV1::ExpansionLimitReached { limit: 1 }
    );
    assert_eq!(result.trace.expansions.len(), 1);

    let record = &result.trace.expansions[0];
    assert_eq!(record.children.len(), 3, "corner blank has three successors");
    for (i, child) in record.children.iter().enumerate() {
        assert_eq!(
            child.outcome,
            ChildOutcomeV1::Queued {
                node_id: i as u64 + 1
            }
        );
    }
    assert!(result.goal_node.is_none());
    assert!(result.solution_path().is_none());
    assert!(result.solution_states().is_empty());
}

#[test]
fn duplicate_tile_start_is_rejected() {
    let err = search_cells(
        &[1, 1, 2, 3, 4, 5, 6, 7, 8],
        &GOAL,
        &SearchPolicyV1::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SearchError::InvalidState(StateError::Duplicate { value: 1, .. })
    ));
}

#[test]
fn out_of_range_goal_is_rejected() {
    let err = search_cells(
        &DEMO_START,
        &[1, 2, 3, 8, 9, 4, 7, 6, 5],
        &SearchPolicyV1::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        SearchError::InvalidState(StateError::OutOfRange { index: 4, value: 9 })
    );
}

#[test]
fn default_demo_reaches_the_goal_within_fifteen_expansions() {
    let result = search(&state(DEMO_START), &state(GOAL), &SearchPolicyV1::default()).unwrap();

    assert!(result.is_goal_reached());
    assert_eq!(result.trace.expansions.len(), 7);
    assert_eq!(result.goal_node.as_ref().map(|n| n.g), Some(Cost::from_tenths(60)));
    assert_eq!(
        result.solution_moves(),
        vec![
            BlankMove::Right,
            BlankMove::Down,
            BlankMove::Right,
            BlankMove::Down,
            BlankMove::Left,
            BlankMove::Up,
        ]
    );
}

#[test]
fn solution_path_is_a_valid_move_chain() {
    let result = search(
        &state([2, 8, 4, 0, 3, 1, 7, 6, 5]),
        &state(GOAL),
        &SearchPolicyV1::with_max_expansions(500),
    )
    .unwrap();
    assert!(result.is_goal_reached());

    let states = result.solution_states();
    let moves = result.solution_moves();
    assert_eq!(states.len(), moves.len() + 1);
    for (pair, mv) in states.windows(2).zip(&moves) {
        assert_eq!(apply_move(&pair[0], *mv), Ok(pair[1]));
    }
    let total: Cost = moves.iter().map(|m| m.cost()).sum();
    assert_eq!(Some(total), result.goal_node.map(|n| n.g));
    assert_eq!(total, Cost::from_tenths(78));
}

#[test]
fn uniform_cost_agrees_on_optimal_cost() {
    let policy = SearchPolicyV1::with_max_expansions(200_000);
    let start = state([2, 8, 4, 0, 3, 1, 7, 6, 5]);
    let goal = state(GOAL);

    let informed = search(&start, &goal, &policy).unwrap();
    let uniform = search_with_heuristic(&start, &goal, &policy, &ZeroHeuristic).unwrap();

    assert!(uniform.is_goal_reached());
    assert_eq!(
        informed.goal_node.map(|n| n.g),
        uniform.goal_node.map(|n| n.g)
    );
    assert!(
        informed.trace.expansions.len() < uniform.trace.expansions.len(),
        "the octile estimate should prune work"
    );
}

#[test]
fn supersession_is_recorded_when_a_cheaper_path_appears() {
    let result = search(
        &state([2, 8, 4, 0, 3, 1, 7, 6, 5]),
        &state(GOAL),
        &SearchPolicyV1::with_max_expansions(60),
    )
    .unwrap();
    let meta = &result.trace.metadata;
    assert_eq!(meta.total_superseded, 1);
    assert_eq!(meta.total_already_queued, 1);

    let superseded = result
        .trace
        .expansions
        .iter()
        .flat_map(|e| e.children.iter().map(move |c| (e.expansion_index, c)))
        .find(|(_, c)| matches!(c.outcome, ChildOutcomeV1::Superseded { .. }))
        .unwrap();
    assert_eq!(superseded.0, 10);
    assert_eq!(superseded.1.mv, BlankMove::Left);
    assert_eq!(superseded.1.g, Cost::from_tenths(54));
    assert_eq!(
        superseded.1.outcome,
        ChildOutcomeV1::Superseded {
            node_id: 42,
            previous_g: Cost::from_tenths(62)
        }
    );
}

#[test]
fn superseded_entries_are_discarded_when_popped() {
    let result = search(
        &state([1, 3, 2, 0, 5, 7, 6, 8, 4]),
        &state(GOAL),
        &SearchPolicyV1::with_max_expansions(80),
    )
    .unwrap();
    let meta = &result.trace.metadata;
    assert!(result.is_goal_reached());
    assert_eq!(meta.total_expansions, 33);
    assert_eq!(meta.total_stale_discarded, 1);
    assert_eq!(meta.total_superseded, 6);
    assert_eq!(result.goal_node.map(|n| n.g), Some(Cost::from_tenths(112)));
}
