//! In-process determinism and budget properties.

use lock_tests::{state, walk, DEMO_START, GOAL};
use octile_kernel::carrier::grid_state::GridStateV1;
use octile_search::policy::SearchPolicyV1;
use octile_search::search::{search, SearchResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn run(start: GridStateV1, limit: u64) -> SearchResult {
    search(
        &start,
        &state(GOAL),
        &SearchPolicyV1::with_max_expansions(limit),
    )
    .unwrap()
}

fn sampled_starts(seed: u64, count: usize) -> Vec<GridStateV1> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let steps = rng.random_range(4..=18);
            walk(state(GOAL), steps, |n| rng.random_range(0..n))
        })
        .collect()
}

#[test]
fn repeated_runs_produce_identical_bytes() {
    let baseline = run(state(DEMO_START), 15)
        .trace
        .to_canonical_json_bytes()
        .unwrap();
    for _ in 0..10 {
        let again = run(state(DEMO_START), 15)
            .trace
            .to_canonical_json_bytes()
            .unwrap();
        assert_eq!(baseline, again);
    }
}

#[test]
fn concurrent_runs_agree() {
    let starts = sampled_starts(17, 8);
    let sequential: Vec<Vec<u8>> = starts
        .iter()
        .map(|s| run(*s, 200).trace.to_canonical_json_bytes().unwrap())
        .collect();

    let concurrent: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = starts
            .iter()
            .map(|s| scope.spawn(move || run(*s, 200).trace.to_canonical_json_bytes().unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
}

#[test]
fn budget_is_never_exceeded() {
    for start in sampled_starts(23, 20) {
        for limit in [1, 2, 5, 15, 40] {
            let result = run(start, limit);
            let expanded = result.trace.expansions.len() as u64;
            assert!(expanded <= limit);
            assert_eq!(result.trace.metadata.total_expansions, expanded);
            if !result.is_goal_reached() {
                assert!(result.is_limit_reached());
                assert_eq!(expanded, limit);
            }
        }
    }
}

#[test]
fn smaller_budget_trace_is_a_prefix() {
    for start in sampled_starts(29, 10) {
        let long = run(start, 60);
        for limit in [1, 3, 10] {
            let short = run(start, limit);
            let n = short.trace.expansions.len();
            assert_eq!(
                short.trace.expansions[..],
                long.trace.expansions[..n],
                "budget must only truncate the expansion sequence"
            );
        }
    }
}
