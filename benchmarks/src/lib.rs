//! Shared helpers for octile benchmark suites.

use octile_harness::fixture::{DEMO_GOAL, DEMO_START};
use octile_kernel::carrier::grid_state::GridStateV1;
use octile_kernel::operators::moves::neighbors;
use octile_search::policy::SearchPolicyV1;

/// A named search workload.
pub struct Regime {
    pub name: &'static str,
    pub start: [u8; 9],
    pub goal: [u8; 9],
    pub max_expansions: u64,
}

/// Workloads from a trivial solve up to a deep scramble.
pub const REGIMES: &[Regime] = &[
    Regime {
        name: "demo_limit_15",
        start: DEMO_START,
        goal: DEMO_GOAL,
        max_expansions: 15,
    },
    Regime {
        name: "supersession_limit_60",
        start: [2, 8, 4, 0, 3, 1, 7, 6, 5],
        goal: DEMO_GOAL,
        max_expansions: 60,
    },
    Regime {
        name: "stale_discard_limit_80",
        start: [1, 3, 2, 0, 5, 7, 6, 8, 4],
        goal: DEMO_GOAL,
        max_expansions: 80,
    },
    Regime {
        name: "reversed_limit_5000",
        start: [5, 6, 7, 4, 0, 8, 3, 2, 1],
        goal: DEMO_GOAL,
        max_expansions: 5000,
    },
];

impl Regime {
    /// `(start, goal, policy)` ready for `search()`.
    ///
    /// # Panics
    ///
    /// Panics if the regime cells are not permutations. Benchmark setup
    /// failures are fatal.
    #[must_use]
    pub fn inputs(&self) -> (GridStateV1, GridStateV1, SearchPolicyV1) {
        (
            GridStateV1::new(self.start).expect("regime start"),
            GridStateV1::new(self.goal).expect("regime goal"),
            SearchPolicyV1::with_max_expansions(self.max_expansions),
        )
    }
}

/// `count` states reached by deterministic blank walks from the demo goal.
///
/// # Panics
///
/// Panics if the demo goal is not a permutation.
#[must_use]
pub fn walked_states(count: usize, steps: usize) -> Vec<GridStateV1> {
    let goal = GridStateV1::new(DEMO_GOAL).expect("demo goal");
    (0..count)
        .map(|seed| {
            let mut current = goal;
            for step in 0..steps {
                let succ = neighbors(&current);
                current = succ[(seed * 7 + step * 3) % succ.len()].state;
            }
            current
        })
        .collect()
}
