//! Cost-to-goal estimates.
//!
//! The default estimate is the octile distance summed over tiles 1..=8 (the
//! blank is excluded). Its diagonal surcharge is derived from the kernel's
//! move constants, so the estimate stays admissible and consistent for the
//! move set it guides.

use octile_kernel::carrier::grid_state::{GridStateV1, CELL_COUNT};
use octile_kernel::operators::cost::{Cost, DIAGONAL, ORTHOGONAL};

/// Extra cost of a diagonal step over an orthogonal one (0.4).
pub const DIAGONAL_SURCHARGE: Cost = DIAGONAL.saturating_sub(ORTHOGONAL);

/// Trait for cost-to-goal estimates.
///
/// Implementations must be deterministic: same `(state, goal)` → same cost.
pub trait Heuristic: Send + Sync {
    /// Estimated remaining cost from `state` to `goal`.
    fn estimate(&self, state: &GridStateV1, goal: &GridStateV1) -> Cost;
}

/// Sum of per-tile octile distances.
#[derive(Debug, Clone, Copy, Default)]
pub struct OctileHeuristic;

impl Heuristic for OctileHeuristic {
    fn estimate(&self, state: &GridStateV1, goal: &GridStateV1) -> Cost {
        octile_distance(state, goal)
    }
}

/// Always zero; turns best-first search into uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _state: &GridStateV1, _goal: &GridStateV1) -> Cost {
        Cost::ZERO
    }
}

/// Octile distance for one tile displaced by `d_row` rows and `d_col` columns:
/// `max(d_row, d_col) + 0.4 · min(d_row, d_col)`.
#[must_use]
pub fn octile(d_row: u8, d_col: u8) -> Cost {
    let straight = u32::from(d_row.max(d_col));
    let diagonal = u32::from(d_row.min(d_col));
    ORTHOGONAL.times(straight) + DIAGONAL_SURCHARGE.times(diagonal)
}

/// Sum of [`octile`] over tiles 1..=8 between `state` and `goal`.
#[must_use]
pub fn octile_distance(state: &GridStateV1, goal: &GridStateV1) -> Cost {
    let here = state.positions();
    let there = goal.positions();
    (1..CELL_COUNT)
        .map(|tile| {
            let (d_row, d_col) = here[tile].abs_diff(there[tile]);
            octile(d_row, d_col)
        })
        .sum()
}
