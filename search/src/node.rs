//! Search node and frontier ordering key.

use octile_kernel::carrier::grid_state::GridStateV1;
use octile_kernel::operators::cost::Cost;
use octile_kernel::operators::moves::BlankMove;

/// An immutable node in the search registry.
///
/// Nodes live in a flat `Vec` indexed by `node_id`. The parent link is an id
/// into the same registry, assigned once at creation, so the registry is
/// always a tree rooted at node 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNodeV1 {
    /// Registry index of this node.
    pub node_id: u64,
    /// Parent node ID (`None` for root).
    pub parent_id: Option<u64>,
    /// Puzzle state at this node.
    pub state: GridStateV1,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Cumulative path cost from the start.
    pub g: Cost,
    /// Heuristic estimate to the goal.
    pub h: Cost,
    /// The move that produced this node from its parent.
    pub producing_move: Option<BlankMove>,
    /// Incremental cost of `producing_move` (zero for root).
    pub move_cost: Cost,
}

impl SearchNodeV1 {
    /// The root node for `state`.
    #[must_use]
    pub fn root(state: GridStateV1, h: Cost) -> Self {
        Self {
            node_id: 0,
            parent_id: None,
            state,
            depth: 0,
            g: Cost::ZERO,
            h,
            producing_move: None,
            move_cost: Cost::ZERO,
        }
    }

    /// Evaluation `f = g + h` (the frontier ordering key).
    #[must_use]
    pub fn f(&self) -> Cost {
        self.g + self.h
    }
}

/// The frontier ordering key: `(f, h, state)`.
///
/// Lower `f` first, then lower `h` (closer to the goal), then the state's
/// lexicographic order. The key is total, so pop order never depends on
/// insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    pub f: Cost,
    pub h: Cost,
    pub state: GridStateV1,
}

impl From<&SearchNodeV1> for FrontierKey {
    fn from(node: &SearchNodeV1) -> Self {
        Self {
            f: node.f(),
            h: node.h,
            state: node.state,
        }
    }
}
