//! Best-first frontier with lazy deletion of superseded entries.
//!
//! "Decrease key" is expressed by pushing a second, cheaper entry for the same
//! state. The frontier remembers the best `g` queued per state; an entry
//! whose `g` no longer matches is reported as superseded when it surfaces.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use octile_kernel::carrier::grid_state::GridStateV1;
use octile_kernel::operators::cost::Cost;

use crate::node::{FrontierKey, SearchNodeV1};

/// A frontier entry: ordering key plus the registry id of its node.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest `f` first).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node_id: u64,
    g: Cost,
}

/// An entry removed from the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Popped {
    pub node_id: u64,
    pub key: FrontierKey,
    pub g: Cost,
    /// A cheaper entry for the same state was pushed after this one.
    pub superseded: bool,
}

/// Best-first frontier manager.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) pop of the best entry
/// - A `HashMap<GridStateV1, Cost>` of the best `g` still queued per state
pub struct BestFirstFrontier {
    heap: BinaryHeap<FrontierEntry>,
    queued: HashMap<GridStateV1, Cost>,
    high_water: u64,
}

impl BestFirstFrontier {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            queued: HashMap::new(),
            high_water: 0,
        }
    }

    /// Push `node`, making it the live entry for its state.
    ///
    /// Callers check [`BestFirstFrontier::queued_g`] first; pushing a costlier
    /// entry than the one queued would supersede the cheaper one.
    pub fn push(&mut self, node: &SearchNodeV1) {
        self.queued.insert(node.state, node.g);
        self.heap.push(FrontierEntry {
            key: Reverse(FrontierKey::from(node)),
            node_id: node.node_id,
            g: node.g,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the entry with the lowest `(f, h, state)` key.
    ///
    /// A live pop removes the state from the queued index.
    #[must_use]
    pub fn pop(&mut self) -> Option<Popped> {
        let entry = self.heap.pop()?;
        let key = entry.key.0;
        let live = self.queued.get(&key.state) == Some(&entry.g);
        if live {
            self.queued.remove(&key.state);
        }
        Some(Popped {
            node_id: entry.node_id,
            key,
            g: entry.g,
            superseded: !live,
        })
    }

    /// The `g` of the live entry queued for `state`, if any.
    #[must_use]
    pub fn queued_g(&self, state: &GridStateV1) -> Option<Cost> {
        self.queued.get(state).copied()
    }

    /// Heap size, including superseded entries not yet popped.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the heap is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of heap size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}

impl Default for BestFirstFrontier {
    fn default() -> Self {
        Self::new()
    }
}
