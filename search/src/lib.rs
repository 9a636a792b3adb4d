//! Octile Search: bounded best-first search over the 3×3 sliding-tile puzzle.
//!
//! This crate provides the search layer. It depends only on `octile_kernel`;
//! it does NOT depend on `octile_harness` and performs no I/O.
//!
//! # Crate dependency graph
//!
//! ```text
//! octile_kernel  ←  octile_search  ←  octile_harness
//! (states, moves)    (frontier, trace)  (fixtures, reports, bundles)
//! ```
//!
//! # Key types
//!
//! - [`SearchNodeV1`]: registry node with parent back-reference by id
//! - [`BestFirstFrontier`]: `(f, h, state)`-ordered open set with lazy deletion
//! - [`SearchTraceV1`]: ordered expansion log (one record per expansion)
//! - [`SearchPolicyV1`]: expansion budget
//! - [`Heuristic`]: trait seam for cost estimates ([`OctileHeuristic`] by default)
//!
//! [`SearchNodeV1`]: node::SearchNodeV1
//! [`BestFirstFrontier`]: frontier::BestFirstFrontier
//! [`SearchTraceV1`]: trace::SearchTraceV1
//! [`SearchPolicyV1`]: policy::SearchPolicyV1
//! [`Heuristic`]: heuristic::Heuristic
//! [`OctileHeuristic`]: heuristic::OctileHeuristic

#![forbid(unsafe_code)]

pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod search;
pub mod trace;
