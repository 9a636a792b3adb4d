//! Octile Kernel: the value types of the 3×3 sliding-tile puzzle.
//!
//! # API Surface
//!
//! - [`carrier::grid_state::GridStateV1`] -- validated, immutable tile permutation
//! - [`operators::moves::neighbors`] -- successor enumeration for the blank
//! - [`operators::cost::Cost`] -- exact fixed-point move and path costs
//! - [`proof::hash::canonical_hash`] -- domain-separated content hashing
//! - [`proof::canon::canonical_json_bytes`] -- sorted-key, integer-only JSON bytes
//!
//! # Module Dependency Direction
//!
//! `proof` ← `carrier` ← `operators`
//!
//! One-way only. No cycles. `carrier` uses `proof` for state fingerprints.
//! `operators` depends on `carrier`. `proof` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod operators;
pub mod proof;
