//! Carrier module: the puzzle state value type.
//!
//! Depends only on `proof` (for fingerprints).

pub mod grid_state;
