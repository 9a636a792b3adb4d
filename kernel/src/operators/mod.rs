//! Operators module: blank moves, their costs, and successor generation.
//!
//! Depends on `carrier`.

pub mod cost;
pub mod moves;
