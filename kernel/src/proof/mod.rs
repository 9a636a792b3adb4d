//! Proof module: canonical JSON bytes and content hashing.
//!
//! Nothing internal is imported here.

pub mod canon;
pub mod hash;
