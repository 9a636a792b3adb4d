//! Octile Harness: fixture-driven runs of the search.
//!
//! The harness loads a run configuration, drives `octile_search`, renders
//! the trace for humans, and packages the result as a self-contained
//! artifact bundle with a content digest.
//!
//! The harness does NOT implement search logic; it delegates to the search
//! crate. Library code never installs a `tracing` subscriber.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bundle;
pub mod bundle_dir;
pub mod fixture;
pub mod report;
pub mod runner;
