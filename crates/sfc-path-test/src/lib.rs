//! Test infrastructure for service function path crates
//!
//! Provides:
//! - Path fixtures for ordering, numbering and re-indexing scenarios
//! - Path collection documents as stored in the datastore
//! - Verification helpers for hop numbers and service indexes

pub mod fixtures;
mod verification;

pub use fixtures::*;
pub use verification::*;
