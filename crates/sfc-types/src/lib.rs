//! Common types for service function chaining paths.
//!
//! This crate provides type-safe representations of the objects a service
//! function path is built from, with lossless (de)serialization to the
//! datastore's JSON representation:
//!
//! - [`ServiceFunctionPath`]: a named, ordered list of hops
//! - [`Hop`]: a service function hop or a forwarder-only hop
//! - [`ServiceIndex`]: NSH service index (1-255)

mod hop;
mod index;
mod path;

pub use hop::{ForwarderHop, Hop, ServiceFunctionHop};
pub use index::ServiceIndex;
pub use path::ServiceFunctionPath;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid service index: {0} (must be 1-255)")]
    InvalidServiceIndex(i64),

    #[error("invalid service index format: {0}")]
    InvalidServiceIndexFormat(String),

    #[error("invalid hop: {0}")]
    InvalidHop(String),

    #[error("path name must not be empty")]
    EmptyName,
}
