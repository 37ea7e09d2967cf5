//! Service function path management.
//!
//! This crate keeps the hops of service function paths consistently
//! numbered and provides the editing workflow around it:
//!
//! - [`sequencer`]: hop ordering, hop numbering and service index assignment
//! - [`PathSession`]: paths under edit with their [`EditState`]
//! - [`commands`]: batch operations used by the `sfpctl` tool
//! - [`document`]: the datastore's path collection document
//! - [`error`]: Error types for path operations
//!
//! # Workflow
//!
//! 1. Load paths read from the datastore into a [`PathSession`]; hops are
//!    put back in traversal order by their stored hop numbers
//! 2. Insert, remove or move hops as the user edits
//! 3. Optionally re-index to derive the starting index from the hop list
//! 4. Submit to number the hops from their order and take the path out for
//!    a full-replace write
//!
//! # Example
//!
//! ```
//! use sfc_pathmgr::{EditState, PathSession};
//! use sfc_types::Hop;
//!
//! let mut session = PathSession::new();
//! session.create("sfp-web", 255)?;
//! session.insert_hop("sfp-web", 0, Hop::service_function("firewall-1"))?;
//! session.insert_hop("sfp-web", 1, Hop::service_function("nat-1").via("sff-2"))?;
//!
//! let path = session.submit("sfp-web")?;
//! assert_eq!(path.hops[1].hop_number(), Some(1));
//! assert_eq!(path.hops[1].service_index().map(|si| si.as_u8()), Some(254));
//! assert_eq!(session.state("sfp-web"), Some(EditState::Persisted));
//! # Ok::<(), sfc_pathmgr::PathMgrError>(())
//! ```

pub mod commands;
pub mod document;
pub mod error;
pub mod sequencer;
pub mod session;
pub mod tables;

// Re-export commonly used items at crate root
pub use error::{PathMgrError, PathMgrResult};
pub use session::{EditState, PathSession};
