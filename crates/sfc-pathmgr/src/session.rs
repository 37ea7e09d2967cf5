//! Editing session for service function paths.
//!
//! A [`PathSession`] owns the paths being edited together with their edit
//! state. Callers load the result of a datastore list into it, apply hop
//! edits, and take the sequenced path back out with [`PathSession::submit`]
//! to send as a full replace.

use std::collections::BTreeMap;

use sfc_types::{Hop, ServiceFunctionPath};
use tracing::{debug, info, instrument};

use crate::error::{PathMgrError, PathMgrResult};
use crate::sequencer;
use crate::tables::fields;

/// Edit state of a path relative to the datastore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditState {
    /// Matches what was last loaded from or submitted to the datastore.
    Persisted,
    /// Created in this session and never submitted.
    New,
    /// Loaded, then changed locally.
    Edited,
}

impl EditState {
    /// Returns the state name as shown to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditState::Persisted => "persisted",
            EditState::New => "new",
            EditState::Edited => "edited",
        }
    }

    fn touch(&mut self) {
        if *self == EditState::Persisted {
            *self = EditState::Edited;
        }
    }
}

#[derive(Debug, Clone)]
struct SessionEntry {
    path: ServiceFunctionPath,
    state: EditState,
}

/// Paths being edited, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct PathSession {
    paths: BTreeMap<String, SessionEntry>,
}

impl PathSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the session contents with paths read from the datastore.
    ///
    /// Each path's hops are put back in traversal order by hop number and the
    /// path is marked [`EditState::Persisted`]. Blank or duplicate names are
    /// rejected and leave the session unchanged.
    #[instrument(skip_all)]
    pub fn load<I>(&mut self, paths: I) -> PathMgrResult<()>
    where
        I: IntoIterator<Item = ServiceFunctionPath>,
    {
        let mut loaded = BTreeMap::new();
        for mut path in paths {
            check_name(&path.name)?;
            if loaded.contains_key(&path.name) {
                return Err(PathMgrError::DuplicatePath { name: path.name });
            }
            sequencer::order_hops_by_hop_number(&mut path);
            loaded.insert(
                path.name.clone(),
                SessionEntry {
                    path,
                    state: EditState::Persisted,
                },
            );
        }

        info!("Loaded {} service function paths", loaded.len());
        self.paths = loaded;
        Ok(())
    }

    /// Adds an empty path.
    #[instrument(skip(self))]
    pub fn create(&mut self, name: &str, starting_index: i64) -> PathMgrResult<&ServiceFunctionPath> {
        check_name(name)?;
        if self.paths.contains_key(name) {
            return Err(PathMgrError::DuplicatePath {
                name: name.to_string(),
            });
        }

        let entry = SessionEntry {
            path: ServiceFunctionPath::new(name).with_starting_index(starting_index),
            state: EditState::New,
        };
        info!("Created service function path {}", name);
        Ok(&self.paths.entry(name.to_string()).or_insert(entry).path)
    }

    /// Returns the path with this name.
    pub fn get(&self, name: &str) -> Option<&ServiceFunctionPath> {
        self.paths.get(name).map(|entry| &entry.path)
    }

    /// Returns the edit state of the path with this name.
    pub fn state(&self, name: &str) -> Option<EditState> {
        self.paths.get(name).map(|entry| entry.state)
    }

    /// Path names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// Number of paths in the session.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if the session holds no paths.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Changes the raw starting index of a path.
    pub fn set_starting_index(&mut self, name: &str, starting_index: i64) -> PathMgrResult<()> {
        let entry = self.entry_mut(name)?;
        entry.path.starting_index = Some(starting_index);
        entry.state.touch();
        Ok(())
    }

    /// Inserts a hop before `position`; `position == len` appends.
    ///
    /// The hop keeps whatever hop number and service index it carries until
    /// the path is submitted or re-indexed. A hop with a blank service
    /// function or forwarder name is rejected.
    #[instrument(skip(self, hop), fields(hop = %hop))]
    pub fn insert_hop(&mut self, name: &str, position: usize, hop: Hop) -> PathMgrResult<()> {
        check_hop(&hop)?;
        let entry = self.entry_mut(name)?;
        let len = entry.path.hops.len();
        if position > len {
            return Err(PathMgrError::HopOutOfRange {
                name: name.to_string(),
                position,
                len,
            });
        }

        entry.path.hops.insert(position, hop);
        entry.state.touch();
        debug!("Inserted hop");
        Ok(())
    }

    /// Removes and returns the hop at `position`.
    #[instrument(skip(self))]
    pub fn remove_hop(&mut self, name: &str, position: usize) -> PathMgrResult<Hop> {
        let entry = self.entry_mut(name)?;
        check_position(name, position, entry.path.hops.len())?;

        let hop = entry.path.hops.remove(position);
        entry.state.touch();
        debug!(hop = %hop, "Removed hop");
        Ok(hop)
    }

    /// Moves the hop at `from` so that it ends up at index `to`.
    #[instrument(skip(self))]
    pub fn move_hop(&mut self, name: &str, from: usize, to: usize) -> PathMgrResult<()> {
        let entry = self.entry_mut(name)?;
        let len = entry.path.hops.len();
        check_position(name, from, len)?;
        check_position(name, to, len)?;

        if from != to {
            let hop = entry.path.hops.remove(from);
            entry.path.hops.insert(to, hop);
            entry.state.touch();
            debug!("Moved hop");
        }
        Ok(())
    }

    /// Recomputes the starting index from the hop list and renumbers hops.
    ///
    /// The path is marked edited only if something changed.
    #[instrument(skip(self))]
    pub fn reindex(&mut self, name: &str) -> PathMgrResult<&ServiceFunctionPath> {
        let entry = self.entry_mut(name)?;
        let mut path = entry.path.clone();
        sequencer::update_starting_index(&mut path)?;

        if path != entry.path {
            entry.path = path;
            entry.state.touch();
            info!(
                starting_index = ?entry.path.starting_index,
                "Re-indexed service function path"
            );
        }
        Ok(&entry.path)
    }

    /// Sequences a path from its hop order and returns it for persisting.
    ///
    /// The path is marked [`EditState::Persisted`] on success. On error the
    /// path and its state are unchanged.
    #[instrument(skip(self))]
    pub fn submit(&mut self, name: &str) -> PathMgrResult<ServiceFunctionPath> {
        let entry = self.entry_mut(name)?;
        let mut path = entry.path.clone();
        sequencer::update_hops_order(&mut path)?;

        entry.path = path;
        entry.state = EditState::Persisted;
        info!("Submitted service function path");
        Ok(entry.path.clone())
    }

    /// Drops a path from the session and returns it.
    pub fn remove(&mut self, name: &str) -> PathMgrResult<ServiceFunctionPath> {
        let entry = self
            .paths
            .remove(name)
            .ok_or_else(|| PathMgrError::path_not_found(name))?;
        info!("Removed service function path {}", name);
        Ok(entry.path)
    }

    /// Iterates over all paths in name order.
    pub fn paths(&self) -> impl Iterator<Item = &ServiceFunctionPath> {
        self.paths.values().map(|entry| &entry.path)
    }

    fn entry_mut(&mut self, name: &str) -> PathMgrResult<&mut SessionEntry> {
        self.paths
            .get_mut(name)
            .ok_or_else(|| PathMgrError::path_not_found(name))
    }
}

fn check_name(name: &str) -> PathMgrResult<()> {
    if name.trim().is_empty() {
        return Err(PathMgrError::invalid_argument(
            fields::NAME,
            "path name must not be empty",
        ));
    }
    Ok(())
}

fn check_hop(hop: &Hop) -> PathMgrResult<()> {
    if hop.is_service_function() && hop.name().trim().is_empty() {
        return Err(PathMgrError::invalid_argument(
            fields::SERVICE_FUNCTION_NAME,
            "service function name must not be empty",
        ));
    }
    if hop.forwarder_name().is_some_and(|fwd| fwd.trim().is_empty()) {
        return Err(PathMgrError::invalid_argument(
            fields::SERVICE_FUNCTION_FORWARDER,
            "forwarder name must not be empty",
        ));
    }
    Ok(())
}

fn check_position(name: &str, position: usize, len: usize) -> PathMgrResult<()> {
    if position < len {
        Ok(())
    } else {
        Err(PathMgrError::HopOutOfRange {
            name: name.to_string(),
            position,
            len,
        })
    }
}
