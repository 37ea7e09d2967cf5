//! Batch sequencing commands over decoded path documents.
//!
//! Used by `sfpctl` to apply one sequencer operation to every path of a
//! document, or to a single path selected by name.

use sfc_types::ServiceFunctionPath;
use tracing::info;

use crate::error::{PathMgrError, PathMgrResult};
use crate::sequencer;

/// Sequencer operation applied to each selected path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCommand {
    /// Put hops in traversal order by stored hop number.
    Order,
    /// Number hops and assign service indexes from list order.
    Renumber,
    /// Derive the starting index from the hop list, then renumber.
    Reindex,
}

impl PathCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathCommand::Order => "order",
            PathCommand::Renumber => "renumber",
            PathCommand::Reindex => "reindex",
        }
    }

    fn run(&self, path: &mut ServiceFunctionPath) -> PathMgrResult<()> {
        match self {
            PathCommand::Order => {
                sequencer::order_hops_by_hop_number(path);
                Ok(())
            }
            PathCommand::Renumber => sequencer::update_hops_order(path),
            PathCommand::Reindex => sequencer::update_starting_index(path),
        }
    }
}

/// Applies `command` to the paths selected by `only` (all paths if `None`).
///
/// Returns the number of paths processed. Stops at the first failing path;
/// paths before it have already been updated.
///
/// # Errors
///
/// Returns [`PathMgrError::PathNotFound`] if `only` names no path, or the
/// error of the first path the command fails on.
pub fn apply(
    command: PathCommand,
    paths: &mut [ServiceFunctionPath],
    only: Option<&str>,
) -> PathMgrResult<usize> {
    let mut processed = 0;
    for path in paths
        .iter_mut()
        .filter(|path| only.map_or(true, |name| path.name == name))
    {
        command.run(path)?;
        processed += 1;
    }

    if processed == 0 {
        if let Some(name) = only {
            return Err(PathMgrError::path_not_found(name));
        }
    }

    info!(command = command.as_str(), processed, "Applied command");
    Ok(processed)
}

/// Returns `(name, service function hop count)` for the selected paths.
pub fn hop_counts(
    paths: &[ServiceFunctionPath],
    only: Option<&str>,
) -> PathMgrResult<Vec<(String, usize)>> {
    let counts: Vec<(String, usize)> = paths
        .iter()
        .filter(|path| only.map_or(true, |name| path.name == name))
        .map(|path| (path.name.clone(), sequencer::count_service_function_hops(path)))
        .collect();

    match only {
        Some(name) if counts.is_empty() => Err(PathMgrError::path_not_found(name)),
        _ => Ok(counts),
    }
}
