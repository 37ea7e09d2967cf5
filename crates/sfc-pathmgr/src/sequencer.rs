//! Hop sequencing for service function paths.
//!
//! Keeps the two derived hop fields, `hop-number` and `service-index`,
//! consistent with the order of the hop list, and recovers the list order
//! of a loaded path from its stored hop numbers.
//!
//! Only service function hops consume a service index. Forwarder hops
//! inherit the current index. The index never drops below 1; once it gets
//! there every later hop holds 1.
//!
//! # Example
//!
//! ```
//! use sfc_pathmgr::sequencer;
//! use sfc_types::{Hop, ServiceFunctionPath};
//!
//! let mut path = ServiceFunctionPath::new("sfp1")
//!     .with_starting_index(255)
//!     .with_hop(Hop::service_function("firewall-1"))
//!     .with_hop(Hop::forwarder("sff-1"))
//!     .with_hop(Hop::service_function("nat-1"));
//!
//! sequencer::update_hops_order(&mut path).unwrap();
//!
//! let indexes: Vec<u8> = path.hops.iter()
//!     .map(|hop| hop.service_index().unwrap().as_u8())
//!     .collect();
//! assert_eq!(indexes, vec![255, 254, 254]);
//! ```

use sfc_types::{ServiceFunctionPath, ServiceIndex};
use tracing::{debug, instrument, warn};

use crate::error::{PathMgrError, PathMgrResult};
use crate::tables::fields;

/// Sorts the hops of `path` ascending by stored hop number.
///
/// The sort is stable. Hops without a hop number (inserted since the path
/// was last sequenced) go after all numbered hops in their current order.
/// Service indexes and the starting index are left untouched.
#[instrument(skip(path), fields(sfp = %path.name, hops = path.hops.len()))]
pub fn order_hops_by_hop_number(path: &mut ServiceFunctionPath) {
    path.hops
        .sort_by_key(|hop| (hop.hop_number().is_none(), hop.hop_number()));
    debug!("Ordered hops by hop number");
}

/// Returns the number of hops that visit a service function.
pub fn count_service_function_hops(path: &ServiceFunctionPath) -> usize {
    path.service_function_hops().count()
}

/// Renumbers the hops of `path` from their list order.
///
/// Hop `i` gets hop number `i`. The first hop gets the path's starting
/// index and each service function hop lowers the index for the hops after
/// it by one, stopping at 1.
///
/// # Errors
///
/// Returns [`PathMgrError::InvalidArgument`] if the starting index is
/// missing or outside 1-255. The path is not modified in that case.
#[instrument(skip(path), fields(sfp = %path.name, hops = path.hops.len()))]
pub fn update_hops_order(path: &mut ServiceFunctionPath) -> PathMgrResult<()> {
    let starting_index = validated_starting_index(path)?;
    if u32::try_from(path.hops.len()).is_err() {
        return Err(PathMgrError::invalid_argument(
            fields::SERVICE_PATH_HOP,
            format!("path '{}' has too many hops to number", path.name),
        ));
    }

    let mut service_index = starting_index;
    let mut saturated = 0usize;

    for (hop_number, hop) in (0u32..).zip(path.hops.iter_mut()) {
        hop.set_hop_number(hop_number);
        hop.set_service_index(service_index);

        if hop.is_service_function() {
            if service_index.is_floor() {
                saturated += 1;
            }
            service_index = service_index.decrement();
        }
    }

    // The last service function hop legitimately sits at 1; any others there
    // share the floor with it.
    if saturated > 1 {
        warn!(
            starting_index = %starting_index,
            saturated,
            "Service index saturated at 1"
        );
    }

    debug!(starting_index = %starting_index, "Renumbered hops");
    Ok(())
}

/// Resets the starting index of `path` to the number of service function
/// hops it contains (at least 1), then renumbers all hops.
///
/// Running it again on its own output changes nothing.
///
/// # Errors
///
/// Returns [`PathMgrError::InvalidArgument`] if the path has more service
/// function hops than the largest service index (255).
#[instrument(skip(path), fields(sfp = %path.name, hops = path.hops.len()))]
pub fn update_starting_index(path: &mut ServiceFunctionPath) -> PathMgrResult<()> {
    let count = count_service_function_hops(path).max(1);
    let starting_index = ServiceIndex::try_from(count).map_err(|_| {
        PathMgrError::invalid_argument(
            fields::STARTING_INDEX,
            format!(
                "path '{}' has {} service function hops, more than the maximum service index {}",
                path.name,
                count,
                ServiceIndex::MAX
            ),
        )
    })?;

    let new_value = i64::from(starting_index.as_u8());
    if path.starting_index != Some(new_value) {
        debug!(
            old = ?path.starting_index,
            new = new_value,
            "Corrected starting index"
        );
    }
    path.starting_index = Some(new_value);

    update_hops_order(path)
}

/// Parses the raw starting index of `path`.
fn validated_starting_index(path: &ServiceFunctionPath) -> PathMgrResult<ServiceIndex> {
    let raw = path.starting_index.ok_or_else(|| {
        PathMgrError::invalid_argument(
            fields::STARTING_INDEX,
            format!("path '{}' has no starting index", path.name),
        )
    })?;

    ServiceIndex::try_from(raw).map_err(|e| {
        PathMgrError::invalid_argument(
            fields::STARTING_INDEX,
            format!("path '{}': {}", path.name, e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sfc_types::Hop;

    fn si(v: u8) -> ServiceIndex {
        ServiceIndex::new(v).unwrap()
    }

    fn numbers(path: &ServiceFunctionPath) -> Vec<Option<u32>> {
        path.hops.iter().map(|hop| hop.hop_number()).collect()
    }

    fn indexes(path: &ServiceFunctionPath) -> Vec<u8> {
        path.hops
            .iter()
            .map(|hop| hop.service_index().map(|si| si.as_u8()).unwrap_or(0))
            .collect()
    }

    fn names(path: &ServiceFunctionPath) -> Vec<&str> {
        path.hops.iter().map(|hop| hop.name()).collect()
    }

    fn unordered_path() -> ServiceFunctionPath {
        ServiceFunctionPath::new("sfp1")
            .with_starting_index(3)
            .with_hop(Hop::service_function("sf1").at(0, si(3)))
            .with_hop(Hop::service_function("sf3").at(2, si(1)))
            .with_hop(Hop::service_function("sf2").at(1, si(2)))
    }

    #[test]
    fn test_order_by_hop_number() {
        let mut path = unordered_path();
        order_hops_by_hop_number(&mut path);

        assert_eq!(names(&path), vec!["sf1", "sf2", "sf3"]);
        assert_eq!(numbers(&path), vec![Some(0), Some(1), Some(2)]);
        assert_eq!(indexes(&path), vec![3, 2, 1]);
        assert_eq!(path.starting_index, Some(3));
    }

    #[test]
    fn test_order_is_stable_and_puts_unnumbered_last() {
        let mut path = ServiceFunctionPath::new("sfp1")
            .with_hop(Hop::service_function("new-a"))
            .with_hop(Hop::service_function("dup-1").at(1, si(5)))
            .with_hop(Hop::service_function("first").at(0, si(6)))
            .with_hop(Hop::service_function("dup-2").at(1, si(5)))
            .with_hop(Hop::forwarder("new-b"));

        order_hops_by_hop_number(&mut path);

        assert_eq!(names(&path), vec!["first", "dup-1", "dup-2", "new-a", "new-b"]);
    }

    #[test]
    fn test_count_service_function_hops() {
        let path = ServiceFunctionPath::new("sfp1")
            .with_hop(Hop::service_function("sf1"))
            .with_hop(Hop::forwarder("sff1"))
            .with_hop(Hop::service_function("sf2").via("sff2"));
        assert_eq!(count_service_function_hops(&path), 2);
        assert_eq!(count_service_function_hops(&ServiceFunctionPath::new("empty")), 0);
    }

    #[test]
    fn test_update_hops_order_uses_list_order() {
        let mut path = unordered_path();
        update_hops_order(&mut path).unwrap();

        assert_eq!(names(&path), vec!["sf1", "sf3", "sf2"]);
        assert_eq!(numbers(&path), vec![Some(0), Some(1), Some(2)]);
        assert_eq!(indexes(&path), vec![3, 2, 1]);
    }

    #[test]
    fn test_forwarder_hops_do_not_consume_index() {
        let mut path = ServiceFunctionPath::new("sfp1")
            .with_starting_index(5)
            .with_hop(Hop::service_function("sf1"))
            .with_hop(Hop::forwarder("sff1"))
            .with_hop(Hop::service_function("sf2"))
            .with_hop(Hop::forwarder("sff2"));

        update_hops_order(&mut path).unwrap();

        assert_eq!(indexes(&path), vec![5, 4, 4, 3]);
    }

    #[test]
    fn test_update_hops_order_saturates_at_one() {
        let mut path = ServiceFunctionPath::new("sfp1").with_starting_index(2);
        for i in 0..5 {
            path.hops.push(Hop::service_function(format!("sf{}", i)));
        }

        update_hops_order(&mut path).unwrap();

        assert_eq!(indexes(&path), vec![2, 1, 1, 1, 1]);
    }

    #[test]
    fn test_update_hops_order_rejects_bad_starting_index() {
        for raw in [None, Some(0), Some(-4), Some(256)] {
            let mut path = unordered_path();
            path.starting_index = raw;
            let before = path.clone();

            let err = update_hops_order(&mut path).unwrap_err();

            assert!(matches!(err, PathMgrError::InvalidArgument { .. }), "{:?}", raw);
            assert_eq!(path, before);
        }
    }

    #[test]
    fn test_update_hops_order_empty_path() {
        let mut path = ServiceFunctionPath::new("sfp1").with_starting_index(10);
        update_hops_order(&mut path).unwrap();
        assert!(path.hops.is_empty());
    }

    #[test]
    fn test_update_starting_index_corrects_bad_value() {
        let mut path = ServiceFunctionPath::new("sfp1")
            .with_starting_index(1)
            .with_hop(Hop::service_function("sf1").at(0, si(1)))
            .with_hop(Hop::service_function("sf2").at(1, si(1)))
            .with_hop(Hop::service_function("sf3").at(2, si(1)));

        update_starting_index(&mut path).unwrap();

        assert_eq!(path.starting_index, Some(3));
        assert_eq!(indexes(&path), vec![3, 2, 1]);
    }

    #[test]
    fn test_update_starting_index_without_starting_index() {
        let mut path = ServiceFunctionPath::new("sfp1")
            .with_hop(Hop::service_function("sf1"))
            .with_hop(Hop::forwarder("sff1"));

        update_starting_index(&mut path).unwrap();

        assert_eq!(path.starting_index, Some(1));
        assert_eq!(indexes(&path), vec![1, 1]);
    }

    #[test]
    fn test_update_starting_index_empty_path() {
        let mut path = ServiceFunctionPath::new("sfp1");
        update_starting_index(&mut path).unwrap();
        assert_eq!(path.starting_index, Some(1));
    }

    #[test]
    fn test_update_starting_index_is_idempotent() {
        let mut path = unordered_path().with_hop(Hop::forwarder("sff1"));
        update_starting_index(&mut path).unwrap();
        let once = path.clone();

        update_starting_index(&mut path).unwrap();

        assert_eq!(path, once);
    }

    #[test]
    fn test_update_starting_index_rejects_too_many_hops() {
        let mut path = ServiceFunctionPath::new("sfp1");
        for i in 0..256 {
            path.hops.push(Hop::service_function(format!("sf{}", i)));
        }

        let err = update_starting_index(&mut path).unwrap_err();

        assert!(err.is_argument_error());
        assert_eq!(path.starting_index, None);
    }
}
