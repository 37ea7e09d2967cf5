//! Verification helpers for testing sequenced paths
//!
//! Each check returns a [`VerificationError`] naming the first hop that
//! breaks the expected property

use sfc_types::{Hop, ServiceFunctionPath, ServiceIndex};
use thiserror::Error;

/// Verification error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Hop at position {position} has hop number {actual:?}, expected {expected}")]
    HopNumberMismatch {
        position: usize,
        expected: u32,
        actual: Option<u32>,
    },

    #[error("Hop at position {position} has no service index")]
    MissingServiceIndex { position: usize },

    #[error("Hop at position {position} has service index {actual}, expected {expected}")]
    ServiceIndexMismatch {
        position: usize,
        expected: u8,
        actual: u8,
    },

    #[error("Starting index {actual:?} is not a valid service index")]
    InvalidStartingIndex { actual: Option<i64> },

    #[error("Hop numbers not ascending at position {position}")]
    NotSorted { position: usize },

    #[error("Hop {hop} present {expected} times before, {actual} times after")]
    NotPermutation {
        hop: String,
        expected: usize,
        actual: usize,
    },
}

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerificationError>;

/// Hop numbers in list order
pub fn hop_numbers(path: &ServiceFunctionPath) -> Vec<Option<u32>> {
    path.hops.iter().map(Hop::hop_number).collect()
}

/// Service indexes in list order, 0 where missing
pub fn service_indexes(path: &ServiceFunctionPath) -> Vec<u8> {
    path.hops
        .iter()
        .map(|hop| hop.service_index().map(|si| si.as_u8()).unwrap_or(0))
        .collect()
}

/// Hop names in list order
pub fn hop_names(path: &ServiceFunctionPath) -> Vec<&str> {
    path.hops.iter().map(Hop::name).collect()
}

/// Verify that hop `i` has hop number `i`
pub fn verify_contiguous_hop_numbers(path: &ServiceFunctionPath) -> VerifyResult<()> {
    for (expected, (position, hop)) in (0u32..).zip(path.hops.iter().enumerate()) {
        if hop.hop_number() != Some(expected) {
            return Err(VerificationError::HopNumberMismatch {
                position,
                expected,
                actual: hop.hop_number(),
            });
        }
    }
    Ok(())
}

/// Verify the service index assignment rule: the first hop carries the
/// starting index, each service function hop lowers it by one for the
/// following hops, and it never drops below 1
pub fn verify_service_indexes(path: &ServiceFunctionPath) -> VerifyResult<()> {
    let mut expected = path
        .starting_index
        .and_then(|raw| ServiceIndex::try_from(raw).ok())
        .ok_or(VerificationError::InvalidStartingIndex {
            actual: path.starting_index,
        })?;

    for (position, hop) in path.hops.iter().enumerate() {
        let actual = hop
            .service_index()
            .ok_or(VerificationError::MissingServiceIndex { position })?;
        if actual != expected {
            return Err(VerificationError::ServiceIndexMismatch {
                position,
                expected: expected.as_u8(),
                actual: actual.as_u8(),
            });
        }
        if hop.is_service_function() {
            expected = expected.decrement();
        }
    }
    Ok(())
}

/// Verify both derived fields of every hop
pub fn verify_sequenced(path: &ServiceFunctionPath) -> VerifyResult<()> {
    verify_contiguous_hop_numbers(path)?;
    verify_service_indexes(path)
}

/// Verify that hop numbers never decrease along the list, with unnumbered
/// hops only at the end
pub fn verify_sorted_by_hop_number(path: &ServiceFunctionPath) -> VerifyResult<()> {
    for (position, pair) in path.hops.windows(2).enumerate() {
        let ordered = match (pair[0].hop_number(), pair[1].hop_number()) {
            (Some(a), Some(b)) => a <= b,
            (Some(_), None) | (None, None) => true,
            (None, Some(_)) => false,
        };
        if !ordered {
            return Err(VerificationError::NotSorted {
                position: position + 1,
            });
        }
    }
    Ok(())
}

/// Verify that `after` holds exactly the hops of `before`, in any order
pub fn verify_permutation(
    before: &ServiceFunctionPath,
    after: &ServiceFunctionPath,
) -> VerifyResult<()> {
    for hop in before.hops.iter().chain(after.hops.iter()) {
        let expected = before.hops.iter().filter(|h| *h == hop).count();
        let actual = after.hops.iter().filter(|h| *h == hop).count();
        if expected != actual {
            return Err(VerificationError::NotPermutation {
                hop: hop.to_string(),
                expected,
                actual,
            });
        }
    }
    Ok(())
}
