//! NSH service index type with validation.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// NSH service index (1-255).
///
/// Index 0 means the packet is dropped, so it is never assigned to a hop.
/// The first hop of a path carries the path's starting index and every
/// service function consumes one index on the way down.
///
/// # Examples
///
/// ```
/// use sfc_types::ServiceIndex;
///
/// let si = ServiceIndex::new(255).unwrap();
/// assert_eq!(si.as_u8(), 255);
///
/// assert!(ServiceIndex::new(0).is_err());
/// assert_eq!(ServiceIndex::FLOOR.decrement(), ServiceIndex::FLOOR);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ServiceIndex(u8);

impl ServiceIndex {
    /// Minimum valid service index.
    pub const MIN: u8 = 1;

    /// Maximum valid service index.
    pub const MAX: u8 = 255;

    /// Lowest index a hop can hold. Decrementing stops here.
    pub const FLOOR: ServiceIndex = ServiceIndex(1);

    /// Creates a new service index.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the valid range (1-255).
    pub const fn new(value: u8) -> Result<Self, ParseError> {
        if value >= Self::MIN {
            Ok(ServiceIndex(value))
        } else {
            Err(ParseError::InvalidServiceIndex(value as i64))
        }
    }

    /// Returns the service index as a u8.
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Returns true if the index is at the floor value of 1.
    pub const fn is_floor(&self) -> bool {
        self.0 == Self::MIN
    }

    /// Returns the next lower index, saturating at [`ServiceIndex::FLOOR`].
    pub const fn decrement(self) -> Self {
        if self.0 > Self::MIN {
            ServiceIndex(self.0 - 1)
        } else {
            self
        }
    }
}

impl fmt::Display for ServiceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServiceIndex {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidServiceIndexFormat(s.to_string()))?;

        ServiceIndex::try_from(value)
    }
}

impl TryFrom<i64> for ServiceIndex {
    type Error = ParseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) => ServiceIndex::new(v),
            Err(_) => Err(ParseError::InvalidServiceIndex(value)),
        }
    }
}

impl TryFrom<usize> for ServiceIndex {
    type Error = ParseError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        let value = i64::try_from(value).unwrap_or(i64::MAX);
        ServiceIndex::try_from(value)
    }
}

impl From<ServiceIndex> for u8 {
    fn from(si: ServiceIndex) -> u8 {
        si.0
    }
}
