//! Hop types for service function paths.
//!
//! A hop is one step of a path. It either visits a service function
//! (optionally pinned to a forwarder) or passes through a forwarder only.
//! On the wire the two shapes are distinguished by the presence of
//! `service-function-name`; here they are an explicit enum so the
//! service-index consumption rule can match on the variant.

use crate::{ParseError, ServiceIndex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Hop that visits a service function.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceFunctionHop {
    /// Name of the service function visited at this hop.
    pub service_function_name: String,
    /// Forwarder the service function is reached through, if pinned.
    pub forwarder_name: Option<String>,
    /// Position in the path, absent until the path is sequenced.
    pub hop_number: Option<u32>,
    /// Service index carried into this hop.
    pub service_index: Option<ServiceIndex>,
    /// Keys from the datastore this crate does not interpret.
    pub extra: Map<String, Value>,
}

/// Hop that passes through a service function forwarder only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForwarderHop {
    /// Name of the forwarder.
    pub forwarder_name: String,
    /// Position in the path, absent until the path is sequenced.
    pub hop_number: Option<u32>,
    /// Service index carried into this hop.
    pub service_index: Option<ServiceIndex>,
    /// Keys from the datastore this crate does not interpret.
    pub extra: Map<String, Value>,
}

/// A step in a service function path.
///
/// # Examples
///
/// ```
/// use sfc_types::Hop;
///
/// let hop: Hop = serde_json::from_str(
///     r#"{"hop-number": 0, "service-index": 255, "service-function-name": "firewall-1"}"#,
/// ).unwrap();
/// assert!(hop.is_service_function());
/// assert_eq!(hop.hop_number(), Some(0));
///
/// let hop: Hop = serde_json::from_str(r#"{"service-function-forwarder": "sff-1"}"#).unwrap();
/// assert!(!hop.is_service_function());
/// assert_eq!(hop.service_index(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HopRecord", into = "HopRecord")]
pub enum Hop {
    /// Visits a service function; consumes one service index.
    ServiceFunction(ServiceFunctionHop),
    /// Passes through a forwarder; inherits the current service index.
    Forwarder(ForwarderHop),
}

impl Hop {
    /// Creates an unsequenced hop visiting the named service function.
    pub fn service_function(name: impl Into<String>) -> Self {
        Hop::ServiceFunction(ServiceFunctionHop {
            service_function_name: name.into(),
            ..Default::default()
        })
    }

    /// Creates an unsequenced hop through the named forwarder.
    pub fn forwarder(name: impl Into<String>) -> Self {
        Hop::Forwarder(ForwarderHop {
            forwarder_name: name.into(),
            ..Default::default()
        })
    }

    /// Pins a service function hop to a forwarder.
    ///
    /// A forwarder hop already names its forwarder, which is replaced.
    pub fn via(mut self, forwarder: impl Into<String>) -> Self {
        match &mut self {
            Hop::ServiceFunction(sf) => sf.forwarder_name = Some(forwarder.into()),
            Hop::Forwarder(fwd) => fwd.forwarder_name = forwarder.into(),
        }
        self
    }

    /// Sets both derived fields at once.
    pub fn at(mut self, hop_number: u32, service_index: ServiceIndex) -> Self {
        self.set_hop_number(hop_number);
        self.set_service_index(service_index);
        self
    }

    /// Returns true for hops that visit a service function.
    pub fn is_service_function(&self) -> bool {
        matches!(self, Hop::ServiceFunction(_))
    }

    /// Name of the service function, or of the forwarder for forwarder hops.
    pub fn name(&self) -> &str {
        match self {
            Hop::ServiceFunction(sf) => &sf.service_function_name,
            Hop::Forwarder(fwd) => &fwd.forwarder_name,
        }
    }

    /// Forwarder this hop goes through, if known.
    pub fn forwarder_name(&self) -> Option<&str> {
        match self {
            Hop::ServiceFunction(sf) => sf.forwarder_name.as_deref(),
            Hop::Forwarder(fwd) => Some(&fwd.forwarder_name),
        }
    }

    /// Position of the hop in its path, once sequenced.
    pub fn hop_number(&self) -> Option<u32> {
        match self {
            Hop::ServiceFunction(sf) => sf.hop_number,
            Hop::Forwarder(fwd) => fwd.hop_number,
        }
    }

    /// Service index carried into the hop, once sequenced.
    pub fn service_index(&self) -> Option<ServiceIndex> {
        match self {
            Hop::ServiceFunction(sf) => sf.service_index,
            Hop::Forwarder(fwd) => fwd.service_index,
        }
    }

    /// Sets the hop number.
    pub fn set_hop_number(&mut self, hop_number: u32) {
        match self {
            Hop::ServiceFunction(sf) => sf.hop_number = Some(hop_number),
            Hop::Forwarder(fwd) => fwd.hop_number = Some(hop_number),
        }
    }

    /// Sets the service index.
    pub fn set_service_index(&mut self, service_index: ServiceIndex) {
        match self {
            Hop::ServiceFunction(sf) => sf.service_index = Some(service_index),
            Hop::Forwarder(fwd) => fwd.service_index = Some(service_index),
        }
    }
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_service_function() { "sf" } else { "sff" };
        write!(f, "{}:{}", kind, self.name())?;
        match (self.hop_number(), self.service_index()) {
            (Some(n), Some(si)) => write!(f, "({},{})", n, si),
            (Some(n), None) => write!(f, "({},-)", n),
            (None, Some(si)) => write!(f, "(-,{})", si),
            (None, None) => Ok(()),
        }
    }
}

/// Flat datastore shape of a hop.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct HopRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hop_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_index: Option<ServiceIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_function_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_function_forwarder: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<HopRecord> for Hop {
    type Error = ParseError;

    fn try_from(record: HopRecord) -> Result<Self, Self::Error> {
        match (record.service_function_name, record.service_function_forwarder) {
            (Some(name), forwarder) => Ok(Hop::ServiceFunction(ServiceFunctionHop {
                service_function_name: name,
                forwarder_name: forwarder,
                hop_number: record.hop_number,
                service_index: record.service_index,
                extra: record.extra,
            })),
            (None, Some(forwarder)) => Ok(Hop::Forwarder(ForwarderHop {
                forwarder_name: forwarder,
                hop_number: record.hop_number,
                service_index: record.service_index,
                extra: record.extra,
            })),
            (None, None) => Err(ParseError::InvalidHop(
                "hop names neither a service function nor a forwarder".to_string(),
            )),
        }
    }
}

impl From<Hop> for HopRecord {
    fn from(hop: Hop) -> Self {
        match hop {
            Hop::ServiceFunction(sf) => HopRecord {
                hop_number: sf.hop_number,
                service_index: sf.service_index,
                service_function_name: Some(sf.service_function_name),
                service_function_forwarder: sf.forwarder_name,
                extra: sf.extra,
            },
            Hop::Forwarder(fwd) => HopRecord {
                hop_number: fwd.hop_number,
                service_index: fwd.service_index,
                service_function_name: None,
                service_function_forwarder: Some(fwd.forwarder_name),
                extra: fwd.extra,
            },
        }
    }
}
