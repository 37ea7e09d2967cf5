//! Service function path type.

use crate::{Hop, ParseError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An ordered list of hops traffic is steered through.
///
/// `starting_index` is kept exactly as stored. It may be missing or out of
/// range on a freshly loaded path; sequencing validates it before use.
///
/// # Examples
///
/// ```
/// use sfc_types::{Hop, ServiceFunctionPath};
///
/// let path = ServiceFunctionPath::new("sfp-web")
///     .with_starting_index(255)
///     .with_hop(Hop::service_function("firewall-1"))
///     .with_hop(Hop::forwarder("sff-1"));
///
/// assert_eq!(path.hops.len(), 2);
/// assert_eq!(path.service_function_hops().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServiceFunctionPath {
    /// Unique path name; rejected on decode when blank.
    #[serde(deserialize_with = "non_blank_name")]
    pub name: String,

    /// Service index given to the first hop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_index: Option<i64>,

    /// Chain this path renders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_chain_name: Option<String>,

    /// Whether a reverse path is generated for return traffic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symmetric: Option<bool>,

    /// Hops in traversal order once sequenced.
    #[serde(rename = "service-path-hop", default)]
    pub hops: Vec<Hop>,

    /// Keys from the datastore this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServiceFunctionPath {
    /// Creates an empty path with no starting index.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the raw starting index.
    pub fn with_starting_index(mut self, starting_index: i64) -> Self {
        self.starting_index = Some(starting_index);
        self
    }

    /// Sets the chain name.
    pub fn with_chain(mut self, chain: impl Into<String>) -> Self {
        self.service_chain_name = Some(chain.into());
        self
    }

    /// Appends a hop.
    pub fn with_hop(mut self, hop: Hop) -> Self {
        self.hops.push(hop);
        self
    }

    /// Iterates over hops that visit a service function.
    pub fn service_function_hops(&self) -> impl Iterator<Item = &Hop> {
        self.hops.iter().filter(|hop| hop.is_service_function())
    }

    /// Returns true if every hop carries both a hop number and a service index.
    pub fn is_sequenced(&self) -> bool {
        self.hops
            .iter()
            .all(|hop| hop.hop_number().is_some() && hop.service_index().is_some())
    }
}

fn non_blank_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    if name.trim().is_empty() {
        return Err(serde::de::Error::custom(ParseError::EmptyName));
    }
    Ok(name)
}
