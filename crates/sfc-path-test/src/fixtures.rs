//! Test fixtures for service function paths
//!
//! Provides reusable paths for sequencing and session tests

use sfc_types::{Hop, ServiceFunctionPath, ServiceIndex};

/// Service index from a literal; panics outside 1-255
pub fn si(value: u8) -> ServiceIndex {
    ServiceIndex::new(value).expect("fixture service index out of range")
}

/// Service function hop with both derived fields set
pub fn sf(name: &str, hop_number: u32, service_index: u8) -> Hop {
    Hop::service_function(name).at(hop_number, si(service_index))
}

/// Forwarder hop with both derived fields set
pub fn fwd(name: &str, hop_number: u32, service_index: u8) -> Hop {
    Hop::forwarder(name).at(hop_number, si(service_index))
}

/// Builds a path from a starting index and hops in list order
pub fn path_with(name: &str, starting_index: i64, hops: Vec<Hop>) -> ServiceFunctionPath {
    let mut path = ServiceFunctionPath::new(name).with_starting_index(starting_index);
    path.hops = hops;
    path
}

/// Paths exercising hop ordering and index assignment
pub mod scenarios {
    use super::*;

    /// Three numbered service function hops stored out of list order:
    /// `[sf1(0,3), sf3(2,1), sf2(1,2)]`, starting index 3
    pub fn unordered() -> ServiceFunctionPath {
        path_with(
            "sfp-unordered",
            3,
            vec![sf("sf1", 0, 3), sf("sf3", 2, 1), sf("sf2", 1, 2)],
        )
    }

    /// Three service function hops in order, with a starting index of 1
    /// that is too small for them
    pub fn bad_starting_index() -> ServiceFunctionPath {
        path_with(
            "sfp-bad-start",
            1,
            vec![sf("sf1", 0, 1), sf("sf2", 1, 1), sf("sf3", 2, 1)],
        )
    }

    /// Numbered path of three hops with two unnumbered hops inserted
    /// between them, starting index 3
    pub fn augmented() -> ServiceFunctionPath {
        path_with(
            "sfp-augmented",
            3,
            vec![
                sf("sf1", 0, 3),
                Hop::service_function("sf4"),
                sf("sf2", 1, 2),
                Hop::service_function("sf5"),
                sf("sf3", 2, 1),
            ],
        )
    }

    /// Service functions reached through forwarder hops, unsequenced
    pub fn with_forwarders(starting_index: i64) -> ServiceFunctionPath {
        path_with(
            "sfp-forwarders",
            starting_index,
            vec![
                Hop::service_function("firewall-1").via("sff-1"),
                Hop::forwarder("sff-2"),
                Hop::service_function("dpi-1").via("sff-2"),
                Hop::forwarder("sff-3"),
                Hop::service_function("nat-1").via("sff-3"),
            ],
        )
        .with_chain("chain-forwarders")
    }

    /// `count` unsequenced service function hops
    pub fn long(starting_index: i64, count: usize) -> ServiceFunctionPath {
        path_with(
            "sfp-long",
            starting_index,
            (0..count)
                .map(|i| Hop::service_function(format!("sf{}", i)))
                .collect(),
        )
    }
}

/// Path collection documents as read from the datastore
pub mod documents {
    /// Two paths; the first has hops stored out of order and an extra key
    pub const STORED: &str = r#"{
  "service-function-paths": {
    "service-function-path": [
      {
        "name": "sfp-web",
        "service-chain-name": "chain-web",
        "starting-index": 255,
        "symmetric": false,
        "transport-type": "service-locator:vxlan-gpe",
        "service-path-hop": [
          { "hop-number": 2, "service-index": 253, "service-function-name": "nat-1",
            "service-function-forwarder": "sff-2" },
          { "hop-number": 0, "service-index": 255, "service-function-name": "firewall-1",
            "service-function-forwarder": "sff-1" },
          { "hop-number": 1, "service-index": 254, "service-function-name": "dpi-1",
            "service-function-forwarder": "sff-1" }
        ]
      },
      {
        "name": "sfp-transit",
        "starting-index": 10,
        "service-path-hop": [
          { "hop-number": 0, "service-index": 10, "service-function-forwarder": "sff-1" }
        ]
      }
    ]
  }
}"#;

    /// A path with a hop naming neither a service function nor a forwarder
    pub const INVALID_HOP: &str = r#"[
  { "name": "sfp-bad", "starting-index": 3,
    "service-path-hop": [ { "hop-number": 0, "service-index": 3 } ] }
]"#;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios_shape() {
        assert_eq!(scenarios::unordered().hops.len(), 3);
        assert_eq!(scenarios::augmented().hops.len(), 5);
        assert!(!scenarios::augmented().is_sequenced());
        assert_eq!(scenarios::long(2, 7).hops.len(), 7);
        let path = scenarios::with_forwarders(9);
        assert_eq!(path.service_function_hops().count(), 3);
        assert_eq!(path.service_chain_name.as_deref(), Some("chain-forwarders"));
    }

    #[test]
    fn test_hop_helpers() {
        let hop = fwd("sff-1", 4, 9);
        assert!(!hop.is_service_function());
        assert_eq!(hop.hop_number(), Some(4));
        assert_eq!(hop.service_index(), Some(si(9)));
    }

    #[test]
    fn test_documents_parse() {
        let value: serde_json::Value = serde_json::from_str(documents::STORED).unwrap();
        assert!(value["service-function-paths"]["service-function-path"].is_array());
        assert!(serde_json::from_str::<serde_json::Value>(documents::INVALID_HOP).is_ok());
    }
}
