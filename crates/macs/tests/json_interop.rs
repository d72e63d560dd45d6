//! Serde embedding of addresses and address sets inside larger documents.

use macs::{MacAddress, MacSet, ParseError};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Interface {
    name: String,
    mac: MacAddress,
    #[serde(default)]
    peers: MacSet,
}

#[test]
fn interface_round_trip() {
    let mut peers = MacSet::new();
    peers.add(MacAddress::must_parse("DE:AD:BE:EF:AA:BB"));
    peers.add(MacAddress::must_parse("00:11:22:33:22:11"));

    let intf = Interface {
        name: "Ethernet0".to_string(),
        mac: MacAddress::must_parse("78:4F:43:87:9E:F4"),
        peers,
    };

    let json = serde_json::to_string(&intf).unwrap();
    assert_eq!(
        json,
        r#"{"name":"Ethernet0","mac":"78:4f:43:87:9e:f4","peers":["00:11:22:33:22:11","de:ad:be:ef:aa:bb"]}"#
    );

    let decoded: Interface = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, intf);
}

#[test]
fn missing_peers_default_to_empty_set() {
    let decoded: Interface =
        serde_json::from_str(r#"{"name":"Ethernet4","mac":"0011.2233.4455"}"#).unwrap();
    assert_eq!(decoded.mac.to_string(), "00:11:22:33:44:55");
    assert!(decoded.peers.is_empty());
}

#[test]
fn bad_member_fails_whole_document() {
    let err = serde_json::from_str::<Interface>(
        r#"{"name":"Ethernet8","mac":"78:4f:43:87:9e:f4","peers":["foo:bar"]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("invalid MAC address format: foo:bar"));
}

#[test]
fn non_string_mac_is_rejected() {
    assert!(serde_json::from_str::<Interface>(r#"{"name":"Ethernet12","mac":42}"#).is_err());
}

#[test]
fn end_to_end_set_algebra() {
    let a = MacSet::from_json(r#"["78:4f:43:87:9e:f4","de:ad:be:ef:aa:bb"]"#).unwrap();
    let b = MacSet::from_json(r#"["de:ad:be:ef:aa:bb","00:11:22:33:22:11"]"#).unwrap();

    let both = MacSet::intersection(&a, &b);
    assert_eq!(both.to_json(), r#"["de:ad:be:ef:aa:bb"]"#);

    let either = MacSet::union(&a, &b);
    assert_eq!(either.len(), 3);
    assert_eq!(
        either.to_json(),
        r#"["00:11:22:33:22:11","78:4f:43:87:9e:f4","de:ad:be:ef:aa:bb"]"#
    );
}

#[test]
fn parse_error_is_reported_for_each_input_kind() {
    assert_eq!(
        "foo:bar".parse::<MacAddress>(),
        Err(ParseError::InvalidMacAddress("foo:bar".to_string()))
    );
    assert!(matches!(MacAddress::from_json("null"), Err(ParseError::Json(_))));
    assert_eq!(
        MacSet::from_json(r#"["de:ad:be:ef:aa:bb","00:11"]"#),
        Err(ParseError::InvalidMacAddress("00:11".to_string()))
    );
}
