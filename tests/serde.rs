#![cfg(feature = "serde")]

use serde::{Deserialize, Serialize};
use uri_shapes::{AbsoluteUrl, Origin, PathAndQuery, UriReference};

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Endpoint {
    origin: Origin,
    health: PathAndQuery,
}

#[test]
fn as_plain_strings() {
    let url = AbsoluteUrl::parse("http://example.com/a?x=1#f").unwrap();
    let json = serde_json::to_string(&url).unwrap();
    assert_eq!(json, "\"http://example.com/a?x=1#f\"");
    assert_eq!(serde_json::from_str::<AbsoluteUrl>(&json).unwrap(), url);
}

#[test]
fn inside_a_struct() {
    let endpoint = Endpoint {
        origin: Origin::parse("https://api.example.com:8443").unwrap(),
        health: PathAndQuery::parse("/health?deep=1").unwrap(),
    };
    let json = serde_json::to_string(&endpoint).unwrap();
    assert_eq!(
        json,
        r#"{"origin":"https://api.example.com:8443","health":"/health?deep=1"}"#
    );
    assert_eq!(serde_json::from_str::<Endpoint>(&json).unwrap(), endpoint);
}

#[test]
fn deserialize_rejects_mismatched_shapes() {
    let err = serde_json::from_str::<Origin>("\"https://example.com/path\"").unwrap_err();
    assert!(err.to_string().contains("Illegal URL"));

    let err = serde_json::from_str::<AbsoluteUrl>("\"not a url\"").unwrap_err();
    assert!(err.to_string().contains("Illegal absolute URL"));
}

#[test]
fn tagged_enum_round_trips() {
    let reference = UriReference::parse("//example.com/x").unwrap();
    let json = serde_json::to_string(&reference).unwrap();
    assert_eq!(json, "\"//example.com/x\"");
    assert_eq!(
        serde_json::from_str::<UriReference>(&json).unwrap(),
        reference
    );
}
