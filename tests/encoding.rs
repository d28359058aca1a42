use uri_shapes::encoding::{self, table, Table};
use uri_shapes::{Fragment, Password, Path, Query, Username};

#[test]
fn encode_decode_round_trip() {
    let cases = [
        "plain",
        "with space",
        "café au lait",
        "日本語",
        "mixed % and # and ?",
        "a+b",
        "",
        "🦀",
    ];
    for s in cases {
        let encoded = encoding::encode(s, table::UNRESERVED);
        assert_eq!(encoding::decode(&encoded), s, "case {s:?}");
        // Encoding straight from raw text always lands in normal form.
        assert!(
            encoding::is_normal_form(&encoded, table::UNRESERVED, Table::EMPTY),
            "case {s:?}"
        );
    }
}

#[test]
fn multibyte_sequences_group_per_code_point() {
    // é is C3 A9; the pair counts as one encoded character.
    assert_eq!(encoding::encode("é", table::UNRESERVED), "%C3%A9");
    assert_eq!(encoding::decode("%C3%A9"), "é");
    // 🦀 is a four-octet sequence.
    assert_eq!(encoding::encode("🦀", table::UNRESERVED), "%F0%9F%A6%80");

    // A lead octet with too few continuations stays encoded rather than
    // decoding to garbage.
    assert_eq!(
        encoding::normalize("%C3%41", table::UNRESERVED, Table::EMPTY),
        "%C3A"
    );
}

#[test]
fn component_level_encode() {
    assert_eq!(Username::encode("a:b@c").as_str(), "a%3Ab%40c");
    assert_eq!(Password::encode("p:q r").as_str(), "p:q%20r");
    assert_eq!(Path::encode("/a b/c").as_str(), "/a%20b/c");
    assert_eq!(Fragment::encode("x y#z").as_str(), "x%20y%23z");
    assert_eq!(
        Query::from_entries([("k 1", Some("v&2"))]).as_str(),
        "k%201=v%262"
    );
}

#[test]
fn component_level_decode() {
    assert_eq!(Username::encode("a:b@c").decode(), "a:b@c");
    assert_eq!(Fragment::parse("caf%C3%A9").unwrap().decode(), "café");
    let path = Path::parse("/caf%C3%A9/x%2Fy").unwrap();
    let segments: Vec<String> = path.decoded_segments().collect();
    assert_eq!(segments, ["café", "x/y"]);
}

#[test]
fn plus_is_literal_outside_query_entries() {
    assert_eq!(encoding::decode("a+b"), "a+b");
    assert_eq!(Fragment::parse("a+b").unwrap().decode(), "a+b");
    let query = Query::parse("a+b=c").unwrap();
    assert_eq!(query.entries()[0].0, "a b");
}
