use uri_shapes::{BaseUrl, ServersideAbsoluteUrl, UriReference};

fn resolve(base: &ServersideAbsoluteUrl, reference: &str) -> String {
    base.resolve(&UriReference::parse(reference).unwrap())
        .to_string()
}

#[test]
fn rfc_normal_examples() {
    // Section 5.4.1 of RFC 3986.
    let base = ServersideAbsoluteUrl::parse("http://a/b/c/d;p?q").unwrap();
    let cases = [
        ("g:h", "g:h"),
        ("g", "http://a/b/c/g"),
        ("./g", "http://a/b/c/g"),
        ("g/", "http://a/b/c/g/"),
        ("/g", "http://a/g"),
        ("?y", "http://a/b/c/d;p?y"),
        ("g?y", "http://a/b/c/g?y"),
        ("#s", "http://a/b/c/d;p?q#s"),
        ("g#s", "http://a/b/c/g#s"),
        ("g?y#s", "http://a/b/c/g?y#s"),
        (";x", "http://a/b/c/;x"),
        ("g;x", "http://a/b/c/g;x"),
        ("g;x?y#s", "http://a/b/c/g;x?y#s"),
        ("", "http://a/b/c/d;p?q"),
        (".", "http://a/b/c/"),
        ("./", "http://a/b/c/"),
        ("..", "http://a/b/"),
        ("../", "http://a/b/"),
        ("../g", "http://a/b/g"),
        ("../..", "http://a/"),
        ("../../", "http://a/"),
        ("../../g", "http://a/g"),
    ];
    for (reference, expected) in cases {
        assert_eq!(resolve(&base, reference), expected, "case {reference:?}");
    }
}

#[test]
fn rfc_abnormal_examples() {
    // Section 5.4.2 of RFC 3986, with the strict-parser behavior.
    let base = ServersideAbsoluteUrl::parse("http://a/b/c/d;p?q").unwrap();
    let cases = [
        ("../../../g", "http://a/g"),
        ("../../../../g", "http://a/g"),
        ("/./g", "http://a/g"),
        ("/../g", "http://a/g"),
        ("g.", "http://a/b/c/g."),
        (".g", "http://a/b/c/.g"),
        ("g..", "http://a/b/c/g.."),
        ("..g", "http://a/b/c/..g"),
        ("./../g", "http://a/b/g"),
        ("./g/.", "http://a/b/c/g/"),
        ("g/./h", "http://a/b/c/g/h"),
        ("g/../h", "http://a/b/c/h"),
        ("g;x=1/./y", "http://a/b/c/g;x=1/y"),
        ("g;x=1/../y", "http://a/b/c/y"),
        // The query and fragment of the reference survive untouched.
        ("g?y/./x", "http://a/b/c/g?y/./x"),
        ("g?y/../x", "http://a/b/c/g?y/../x"),
        ("g#s/./x", "http://a/b/c/g#s/./x"),
        ("g#s/../x", "http://a/b/c/g#s/../x"),
        // A strict parser honors the scheme even when it matches the base.
        ("http:g", "http:g"),
    ];
    for (reference, expected) in cases {
        assert_eq!(resolve(&base, reference), expected, "case {reference:?}");
    }
}

#[test]
fn empty_paths_fill_with_a_slash() {
    let base = ServersideAbsoluteUrl::parse("http://example.com").unwrap();
    let cases = [
        ("?query", "http://example.com/?query"),
        ("//other.example", "http://other.example/"),
        ("", "http://example.com/"),
        ("#f", "http://example.com/#f"),
        ("x", "http://example.com/x"),
    ];
    for (reference, expected) in cases {
        assert_eq!(resolve(&base, reference), expected, "case {reference:?}");
    }
}

#[test]
fn network_path_reference_keeps_the_base_scheme() {
    let base = ServersideAbsoluteUrl::parse("https://a/b").unwrap();
    assert_eq!(resolve(&base, "//h:8080/c?q#f"), "https://h:8080/c?q#f");
}

#[test]
fn base_url_resolution_always_appends() {
    let base = BaseUrl::parse("http://example.com/api/v1/").unwrap();
    let reference = UriReference::parse("users?id=7").unwrap();
    assert_eq!(
        base.resolve(&reference).as_str(),
        "http://example.com/api/v1/users?id=7"
    );

    let reference = UriReference::parse("../v2/users").unwrap();
    assert_eq!(
        base.resolve(&reference).as_str(),
        "http://example.com/api/v2/users"
    );
}

#[test]
fn fragment_never_comes_from_the_base() {
    let base = ServersideAbsoluteUrl::parse("http://a/b?q").unwrap();
    let resolved = base.resolve(&UriReference::parse("").unwrap());
    assert_eq!(resolved.as_str(), "http://a/b?q");
    assert!(matches!(resolved, UriReference::ServersideAbsoluteUrl(_)));
}

#[test]
fn scheme_bearing_references_resolve_to_their_own_shape() {
    let base = ServersideAbsoluteUrl::parse("http://a/b/c/d;p?q").unwrap();

    let target = base.resolve(&UriReference::parse("mailto:x@y").unwrap());
    assert!(matches!(target, UriReference::OpaqueUri(_)));
    assert_eq!(target.as_str(), "mailto:x@y");
    assert_eq!(UriReference::parse(target.as_str()).unwrap(), target);

    let target = base.resolve(&UriReference::parse("g:h").unwrap());
    assert!(matches!(target, UriReference::OpaqueUri(_)));
    assert_eq!(UriReference::parse(target.as_str()).unwrap(), target);

    let target = base.resolve(&UriReference::parse("https://h/p#f").unwrap());
    assert!(matches!(target, UriReference::AbsoluteUrl(_)));
}
