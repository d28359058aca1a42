//! Splitting a URI reference into its five components.
//!
//! The splitter works on delimiter positions only; each component is then
//! validated by its own parser so that a failure names the component that
//! actually broke.

use crate::component::{Authority, Fragment, Path, Query, Scheme};
use crate::encoding::table;
use crate::error::{ComponentError, IllegalPath};
use crate::reference::Parts;

struct RawParts<'a> {
    scheme: Option<&'a str>,
    authority: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

/// Returns whether `s` can be a scheme, deciding how a leading `name:` is
/// read. A prefix that cannot be a scheme leaves the colon in the path.
fn is_scheme_like(s: &str) -> bool {
    let bytes = s.as_bytes();
    matches!(bytes.first(), Some(x) if x.is_ascii_alphabetic())
        && bytes.iter().all(|&x| table::SCHEME.allows(x))
}

fn split(s: &str) -> RawParts<'_> {
    let (rest, fragment) = match s.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (s, None),
    };
    let (rest, query) = match rest.split_once('?') {
        Some((rest, query)) => (rest, Some(query)),
        None => (rest, None),
    };

    let (scheme, rest) = match (rest.find(':'), rest.find('/')) {
        (Some(colon), slash)
            if slash.map_or(true, |slash| colon < slash) && is_scheme_like(&rest[..colon]) =>
        {
            (Some(&rest[..colon]), &rest[colon + 1..])
        }
        _ => (None, rest),
    };

    let (authority, path) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find('/').unwrap_or(after.len());
            (Some(&after[..end]), &after[end..])
        }
        None => (None, rest),
    };

    RawParts {
        scheme,
        authority,
        path,
        query,
        fragment,
    }
}

/// Parses a full `URI-reference` into validated parts.
pub(crate) fn parse_uri_reference(s: &str) -> Result<Parts, ComponentError> {
    let raw = split(s);
    let scheme = raw.scheme.map(Scheme::parse).transpose()?;
    let authority = raw.authority.map(Authority::parse).transpose()?;
    if scheme.is_none() && authority.is_none() {
        let first_segment = raw.path.split('/').next().unwrap_or("");
        if first_segment.contains(':') {
            return Err(IllegalPath::with_detail(
                raw.path,
                "colon in first segment of a relative reference",
            )
            .into());
        }
    }
    let path = Path::parse(raw.path)?;
    let query = raw.query.map(Query::parse).transpose()?;
    let fragment = raw.fragment.map(Fragment::parse).transpose()?;
    Ok(Parts {
        scheme,
        authority,
        path,
        query,
        fragment,
    })
}
