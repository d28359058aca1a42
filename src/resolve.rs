//! Reference resolution per [RFC 3986 §5.3].
//!
//! [RFC 3986 §5.3]: https://datatracker.ietf.org/doc/html/rfc3986#section-5.3

use crate::component::Path;
use crate::reference::Parts;

/// Merges a reference's relative path with the base path (§5.2.3).
fn merge(base: &Parts, path: &Path) -> Path {
    if base.authority.is_some() && base.path.is_empty() {
        return Path::new_unchecked(format!("/{path}"));
    }
    match base.path.as_str().rfind('/') {
        Some(i) => Path::new_unchecked(format!("{}{}", &base.path.as_str()[..=i], path)),
        None => path.clone(),
    }
}

/// Resolves `reference` against `base`. The base must carry a scheme;
/// every caller guarantees it by type.
///
/// The target's fragment always comes from the reference, and an empty
/// target path becomes `/` when an authority is present, so resolving
/// `?query` against `http://example.com` yields
/// `http://example.com/?query`.
pub(crate) fn resolve(base: &Parts, reference: &Parts) -> Parts {
    let mut target = if reference.scheme.is_some() {
        Parts {
            scheme: reference.scheme.clone(),
            authority: reference.authority.clone(),
            path: reference.path.remove_dot_segments(),
            query: reference.query.clone(),
            fragment: reference.fragment.clone(),
        }
    } else if reference.authority.is_some() {
        Parts {
            scheme: base.scheme.clone(),
            authority: reference.authority.clone(),
            path: reference.path.remove_dot_segments(),
            query: reference.query.clone(),
            fragment: reference.fragment.clone(),
        }
    } else {
        let (path, query) = if reference.path.is_empty() {
            let query = reference.query.clone().or_else(|| base.query.clone());
            (base.path.clone(), query)
        } else if reference.path.is_absolute() {
            (reference.path.remove_dot_segments(), reference.query.clone())
        } else {
            (
                merge(base, &reference.path).remove_dot_segments(),
                reference.query.clone(),
            )
        };
        Parts {
            scheme: base.scheme.clone(),
            authority: base.authority.clone(),
            path,
            query,
            fragment: reference.fragment.clone(),
        }
    };
    if target.authority.is_some() && target.path.is_empty() {
        target.path = Path::new_unchecked("/");
    }
    target
}
