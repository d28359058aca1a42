use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use crate::encoding::{self, table};
use crate::error::IllegalPath;
use crate::norm::NormalCell;

/// The [path] component of a URI reference.
///
/// A path is a possibly empty sequence of segments. The empty path has no
/// segments; `"/"` has a single empty segment. Paths compare by exact
/// string form, so `"/a"` and `"/%61"` are unequal until normalized.
///
/// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
#[derive(Clone, Debug)]
pub struct Path {
    raw: Box<str>,
    norm: NormalCell<Path>,
}

enum Segment<'a> {
    /// `.` in any percent-encoded spelling.
    Dot,
    /// `..` in any percent-encoded spelling.
    DoubleDot,
    Normal(&'a str),
}

/// Classifies a segment, treating `%2E` as a dot.
fn classify(seg: &str) -> Segment<'_> {
    let mut rest = seg.as_bytes();
    let mut dots = 0usize;
    loop {
        if let Some(tail) = rest.strip_prefix(b".") {
            rest = tail;
        } else if rest.len() >= 3 && rest[0] == b'%' && rest[1] == b'2' && (rest[2] | 0x20) == b'e'
        {
            rest = &rest[3..];
        } else {
            break;
        }
        dots += 1;
    }
    match (dots, rest.is_empty()) {
        (1, true) => Segment::Dot,
        (2, true) => Segment::DoubleDot,
        _ => Segment::Normal(seg),
    }
}

impl Path {
    /// Parses a path from a string. The empty string is allowed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string contains a character outside
    /// `*( pchar / "/" )`.
    pub fn parse(s: &str) -> Result<Self, IllegalPath> {
        if !table::PATH.validate(s.as_bytes()) {
            return Err(IllegalPath::new(s));
        }
        Ok(Path::new_unchecked(s))
    }

    pub(crate) fn new_unchecked(raw: impl Into<Box<str>>) -> Path {
        Path {
            raw: raw.into(),
            norm: NormalCell::new(),
        }
    }

    /// The empty path.
    #[must_use]
    pub fn empty() -> Path {
        Path::new_unchecked("")
    }

    /// Builds a path from un-encoded text, percent-encoding as needed.
    ///
    /// Slashes in `raw` are kept as segment separators.
    #[must_use]
    pub fn encode(raw: &str) -> Path {
        let mut path = Path::new_unchecked(encoding::encode(raw, table::PATH));
        path.norm = NormalCell::normal();
        path
    }

    /// Returns the path as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns whether the path is empty, i.e. has no segments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns whether the path starts with a slash.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.raw.starts_with('/')
    }

    /// Iterates over the raw, still percent-encoded segments.
    ///
    /// The empty path yields nothing; `"/"` yields one empty segment.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        let trimmed = self.raw.strip_prefix('/').unwrap_or(&self.raw);
        let mut split = (!self.raw.is_empty()).then(|| trimmed.split('/'));
        core::iter::from_fn(move || split.as_mut()?.next())
    }

    /// Iterates over the segments with their percent-encoding decoded.
    pub fn decoded_segments(&self) -> impl Iterator<Item = String> + '_ {
        self.segments().map(encoding::decode)
    }

    /// Applies the `remove_dot_segments` algorithm of [RFC 3986 §5.2.4],
    /// recognizing `%2E` as a dot.
    ///
    /// On a rootless path, a `..` that consumes the leading segment
    /// exposes that segment's trailing slash, so the result comes back
    /// absolute, exactly as the RFC's buffer algorithm leaves it
    /// (`a/../b` becomes `/b`).
    ///
    /// [RFC 3986 §5.2.4]: https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.4
    #[must_use]
    pub fn remove_dot_segments(&self) -> Path {
        let segments: Vec<&str> = self.segments().collect();
        let mut out: Vec<&str> = Vec::with_capacity(segments.len());
        let mut absolute = self.is_absolute();
        for (i, &seg) in segments.iter().enumerate() {
            let last = i + 1 == segments.len();
            match classify(seg) {
                Segment::Dot => {
                    if last {
                        out.push("");
                    }
                }
                Segment::DoubleDot => {
                    if out.pop().is_some() && out.is_empty() {
                        absolute = true;
                    }
                    if last {
                        out.push("");
                    }
                }
                Segment::Normal(seg) => out.push(seg),
            }
        }
        let mut raw = String::with_capacity(self.raw.len());
        if absolute {
            raw.push('/');
        }
        raw.push_str(&out.join("/"));
        if raw == *self.raw {
            self.clone()
        } else {
            Path::new_unchecked(raw)
        }
    }

    /// Resolves `other` against this path with the merge rules of
    /// [RFC 3986 §5.2.3].
    ///
    /// An empty `other` keeps this path, an absolute `other` replaces it,
    /// and a rootless `other` replaces everything after the last `/`.
    /// The result always has its dot segments removed.
    ///
    /// [RFC 3986 §5.2.3]: https://datatracker.ietf.org/doc/html/rfc3986#section-5.2.3
    #[must_use]
    pub fn resolve(&self, other: &Path) -> Path {
        let merged = if other.is_empty() {
            self.clone()
        } else if other.is_absolute() {
            other.clone()
        } else {
            match self.raw.rfind('/') {
                Some(i) => Path::new_unchecked(format!("{}{}", &self.raw[..=i], other)),
                None => other.clone(),
            }
        };
        merged.remove_dot_segments()
    }

    /// Returns whether the path contains no dot segments.
    #[must_use]
    pub fn has_dot_segments(&self) -> bool {
        self.segments()
            .any(|seg| !matches!(classify(seg), Segment::Normal(_)))
    }

    /// Returns whether the percent-encoding of the path is normal.
    ///
    /// An encoded slash (`%2F`) is never decoded, so it does not make a
    /// path abnormal.
    #[must_use]
    pub fn is_normal_form(&self) -> bool {
        self.norm
            .is_normal_form(|| encoding::is_normal_form(&self.raw, table::PATH, table::PATH_DELIMS))
    }

    /// Returns the path with its percent-encoding normalized.
    ///
    /// Dot segments are kept; they are only removed when normalizing a
    /// full reference whose path is resolvable.
    #[must_use]
    pub fn normalize(&self) -> Path {
        self.norm.normalize(self, || {
            let normalized = encoding::normalize(&self.raw, table::PATH, table::PATH_DELIMS);
            if *normalized == *self.raw {
                None
            } else {
                Some(Path {
                    raw: normalized.into(),
                    norm: NormalCell::normal(),
                })
            }
        })
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Path {
    type Err = IllegalPath;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(s: &str) -> Vec<String> {
        Path::parse(s)
            .unwrap()
            .segments()
            .map(str::to_owned)
            .collect::<Vec<_>>()
    }

    #[test]
    fn segments_distinguish_empty_from_root() {
        assert!(segs("").is_empty());
        assert_eq!(segs("/"), [""]);
        assert_eq!(segs("/a/b"), ["a", "b"]);
        assert_eq!(segs("a//b"), ["a", "", "b"]);
        assert_eq!(segs("/a/"), ["a", ""]);
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(Path::parse("/a b").is_err());
        assert!(Path::parse("/a?b").is_err());
        assert!(Path::parse("/%zz").is_err());
    }

    fn dedot(s: &str) -> String {
        Path::parse(s).unwrap().remove_dot_segments().to_string()
    }

    #[test]
    fn dot_segment_removal() {
        assert_eq!(dedot("/a/b/c/./../../g"), "/a/g");
        assert_eq!(dedot("/a/b/.."), "/a/");
        assert_eq!(dedot("/a/b/."), "/a/b/");
        assert_eq!(dedot("/.."), "/");
        assert_eq!(dedot("/./"), "/");
        assert_eq!(dedot("mid/content=5/../6"), "mid/6");
        assert_eq!(dedot("../g"), "g");
    }

    #[test]
    fn rootless_paths_turn_absolute_when_the_head_cancels() {
        // Section 5.2.4's buffer keeps the slash that followed the
        // consumed segment.
        assert_eq!(dedot("a/.."), "/");
        assert_eq!(dedot("a/../"), "/");
        assert_eq!(dedot("a/../b"), "/b");
        assert_eq!(dedot("a/b/../.."), "/");
        // With no segment to cancel, nothing absolutizes.
        assert_eq!(dedot(".."), "");
        assert_eq!(dedot("a/b/.."), "a/");
    }

    #[test]
    fn encoded_dots_count_as_dots() {
        assert_eq!(dedot("/a/%2E%2E/b"), "/b");
        assert_eq!(dedot("/a/%2e/b"), "/a/b");
        assert_eq!(dedot("/a/.%2E"), "/");
        assert_eq!(dedot("/a/%2Ex"), "/a/%2Ex");
        assert!(Path::parse("/a/./b").unwrap().has_dot_segments());
        assert!(!Path::parse("/a/b").unwrap().has_dot_segments());
    }

    #[test]
    fn resolve_merges_and_removes_dots() {
        let base = Path::parse("/b/c/d").unwrap();
        assert_eq!(base.resolve(&Path::parse("g").unwrap()).as_str(), "/b/c/g");
        assert_eq!(base.resolve(&Path::parse("../g").unwrap()).as_str(), "/b/g");
        assert_eq!(base.resolve(&Path::parse("/g").unwrap()).as_str(), "/g");
        assert_eq!(base.resolve(&Path::empty()).as_str(), "/b/c/d");

        let rootless = Path::parse("x").unwrap();
        assert_eq!(rootless.resolve(&Path::parse("y").unwrap()).as_str(), "y");
    }

    #[test]
    fn normalize_keeps_encoded_slash() {
        let path = Path::parse("/%61%2Fb").unwrap();
        assert!(!path.is_normal_form());
        assert_eq!(path.normalize().as_str(), "/a%2Fb");
        assert!(Path::parse("/a%2Fb").unwrap().is_normal_form());
    }

    #[test]
    fn decoded_segments() {
        let path = Path::parse("/caf%C3%A9/b").unwrap();
        let decoded: Vec<String> = path.decoded_segments().collect();
        assert_eq!(decoded, ["café", "b"]);
    }
}
