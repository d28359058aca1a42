//! The closed family of URI reference types.
//!
//! Every legal shape of a URI reference has its own type, picked by the
//! dispatch in [`UriReference::parse`] or requested directly through a
//! type's own `parse`. The two routes can disagree on purpose:
//! `PathAndQuery::parse("//relative")` reads the input as a path, while
//! the generic parse reads `//` as the start of an authority.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use crate::builder::UriBuilder;
use crate::component::{Authority, Fragment, Host, HostAndPort, Path, Port, Query, Scheme};
use crate::error::{
    ComponentError, IllegalAbsoluteUrl, IllegalBaseUrl, IllegalOpaqueUri, IllegalPathAndQuery,
    IllegalRelativeUrl, IllegalSchemeRelativeUrl, IllegalServersideAbsoluteUrl, IllegalUri,
    IllegalUrl,
};
use crate::norm::NormalCell;
use crate::parser;
use crate::resolve;

/// The validated components of a URI reference, before dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Parts {
    pub(crate) scheme: Option<Scheme>,
    pub(crate) authority: Option<Authority>,
    pub(crate) path: Path,
    pub(crate) query: Option<Query>,
    pub(crate) fragment: Option<Fragment>,
}

impl Parts {
    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        if let Some(scheme) = &self.scheme {
            out.push_str(scheme.as_str());
            out.push(':');
        }
        if let Some(authority) = &self.authority {
            out.push_str("//");
            out.push_str(&authority.to_string());
        }
        out.push_str(self.path.as_str());
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query.as_str());
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment.as_str());
        }
        out
    }

    /// Dot segments are resolvable, and therefore removable, only when
    /// the reference has a scheme; a relative path keeps its dots for a
    /// later resolve.
    fn removes_dots(&self) -> bool {
        self.scheme.is_some() && self.path.is_absolute()
    }

    pub(crate) fn is_normal_form(&self) -> bool {
        self.scheme.as_ref().map_or(true, Scheme::is_normal_form)
            && self
                .authority
                .as_ref()
                .map_or(true, |a| a.is_normal_form(self.scheme.as_ref()))
            && self.path.is_normal_form()
            && !(self.removes_dots() && self.path.has_dot_segments())
            && self.query.as_ref().map_or(true, Query::is_normal_form)
            && self.fragment.as_ref().map_or(true, Fragment::is_normal_form)
    }

    /// Returns the normalized replacement, or `None` if already normal.
    pub(crate) fn normalized(&self) -> Option<Parts> {
        if self.is_normal_form() {
            return None;
        }
        let mut path = self.path.normalize();
        if self.removes_dots() {
            path = path.remove_dot_segments();
        }
        Some(Parts {
            scheme: self.scheme.as_ref().map(Scheme::normalize),
            authority: self
                .authority
                .as_ref()
                .map(|a| a.normalize(self.scheme.as_ref())),
            path,
            query: self.query.as_ref().map(Query::normalize),
            fragment: self.fragment.as_ref().map(Fragment::normalize),
        })
    }
}

/// Checks the shape constraints the grammar cannot express, for parts
/// assembled outside the parser.
pub(crate) fn check_shape(parts: &Parts) -> Result<(), ComponentError> {
    use crate::error::IllegalPath;

    if parts.authority.is_none() && parts.path.as_str().starts_with("//") {
        return Err(IllegalPath::with_detail(
            parts.path.as_str(),
            "path cannot start with `//` without an authority",
        )
        .into());
    }
    if parts.scheme.is_none() && parts.authority.is_none() {
        let first_segment = parts.path.as_str().split('/').next().unwrap_or("");
        if first_segment.contains(':') {
            return Err(IllegalPath::with_detail(
                parts.path.as_str(),
                "colon in first segment of a relative reference",
            )
            .into());
        }
    }
    Ok(())
}

macro_rules! impl_reference_common {
    ($Ty:ident, $Err:ident, $expecting:literal) => {
        impl $Ty {
            pub(crate) fn from_parts(parts: Parts) -> Self {
                let repr = parts.render().into();
                Self {
                    parts,
                    repr,
                    norm: NormalCell::new(),
                }
            }

            fn from_normal_parts(parts: Parts) -> Self {
                let mut this = Self::from_parts(parts);
                this.norm = NormalCell::normal();
                this
            }

            pub(crate) fn parts(&self) -> &Parts {
                &self.parts
            }

            /// Returns the exact string this value renders and re-parses as.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.repr
            }

            /// Returns whether every component is in normal form.
            #[must_use]
            pub fn is_normal_form(&self) -> bool {
                self.norm.is_normal_form(|| self.parts.is_normal_form())
            }

            /// Returns the value with every component normalized.
            #[must_use]
            pub fn normalize(&self) -> Self {
                self.norm
                    .normalize(self, || self.parts.normalized().map(Self::from_normal_parts))
            }

            /// Returns a builder seeded with this value's components.
            #[must_use]
            pub fn thaw(&self) -> UriBuilder {
                UriBuilder::from_parts(self.parts.clone())
            }
        }

        impl PartialEq for $Ty {
            fn eq(&self, other: &Self) -> bool {
                self.repr == other.repr
            }
        }

        impl Eq for $Ty {}

        impl Hash for $Ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.repr.hash(state);
            }
        }

        impl fmt::Display for $Ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.repr)
            }
        }

        impl FromStr for $Ty {
            type Err = $Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $Ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $Ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&s).map_err(|e| {
                    serde::de::Error::custom(format_args!("{e}, expected {}", $expecting))
                })
            }
        }
    };
}

/// An absolute-or-empty path with an optional query, `[path] ["?" query]`.
///
/// This is the request-target shape: no scheme, no authority, no
/// fragment. Unlike the generic parse, a leading `//` here is path data.
#[derive(Clone, Debug)]
pub struct PathAndQuery {
    parts: Parts,
    repr: Box<str>,
    norm: NormalCell<PathAndQuery>,
}

impl_reference_common!(PathAndQuery, IllegalPathAndQuery, "a path and query");

impl PathAndQuery {
    /// Parses a path-and-query reference.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the path is neither empty nor absolute, or if
    /// either part violates its grammar.
    pub fn parse(s: &str) -> Result<Self, IllegalPathAndQuery> {
        let (path, query) = match s.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (s, None),
        };
        let path = Path::parse(path).map_err(|e| IllegalPathAndQuery::wrapping(s, e))?;
        if !path.is_empty() && !path.is_absolute() {
            return Err(IllegalPathAndQuery::with_detail(
                s,
                "path must be empty or absolute",
            ));
        }
        let query = query
            .map(Query::parse)
            .transpose()
            .map_err(|e| IllegalPathAndQuery::wrapping(s, e))?;
        Ok(Self::from_parts(Parts {
            scheme: None,
            authority: None,
            path,
            query,
            fragment: None,
        }))
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.parts.path
    }

    /// Returns the query, if present.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.parts.query.as_ref()
    }
}

/// A relative reference: no scheme, everything else optional.
///
/// Covers network-path references too, so `//host/p` parses here with an
/// authority. A colon in the first path segment is rejected since the
/// text would re-parse as a scheme.
#[derive(Clone, Debug)]
pub struct RelativeUrl {
    parts: Parts,
    repr: Box<str>,
    norm: NormalCell<RelativeUrl>,
}

impl_reference_common!(RelativeUrl, IllegalRelativeUrl, "a relative URL");

impl RelativeUrl {
    /// Parses a relative reference.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the input carries a scheme or any component
    /// violates its grammar.
    pub fn parse(s: &str) -> Result<Self, IllegalRelativeUrl> {
        let parts =
            parser::parse_uri_reference(s).map_err(|e| IllegalRelativeUrl::wrapping(s, e))?;
        if parts.scheme.is_some() {
            return Err(IllegalRelativeUrl::with_detail(
                s,
                "first path segment of a relative URL must not contain a colon",
            ));
        }
        Ok(Self::from_parts(parts))
    }

    /// Returns the authority, if present.
    #[must_use]
    pub fn authority(&self) -> Option<&Authority> {
        self.parts.authority.as_ref()
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.parts.path
    }

    /// Returns the query, if present.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.parts.query.as_ref()
    }

    /// Returns the fragment, if present.
    #[must_use]
    pub fn fragment(&self) -> Option<&Fragment> {
        self.parts.fragment.as_ref()
    }
}

/// A network-path reference, `"//" authority [path] [query] [fragment]`,
/// inheriting only its scheme on resolution.
#[derive(Clone, Debug)]
pub struct SchemeRelativeUrl {
    parts: Parts,
    repr: Box<str>,
    norm: NormalCell<SchemeRelativeUrl>,
}

impl_reference_common!(SchemeRelativeUrl, IllegalSchemeRelativeUrl, "a scheme-relative URL");

impl SchemeRelativeUrl {
    /// Parses a scheme-relative URL.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the input does not start with `//`, carries a
    /// scheme, or any component violates its grammar.
    pub fn parse(s: &str) -> Result<Self, IllegalSchemeRelativeUrl> {
        let parts =
            parser::parse_uri_reference(s).map_err(|e| IllegalSchemeRelativeUrl::wrapping(s, e))?;
        if parts.scheme.is_some() {
            return Err(IllegalSchemeRelativeUrl::with_detail(
                s,
                "a scheme-relative URL cannot have a scheme",
            ));
        }
        if parts.authority.is_none() {
            return Err(IllegalSchemeRelativeUrl::with_detail(
                s,
                "must start with `//` and an authority",
            ));
        }
        Ok(Self::from_parts(parts))
    }

    /// Returns the authority.
    #[must_use]
    pub fn authority(&self) -> &Authority {
        self.parts.authority.as_ref().unwrap()
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.parts.path
    }

    /// Returns the query, if present.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.parts.query.as_ref()
    }

    /// Returns the fragment, if present.
    #[must_use]
    pub fn fragment(&self) -> Option<&Fragment> {
        self.parts.fragment.as_ref()
    }
}

/// A URI with a scheme but no authority, such as `mailto:` or `urn:`
/// references.
#[derive(Clone, Debug)]
pub struct OpaqueUri {
    parts: Parts,
    repr: Box<str>,
    norm: NormalCell<OpaqueUri>,
}

impl_reference_common!(OpaqueUri, IllegalOpaqueUri, "an opaque URI");

impl OpaqueUri {
    /// Parses an opaque URI.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the input has no scheme, has an authority, or any
    /// component violates its grammar.
    pub fn parse(s: &str) -> Result<Self, IllegalOpaqueUri> {
        let parts = parser::parse_uri_reference(s).map_err(|e| IllegalOpaqueUri::wrapping(s, e))?;
        if parts.scheme.is_none() {
            return Err(IllegalOpaqueUri::with_detail(s, "missing scheme"));
        }
        if parts.authority.is_some() {
            return Err(IllegalOpaqueUri::with_detail(
                s,
                "an opaque URI cannot have an authority",
            ));
        }
        Ok(Self::from_parts(parts))
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> &Scheme {
        self.parts.scheme.as_ref().unwrap()
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.parts.path
    }

    /// Returns the query, if present.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.parts.query.as_ref()
    }

    /// Returns the fragment, if present.
    #[must_use]
    pub fn fragment(&self) -> Option<&Fragment> {
        self.parts.fragment.as_ref()
    }
}

/// An absolute URL without a fragment, the form a server sees in
/// requests.
#[derive(Clone, Debug)]
pub struct ServersideAbsoluteUrl {
    parts: Parts,
    repr: Box<str>,
    norm: NormalCell<ServersideAbsoluteUrl>,
}

impl_reference_common!(
    ServersideAbsoluteUrl,
    IllegalServersideAbsoluteUrl,
    "a serverside absolute URL"
);

impl ServersideAbsoluteUrl {
    /// Parses a serverside absolute URL.
    ///
    /// # Errors
    ///
    /// Returns `Err` if scheme or authority is missing, a fragment is
    /// present, or any component violates its grammar.
    pub fn parse(s: &str) -> Result<Self, IllegalServersideAbsoluteUrl> {
        let parts = parser::parse_uri_reference(s)
            .map_err(|e| IllegalServersideAbsoluteUrl::wrapping(s, e))?;
        if parts.scheme.is_none() {
            return Err(IllegalServersideAbsoluteUrl::with_detail(s, "missing scheme"));
        }
        if parts.authority.is_none() {
            return Err(IllegalServersideAbsoluteUrl::with_detail(s, "missing authority"));
        }
        if parts.fragment.is_some() {
            return Err(IllegalServersideAbsoluteUrl::with_detail(
                s,
                "a serverside absolute URL cannot have a fragment",
            ));
        }
        Ok(Self::from_parts(parts))
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> &Scheme {
        self.parts.scheme.as_ref().unwrap()
    }

    /// Returns the authority.
    #[must_use]
    pub fn authority(&self) -> &Authority {
        self.parts.authority.as_ref().unwrap()
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.parts.path
    }

    /// Returns the query, if present.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.parts.query.as_ref()
    }

    /// Resolves `reference` against this URL per RFC 3986 §5.3.
    ///
    /// The target's fragment always comes from `reference`; an empty
    /// target path becomes `/` when the target has an authority. The
    /// result is dispatched to its most specific type, so a reference
    /// carrying its own scheme and no authority resolves to an opaque
    /// URI rather than a URL.
    #[must_use]
    pub fn resolve(&self, reference: &UriReference) -> UriReference {
        dispatch(resolve::resolve(&self.parts, reference.parts()))
    }
}

/// An absolute URL, `scheme "://" authority [path] [query] [fragment]`.
#[derive(Clone, Debug)]
pub struct AbsoluteUrl {
    parts: Parts,
    repr: Box<str>,
    norm: NormalCell<AbsoluteUrl>,
}

impl_reference_common!(AbsoluteUrl, IllegalAbsoluteUrl, "an absolute URL");

impl AbsoluteUrl {
    /// Parses an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns `Err` if scheme or authority is missing or any component
    /// violates its grammar.
    pub fn parse(s: &str) -> Result<Self, IllegalAbsoluteUrl> {
        let parts =
            parser::parse_uri_reference(s).map_err(|e| IllegalAbsoluteUrl::wrapping(s, e))?;
        if parts.scheme.is_none() {
            return Err(IllegalAbsoluteUrl::with_detail(s, "missing scheme"));
        }
        if parts.authority.is_none() {
            return Err(IllegalAbsoluteUrl::with_detail(s, "missing authority"));
        }
        Ok(Self::from_parts(parts))
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> &Scheme {
        self.parts.scheme.as_ref().unwrap()
    }

    /// Returns the authority.
    #[must_use]
    pub fn authority(&self) -> &Authority {
        self.parts.authority.as_ref().unwrap()
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.parts.path
    }

    /// Returns the query, if present.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.parts.query.as_ref()
    }

    /// Returns the fragment, if present.
    #[must_use]
    pub fn fragment(&self) -> Option<&Fragment> {
        self.parts.fragment.as_ref()
    }

    /// Returns this URL without its fragment.
    #[must_use]
    pub fn without_fragment(&self) -> ServersideAbsoluteUrl {
        let mut parts = self.parts.clone();
        parts.fragment = None;
        ServersideAbsoluteUrl::from_parts(parts)
    }
}

/// A normal-form `scheme "://" host [":" port]` with nothing else.
///
/// An origin is its own normal form by construction: the scheme and host
/// are lowercase, the port has no leading zeros and is not the scheme's
/// default, and there is no user info, path, query or fragment.
#[derive(Clone, Debug)]
pub struct Origin {
    parts: Parts,
    repr: Box<str>,
    norm: NormalCell<Origin>,
}

impl_reference_common!(Origin, IllegalUrl, "an origin");

impl Origin {
    /// Parses an origin.
    ///
    /// # Errors
    ///
    /// Returns `Err` unless the input is exactly a normal-form
    /// scheme-and-host-and-port URL.
    pub fn parse(s: &str) -> Result<Self, IllegalUrl> {
        let parts = parser::parse_uri_reference(s).map_err(|e| IllegalUrl::wrapping(s, e))?;
        match dispatch(parts) {
            UriReference::Origin(origin) => Ok(origin),
            _ => Err(IllegalUrl::with_detail(
                s,
                "an origin is a normal-form scheme, host and port with nothing else",
            )),
        }
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> &Scheme {
        self.parts.scheme.as_ref().unwrap()
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &Host {
        self.parts.authority.as_ref().unwrap().host()
    }

    /// Returns the explicit port, absent when it equals the scheme's
    /// default.
    #[must_use]
    pub fn port(&self) -> Option<&Port> {
        self.parts.authority.as_ref().unwrap().port().as_port()
    }

    /// Returns the port to connect to, explicit or the scheme's default.
    #[must_use]
    pub fn effective_port(&self) -> Option<u64> {
        self.port()
            .map(Port::number)
            .or_else(|| self.scheme().default_port().map(u64::from))
    }

    /// Returns the host and port as one credential-free authority.
    #[must_use]
    pub fn host_and_port(&self) -> HostAndPort {
        let authority = self.parts.authority.as_ref().unwrap();
        HostAndPort::from_parts(authority.host().clone(), authority.port().clone())
    }
}

/// A resolution base: an absolute URL whose path is empty or ends with
/// `/`, with no query and no fragment.
///
/// Resolving a relative path against a base always appends, never
/// replaces the last segment.
#[derive(Clone, Debug)]
pub struct BaseUrl {
    parts: Parts,
    repr: Box<str>,
    norm: NormalCell<BaseUrl>,
}

impl_reference_common!(BaseUrl, IllegalBaseUrl, "a base URL");

impl BaseUrl {
    /// Parses a base URL.
    ///
    /// # Errors
    ///
    /// Returns `Err` if scheme or authority is missing, a query or
    /// fragment is present, or the path neither is empty nor ends with
    /// `/`.
    pub fn parse(s: &str) -> Result<Self, IllegalBaseUrl> {
        let parts = parser::parse_uri_reference(s).map_err(|e| IllegalBaseUrl::wrapping(s, e))?;
        if parts.scheme.is_none() {
            return Err(IllegalBaseUrl::with_detail(s, "missing scheme"));
        }
        if parts.authority.is_none() {
            return Err(IllegalBaseUrl::with_detail(s, "missing authority"));
        }
        if parts.query.is_some() || parts.fragment.is_some() {
            return Err(IllegalBaseUrl::with_detail(
                s,
                "a base URL cannot have a query or fragment",
            ));
        }
        if !parts.path.is_empty() && !parts.path.as_str().ends_with('/') {
            return Err(IllegalBaseUrl::with_detail(
                s,
                "the path of a base URL must be empty or end with `/`",
            ));
        }
        Ok(Self::from_parts(parts))
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> &Scheme {
        self.parts.scheme.as_ref().unwrap()
    }

    /// Returns the authority.
    #[must_use]
    pub fn authority(&self) -> &Authority {
        self.parts.authority.as_ref().unwrap()
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.parts.path
    }

    /// Resolves `reference` against this base per RFC 3986 §5.3.
    ///
    /// The target is dispatched to its most specific type; a reference
    /// carrying its own scheme keeps its own shape.
    #[must_use]
    pub fn resolve(&self, reference: &UriReference) -> UriReference {
        dispatch(resolve::resolve(&self.parts, reference.parts()))
    }
}

/// Any URI reference, tagged with the most specific type its shape
/// allows.
///
/// Equality is type-sensitive: two references with the same string form
/// but different tags are unequal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum UriReference {
    /// No scheme, no authority, no fragment, empty-or-absolute path.
    PathAndQuery(PathAndQuery),
    /// No scheme and no authority, with a fragment or a rootless path.
    RelativeUrl(RelativeUrl),
    /// An authority without a scheme.
    SchemeRelativeUrl(SchemeRelativeUrl),
    /// A scheme without an authority.
    OpaqueUri(OpaqueUri),
    /// A normal-form scheme, host and port with nothing else.
    Origin(Origin),
    /// A scheme and authority without a fragment.
    ServersideAbsoluteUrl(ServersideAbsoluteUrl),
    /// A scheme and authority with a fragment.
    AbsoluteUrl(AbsoluteUrl),
}

/// Picks the most specific type for already-validated parts.
pub(crate) fn dispatch(parts: Parts) -> UriReference {
    match (&parts.scheme, &parts.authority) {
        (None, None)
            if parts.fragment.is_none()
                && (parts.path.is_empty() || parts.path.is_absolute()) =>
        {
            UriReference::PathAndQuery(PathAndQuery::from_parts(parts))
        }
        (None, Some(_)) => UriReference::SchemeRelativeUrl(SchemeRelativeUrl::from_parts(parts)),
        (None, None) => UriReference::RelativeUrl(RelativeUrl::from_parts(parts)),
        (Some(_), None) => UriReference::OpaqueUri(OpaqueUri::from_parts(parts)),
        (Some(scheme), Some(authority)) => {
            let is_origin = parts.path.is_empty()
                && parts.query.is_none()
                && parts.fragment.is_none()
                && scheme.is_normal_form()
                && authority.userinfo().is_none()
                && authority.is_normal_form(Some(scheme));
            if is_origin {
                UriReference::Origin(Origin::from_normal_parts(parts))
            } else if parts.fragment.is_none() {
                UriReference::ServersideAbsoluteUrl(ServersideAbsoluteUrl::from_parts(parts))
            } else {
                UriReference::AbsoluteUrl(AbsoluteUrl::from_parts(parts))
            }
        }
    }
}

macro_rules! impl_from_variant {
    ($($Ty:ident),*) => {
        $(impl From<$Ty> for UriReference {
            fn from(value: $Ty) -> Self {
                UriReference::$Ty(value)
            }
        })*
    };
}

impl_from_variant!(
    PathAndQuery,
    RelativeUrl,
    SchemeRelativeUrl,
    OpaqueUri,
    Origin,
    ServersideAbsoluteUrl,
    AbsoluteUrl
);

impl UriReference {
    /// Parses any URI reference, picking the most specific type.
    ///
    /// # Errors
    ///
    /// Returns `Err` wrapping the failing component's error.
    pub fn parse(s: &str) -> Result<Self, IllegalUri> {
        let parts = parser::parse_uri_reference(s).map_err(|e| IllegalUri::wrapping(s, e))?;
        Ok(dispatch(parts))
    }

    pub(crate) fn parts(&self) -> &Parts {
        match self {
            UriReference::PathAndQuery(v) => v.parts(),
            UriReference::RelativeUrl(v) => v.parts(),
            UriReference::SchemeRelativeUrl(v) => v.parts(),
            UriReference::OpaqueUri(v) => v.parts(),
            UriReference::Origin(v) => v.parts(),
            UriReference::ServersideAbsoluteUrl(v) => v.parts(),
            UriReference::AbsoluteUrl(v) => v.parts(),
        }
    }

    /// Returns the exact string this reference renders as.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            UriReference::PathAndQuery(v) => v.as_str(),
            UriReference::RelativeUrl(v) => v.as_str(),
            UriReference::SchemeRelativeUrl(v) => v.as_str(),
            UriReference::OpaqueUri(v) => v.as_str(),
            UriReference::Origin(v) => v.as_str(),
            UriReference::ServersideAbsoluteUrl(v) => v.as_str(),
            UriReference::AbsoluteUrl(v) => v.as_str(),
        }
    }

    /// Returns whether every component is in normal form.
    #[must_use]
    pub fn is_normal_form(&self) -> bool {
        match self {
            UriReference::PathAndQuery(v) => v.is_normal_form(),
            UriReference::RelativeUrl(v) => v.is_normal_form(),
            UriReference::SchemeRelativeUrl(v) => v.is_normal_form(),
            UriReference::OpaqueUri(v) => v.is_normal_form(),
            UriReference::Origin(v) => v.is_normal_form(),
            UriReference::ServersideAbsoluteUrl(v) => v.is_normal_form(),
            UriReference::AbsoluteUrl(v) => v.is_normal_form(),
        }
    }

    /// Returns the reference with every component normalized.
    ///
    /// Normalization never changes which components are present, so the
    /// tag is preserved.
    #[must_use]
    pub fn normalize(&self) -> Self {
        match self {
            UriReference::PathAndQuery(v) => UriReference::PathAndQuery(v.normalize()),
            UriReference::RelativeUrl(v) => UriReference::RelativeUrl(v.normalize()),
            UriReference::SchemeRelativeUrl(v) => UriReference::SchemeRelativeUrl(v.normalize()),
            UriReference::OpaqueUri(v) => UriReference::OpaqueUri(v.normalize()),
            UriReference::Origin(v) => UriReference::Origin(v.normalize()),
            UriReference::ServersideAbsoluteUrl(v) => {
                UriReference::ServersideAbsoluteUrl(v.normalize())
            }
            UriReference::AbsoluteUrl(v) => UriReference::AbsoluteUrl(v.normalize()),
        }
    }

    /// Returns a builder seeded with this reference's components.
    #[must_use]
    pub fn thaw(&self) -> UriBuilder {
        UriBuilder::from_parts(self.parts().clone())
    }
}

impl fmt::Display for UriReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UriReference {
    type Err = IllegalUri;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UriReference::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UriReference {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UriReference {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        UriReference::parse(&s).map_err(serde::de::Error::custom)
    }
}
