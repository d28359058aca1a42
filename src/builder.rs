//! A shared component-level builder behind every variant type.
//!
//! The builder accumulates components, materializes a full authority
//! lazily from buffered user info, host and port, and dispatches to the
//! most specific type on [`build`]. The narrowing finishers reuse the
//! same dispatch and fail when it lands on a different shape.
//!
//! [`build`]: UriBuilder::build

use crate::component::{
    Authority, Fragment, Host, Path, Port, PortField, Query, Scheme, UserInfo,
};
use crate::error::{
    IllegalAbsoluteUrl, IllegalBaseUrl, IllegalOpaqueUri, IllegalPathAndQuery, IllegalRelativeUrl,
    IllegalSchemeRelativeUrl, IllegalServersideAbsoluteUrl, IllegalUri, IllegalUrl,
};
use crate::reference::{check_shape, dispatch, Parts};
use crate::reference::{
    AbsoluteUrl, BaseUrl, OpaqueUri, Origin, PathAndQuery, RelativeUrl, SchemeRelativeUrl,
    ServersideAbsoluteUrl, UriReference,
};

#[derive(Clone, Debug, Default)]
enum QueryState {
    #[default]
    Unset,
    Set(Query),
    Building(Vec<(String, Option<String>)>),
}

/// A mutable accumulator for the components of a URI reference.
///
/// Setters are chainable and by value. Setting user info, host or port
/// before any authority exists buffers the value; once an authority
/// exists, each setter rebuilds it immediately.
#[derive(Clone, Debug, Default)]
pub struct UriBuilder {
    scheme: Option<Scheme>,
    authority: Option<Authority>,
    userinfo: Option<UserInfo>,
    host: Option<Host>,
    port: Option<PortField>,
    path: Option<Path>,
    query: QueryState,
    fragment: Option<Fragment>,
}

impl UriBuilder {
    /// Creates an empty builder; building it yields the empty
    /// path-and-query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(parts: Parts) -> Self {
        UriBuilder {
            scheme: parts.scheme,
            authority: parts.authority,
            userinfo: None,
            host: None,
            port: None,
            path: Some(parts.path),
            query: match parts.query {
                Some(query) => QueryState::Set(query),
                None => QueryState::Unset,
            },
            fragment: parts.fragment,
        }
    }

    /// Sets the scheme.
    #[must_use]
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Removes the scheme.
    #[must_use]
    pub fn clear_scheme(mut self) -> Self {
        self.scheme = None;
        self
    }

    /// Sets a complete authority, discarding any buffered subcomponents.
    #[must_use]
    pub fn authority(mut self, authority: Authority) -> Self {
        self.authority = Some(authority);
        self.userinfo = None;
        self.host = None;
        self.port = None;
        self
    }

    /// Removes the authority and any buffered subcomponents.
    #[must_use]
    pub fn clear_authority(mut self) -> Self {
        self.authority = None;
        self.userinfo = None;
        self.host = None;
        self.port = None;
        self
    }

    /// Sets the user info, rebuilding the authority if one exists.
    #[must_use]
    pub fn userinfo(mut self, userinfo: UserInfo) -> Self {
        match self.authority.take() {
            Some(authority) => {
                self.authority = Some(Authority::from_parts(
                    Some(userinfo),
                    authority.host().clone(),
                    authority.port().clone(),
                ));
            }
            None => self.userinfo = Some(userinfo),
        }
        self
    }

    /// Sets the host, rebuilding the authority if one exists.
    #[must_use]
    pub fn host(mut self, host: Host) -> Self {
        match self.authority.take() {
            Some(authority) => {
                self.authority = Some(Authority::from_parts(
                    authority.userinfo().cloned(),
                    host,
                    authority.port().clone(),
                ));
            }
            None => self.host = Some(host),
        }
        self
    }

    /// Sets an explicit port, rebuilding the authority if one exists.
    #[must_use]
    pub fn port(self, port: Port) -> Self {
        self.port_field(PortField::Value(port))
    }

    /// Sets the port field in any of its three states.
    #[must_use]
    pub fn port_field(mut self, port: PortField) -> Self {
        match self.authority.take() {
            Some(authority) => {
                self.authority = Some(Authority::from_parts(
                    authority.userinfo().cloned(),
                    authority.host().clone(),
                    port,
                ));
            }
            None => self.port = Some(port),
        }
        self
    }

    /// Sets the path.
    #[must_use]
    pub fn path(mut self, path: Path) -> Self {
        self.path = Some(path);
        self
    }

    /// Sets a complete query, discarding any pending entries.
    #[must_use]
    pub fn query(mut self, query: Query) -> Self {
        self.query = QueryState::Set(query);
        self
    }

    /// Removes the query.
    #[must_use]
    pub fn clear_query(mut self) -> Self {
        self.query = QueryState::Unset;
        self
    }

    /// Appends a decoded query entry.
    ///
    /// An already-set query is converted to its entries first, so mixing
    /// `query` and `query_entry` appends.
    #[must_use]
    pub fn query_entry(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        let mut entries = match core::mem::take(&mut self.query) {
            QueryState::Unset => Vec::new(),
            QueryState::Set(query) => query.entries().to_vec(),
            QueryState::Building(entries) => entries,
        };
        entries.push((key.into(), value.map(str::to_owned)));
        self.query = QueryState::Building(entries);
        self
    }

    /// Sets the fragment.
    #[must_use]
    pub fn fragment(mut self, fragment: Fragment) -> Self {
        self.fragment = Some(fragment);
        self
    }

    /// Removes the fragment.
    #[must_use]
    pub fn clear_fragment(mut self) -> Self {
        self.fragment = None;
        self
    }

    fn into_parts(self) -> Parts {
        let query = match self.query {
            QueryState::Unset => None,
            QueryState::Set(query) => Some(query),
            QueryState::Building(entries) if entries.is_empty() => None,
            QueryState::Building(entries) => Some(Query::from_entries(entries)),
        };
        let authority = self.authority.or_else(|| {
            let buffered =
                self.userinfo.is_some() || self.host.is_some() || self.port.is_some();
            buffered.then(|| {
                Authority::from_parts(
                    self.userinfo,
                    self.host.unwrap_or_else(Host::empty),
                    self.port.unwrap_or_default(),
                )
            })
        });
        Parts {
            scheme: self.scheme,
            authority,
            path: self.path.unwrap_or_else(Path::empty),
            query,
            fragment: self.fragment,
        }
    }

    /// Builds the accumulated components into the most specific type.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the components cannot form a well-formed
    /// reference, e.g. an authority-less path starting with `//`.
    pub fn build(self) -> Result<UriReference, IllegalUri> {
        let parts = self.into_parts();
        check_shape(&parts).map_err(|e| IllegalUri::wrapping(parts.render(), e))?;
        Ok(dispatch(parts))
    }
}

macro_rules! rewrap {
    ($e:expr, $To:ident) => {
        $To {
            value: $e.value,
            detail: $e.detail,
            cause: $e.cause,
        }
    };
}

macro_rules! mismatch {
    ($built:expr, $To:ident, $detail:literal) => {
        $To::with_detail($built.as_str().to_owned(), $detail)
    };
}

impl UriBuilder {
    /// Builds and requires the absolute URL shape: scheme and authority
    /// present.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the build fails or lands on another shape.
    pub fn build_absolute_url(self) -> Result<AbsoluteUrl, IllegalAbsoluteUrl> {
        match self.build().map_err(|e| rewrap!(e, IllegalAbsoluteUrl))? {
            UriReference::AbsoluteUrl(url) => Ok(url),
            UriReference::ServersideAbsoluteUrl(url) => {
                Ok(AbsoluteUrl::from_parts(url.parts().clone()))
            }
            UriReference::Origin(origin) => Ok(AbsoluteUrl::from_parts(origin.parts().clone())),
            other => Err(mismatch!(
                other,
                IllegalAbsoluteUrl,
                "an absolute URL needs a scheme and an authority"
            )),
        }
    }

    /// Builds and requires the serverside absolute URL shape: scheme and
    /// authority present, no fragment.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the build fails or lands on another shape.
    pub fn build_serverside_absolute_url(
        self,
    ) -> Result<ServersideAbsoluteUrl, IllegalServersideAbsoluteUrl> {
        match self
            .build()
            .map_err(|e| rewrap!(e, IllegalServersideAbsoluteUrl))?
        {
            UriReference::ServersideAbsoluteUrl(url) => Ok(url),
            UriReference::Origin(origin) => {
                Ok(ServersideAbsoluteUrl::from_parts(origin.parts().clone()))
            }
            other => Err(mismatch!(
                other,
                IllegalServersideAbsoluteUrl,
                "a serverside absolute URL needs a scheme and an authority and no fragment"
            )),
        }
    }

    /// Builds and requires the origin shape.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the build fails or lands on another shape.
    pub fn build_origin(self) -> Result<Origin, IllegalUrl> {
        match self.build().map_err(|e| rewrap!(e, IllegalUrl))? {
            UriReference::Origin(origin) => Ok(origin),
            other => Err(mismatch!(
                other,
                IllegalUrl,
                "an origin is a normal-form scheme, host and port with nothing else"
            )),
        }
    }

    /// Builds and requires the opaque URI shape: scheme present, no
    /// authority.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the build fails or lands on another shape.
    pub fn build_opaque_uri(self) -> Result<OpaqueUri, IllegalOpaqueUri> {
        match self.build().map_err(|e| rewrap!(e, IllegalOpaqueUri))? {
            UriReference::OpaqueUri(uri) => Ok(uri),
            other => Err(mismatch!(
                other,
                IllegalOpaqueUri,
                "an opaque URI needs a scheme and no authority"
            )),
        }
    }

    /// Builds and requires the scheme-relative URL shape: authority
    /// present, no scheme.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the build fails or lands on another shape.
    pub fn build_scheme_relative_url(
        self,
    ) -> Result<SchemeRelativeUrl, IllegalSchemeRelativeUrl> {
        match self
            .build()
            .map_err(|e| rewrap!(e, IllegalSchemeRelativeUrl))?
        {
            UriReference::SchemeRelativeUrl(url) => Ok(url),
            other => Err(mismatch!(
                other,
                IllegalSchemeRelativeUrl,
                "a scheme-relative URL needs an authority and no scheme"
            )),
        }
    }

    /// Builds and requires a schemeless shape, widening it to a relative
    /// URL.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the build fails or produces a scheme.
    pub fn build_relative_url(self) -> Result<RelativeUrl, IllegalRelativeUrl> {
        match self.build().map_err(|e| rewrap!(e, IllegalRelativeUrl))? {
            UriReference::RelativeUrl(url) => Ok(url),
            UriReference::PathAndQuery(url) => Ok(RelativeUrl::from_parts(url.parts().clone())),
            UriReference::SchemeRelativeUrl(url) => {
                Ok(RelativeUrl::from_parts(url.parts().clone()))
            }
            other => Err(mismatch!(
                other,
                IllegalRelativeUrl,
                "a relative URL cannot have a scheme"
            )),
        }
    }

    /// Builds and requires the path-and-query shape.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the build fails or lands on another shape.
    pub fn build_path_and_query(self) -> Result<PathAndQuery, IllegalPathAndQuery> {
        match self.build().map_err(|e| rewrap!(e, IllegalPathAndQuery))? {
            UriReference::PathAndQuery(url) => Ok(url),
            other => Err(mismatch!(
                other,
                IllegalPathAndQuery,
                "a path and query has no scheme, authority or fragment"
            )),
        }
    }

    /// Builds and requires the base URL shape: a serverside absolute URL
    /// whose path is empty or ends with `/`, with no query.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the build fails or lands on another shape.
    pub fn build_base_url(self) -> Result<BaseUrl, IllegalBaseUrl> {
        let built = match self.build().map_err(|e| rewrap!(e, IllegalBaseUrl))? {
            UriReference::ServersideAbsoluteUrl(url) => url.parts().clone(),
            UriReference::Origin(origin) => origin.parts().clone(),
            other => {
                return Err(mismatch!(
                    other,
                    IllegalBaseUrl,
                    "a base URL needs a scheme and an authority and no fragment"
                ))
            }
        };
        if built.query.is_some() {
            return Err(IllegalBaseUrl::with_detail(
                built.render(),
                "a base URL cannot have a query or fragment",
            ));
        }
        if !built.path.is_empty() && !built.path.as_str().ends_with('/') {
            return Err(IllegalBaseUrl::with_detail(
                built.render(),
                "the path of a base URL must be empty or end with `/`",
            ));
        }
        Ok(BaseUrl::from_parts(built))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme(s: &str) -> Scheme {
        Scheme::parse(s).unwrap()
    }

    fn host(s: &str) -> Host {
        Host::parse(s).unwrap()
    }

    #[test]
    fn buffered_subcomponents_materialize_an_authority() {
        let built = UriBuilder::new()
            .scheme(scheme("http"))
            .host(host("example.com"))
            .port(Port::parse("8080").unwrap())
            .path(Path::parse("/x").unwrap())
            .build()
            .unwrap();
        assert_eq!(built.as_str(), "http://example.com:8080/x");
    }

    #[test]
    fn setting_a_subcomponent_after_authority_rebuilds_it() {
        let built = UriBuilder::new()
            .scheme(scheme("http"))
            .authority(Authority::parse("u@example.com").unwrap())
            .port(Port::parse("81").unwrap())
            .build()
            .unwrap();
        assert_eq!(built.as_str(), "http://u@example.com:81");
    }

    #[test]
    fn pending_entries_finalize_to_a_query() {
        let built = UriBuilder::new()
            .query_entry("a", Some("1"))
            .query_entry("full name", None)
            .build()
            .unwrap();
        assert_eq!(built.as_str(), "?a=1&full%20name");
    }

    #[test]
    fn empty_builder_is_the_empty_path_and_query() {
        assert!(matches!(
            UriBuilder::new().build().unwrap(),
            UriReference::PathAndQuery(_)
        ));
    }

    #[test]
    fn authority_less_double_slash_path_fails() {
        let err = UriBuilder::new()
            .path(Path::parse("//x").unwrap())
            .build()
            .unwrap_err();
        assert!(err.cause().is_some());
    }
}
