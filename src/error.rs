//! Typed errors, one per grammar production.
//!
//! Every failure in this crate is a value-construction error carrying the
//! offending literal text. Composite parses never discard a sub-component
//! failure: it is attached as the error's [`source`].
//!
//! [`source`]: std::error::Error::source

use thiserror::Error;

fn detail_suffix(detail: &Option<&'static str>) -> String {
    match detail {
        Some(d) => format!(" ({d})"),
        None => String::new(),
    }
}

macro_rules! leaf_error {
    ($(#[$meta:meta])* $Name:ident => $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Error)]
        #[error("Illegal {}: `{}`{}", $label, .value, detail_suffix(.detail))]
        pub struct $Name {
            /// The offending input text.
            pub value: String,
            pub(crate) detail: Option<&'static str>,
        }

        impl $Name {
            /// Creates an error for the given input text.
            pub fn new(value: impl Into<String>) -> Self {
                Self {
                    value: value.into(),
                    detail: None,
                }
            }

            /// Creates an error with an extra detail message.
            pub fn with_detail(value: impl Into<String>, detail: &'static str) -> Self {
                Self {
                    value: value.into(),
                    detail: Some(detail),
                }
            }

            /// Returns the extra detail attached to this error, if any.
            pub fn detail(&self) -> Option<&'static str> {
                self.detail
            }
        }
    };
}

macro_rules! composite_error {
    ($(#[$meta:meta])* $Name:ident => $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Error)]
        #[error("Illegal {}: `{}`{}", $label, .value, detail_suffix(.detail))]
        pub struct $Name {
            /// The offending input text.
            pub value: String,
            pub(crate) detail: Option<&'static str>,
            #[source]
            pub(crate) cause: Option<Box<ComponentError>>,
        }

        impl $Name {
            /// Creates an error for the given input text.
            pub fn new(value: impl Into<String>) -> Self {
                Self {
                    value: value.into(),
                    detail: None,
                    cause: None,
                }
            }

            /// Creates an error with an extra detail message.
            pub fn with_detail(value: impl Into<String>, detail: &'static str) -> Self {
                Self {
                    value: value.into(),
                    detail: Some(detail),
                    cause: None,
                }
            }

            /// Creates an error wrapping a sub-component failure.
            pub fn wrapping(
                value: impl Into<String>,
                cause: impl Into<ComponentError>,
            ) -> Self {
                Self {
                    value: value.into(),
                    detail: None,
                    cause: Some(Box::new(cause.into())),
                }
            }

            /// Returns the extra detail attached to this error, if any.
            pub fn detail(&self) -> Option<&'static str> {
                self.detail
            }

            /// Returns the sub-component failure this error wraps, if any.
            pub fn cause(&self) -> Option<&ComponentError> {
                self.cause.as_deref()
            }
        }
    };
}

leaf_error! {
    /// The input is not a valid scheme.
    IllegalScheme => "scheme"
}
leaf_error! {
    /// The input is not a valid host.
    IllegalHost => "host"
}
leaf_error! {
    /// The input is not a valid port.
    IllegalPort => "port"
}
leaf_error! {
    /// The input is not a valid username.
    IllegalUsername => "username"
}
leaf_error! {
    /// The input is not a valid path.
    IllegalPath => "path"
}
leaf_error! {
    /// The input is not a valid query.
    IllegalQuery => "query"
}
leaf_error! {
    /// The input is not a valid fragment.
    IllegalFragment => "fragment"
}

composite_error! {
    /// The input is not a valid user-info subcomponent.
    IllegalUserInfo => "user info"
}
composite_error! {
    /// The input is not a valid authority.
    IllegalAuthority => "authority"
}

/// A failure in any single URI component.
///
/// This is the `source` type of every composite error in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ComponentError {
    /// An invalid scheme.
    #[error(transparent)]
    Scheme(#[from] IllegalScheme),
    /// An invalid host.
    #[error(transparent)]
    Host(#[from] IllegalHost),
    /// An invalid port.
    #[error(transparent)]
    Port(#[from] IllegalPort),
    /// An invalid user-info subcomponent.
    #[error(transparent)]
    UserInfo(#[from] IllegalUserInfo),
    /// An invalid username.
    #[error(transparent)]
    Username(#[from] IllegalUsername),
    /// An invalid authority.
    #[error(transparent)]
    Authority(#[from] IllegalAuthority),
    /// An invalid path.
    #[error(transparent)]
    Path(#[from] IllegalPath),
    /// An invalid query.
    #[error(transparent)]
    Query(#[from] IllegalQuery),
    /// An invalid fragment.
    #[error(transparent)]
    Fragment(#[from] IllegalFragment),
}

composite_error! {
    /// The input is not a valid URI reference.
    IllegalUri => "URI"
}
composite_error! {
    /// The input is not a valid URL.
    IllegalUrl => "URL"
}
composite_error! {
    /// The input is not a valid absolute URL.
    IllegalAbsoluteUrl => "absolute URL"
}
composite_error! {
    /// The input is not a valid relative URL.
    IllegalRelativeUrl => "relative URL"
}
composite_error! {
    /// The input is not a valid path-and-query reference.
    IllegalPathAndQuery => "path and query"
}
composite_error! {
    /// The input is not a valid base URL.
    IllegalBaseUrl => "base URL"
}
composite_error! {
    /// The input is not a valid serverside absolute URL.
    IllegalServersideAbsoluteUrl => "serverside absolute URL"
}
composite_error! {
    /// The input is not a valid opaque URI.
    IllegalOpaqueUri => "opaque URI"
}
composite_error! {
    /// The input is not a valid scheme-relative URL.
    IllegalSchemeRelativeUrl => "scheme-relative URL"
}
