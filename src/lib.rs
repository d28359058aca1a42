//! A typed URI/URL value library per [RFC 3986].
//!
//! Every legal shape of a URI reference gets its own immutable type:
//! [`AbsoluteUrl`], [`ServersideAbsoluteUrl`], [`Origin`], [`OpaqueUri`],
//! [`SchemeRelativeUrl`], [`RelativeUrl`], [`PathAndQuery`] and
//! [`BaseUrl`]. [`UriReference::parse`] picks the most specific type for
//! an input; each type's own `parse` demands its shape and fails
//! otherwise.
//!
//! # Examples
//!
//! Parse, inspect and normalize:
//!
//! ```
//! use uri_shapes::{AbsoluteUrl, UriReference};
//!
//! let url = AbsoluteUrl::parse("HTTPS://EXAMPLE.COM:443/%61#frag")?;
//! assert_eq!(url.scheme().as_str(), "HTTPS");
//! assert_eq!(url.normalize().as_str(), "https://example.com/a#frag");
//!
//! let origin = UriReference::parse("https://example.com")?;
//! assert!(matches!(origin, UriReference::Origin(_)));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Resolve a reference against a base:
//!
//! ```
//! use uri_shapes::{ServersideAbsoluteUrl, UriReference};
//!
//! let base = ServersideAbsoluteUrl::parse("http://example.com/a/b")?;
//! let target = base.resolve(&UriReference::parse("../c?q")?);
//! assert_eq!(target.as_str(), "http://example.com/c?q");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Crate features
//!
//! - `serde`: [`Serialize`] and [`Deserialize`] for every reference
//!   type, as plain strings.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986
//! [`Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]

mod builder;
pub mod component;
pub mod encoding;
pub mod error;
mod norm;
mod parser;
mod reference;
mod resolve;

pub use builder::UriBuilder;
pub use component::{
    Authority, Fragment, Host, HostAndPort, HostKind, Password, Path, Port, PortField, Query,
    Scheme, UserInfo, Username,
};
pub use reference::{
    AbsoluteUrl, BaseUrl, OpaqueUri, Origin, PathAndQuery, RelativeUrl, SchemeRelativeUrl,
    ServersideAbsoluteUrl, UriReference,
};
