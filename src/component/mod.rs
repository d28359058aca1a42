//! The primitive components a URI reference is assembled from.
//!
//! Each component is an immutable value: parsing validates the grammar,
//! accessors expose the original text, and `normalize` returns a new
//! value in normal form, computed at most once per instance.

mod authority;
mod fragment;
mod host;
mod path;
mod port;
mod query;
mod scheme;
mod userinfo;

pub use authority::{Authority, HostAndPort, PortField};
pub use fragment::Fragment;
pub use host::{Host, HostKind};
pub use path::Path;
pub use port::Port;
pub use query::Query;
pub use scheme::Scheme;
pub use userinfo::{Password, UserInfo, Username};
