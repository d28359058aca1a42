use core::fmt;
use core::str::FromStr;

use crate::component::{Host, Port, Scheme, UserInfo};
use crate::error::IllegalAuthority;

/// The port as it appears in an authority, keeping all three states of
/// `host`, `host:` and `host:8080` apart.
///
/// All three round-trip: an empty port renders back as a bare `:`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum PortField {
    /// No `:` after the host.
    #[default]
    Absent,
    /// A `:` after the host with nothing behind it.
    Empty,
    /// A `:` followed by digits.
    Value(Port),
}

impl PortField {
    /// Returns the port if this field holds one.
    #[must_use]
    pub fn as_port(&self) -> Option<&Port> {
        match self {
            PortField::Value(port) => Some(port),
            _ => None,
        }
    }
}

/// The [authority] component, `[userinfo "@"] host [":" port]`.
///
/// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
#[derive(Clone, Debug)]
pub struct Authority {
    userinfo: Option<UserInfo>,
    host: Host,
    port: PortField,
}

/// Splits `host [":" port]`, honoring IP literal brackets.
fn split_host_port(s: &str) -> Option<(&str, Option<&str>)> {
    if s.starts_with('[') {
        let close = s.find(']')?;
        let (host, rest) = s.split_at(close + 1);
        match rest.strip_prefix(':') {
            Some(port) => Some((host, Some(port))),
            None if rest.is_empty() => Some((host, None)),
            None => None,
        }
    } else {
        match s.split_once(':') {
            Some((host, port)) => Some((host, Some(port))),
            None => Some((s, None)),
        }
    }
}

impl Authority {
    /// Parses an authority from a string, without the leading `//`.
    ///
    /// # Errors
    ///
    /// Returns `Err` wrapping the failing subcomponent's error.
    pub fn parse(s: &str) -> Result<Self, IllegalAuthority> {
        let (userinfo, rest) = match s.split_once('@') {
            Some((userinfo, rest)) => (Some(userinfo), rest),
            None => (None, s),
        };
        let userinfo = userinfo
            .map(UserInfo::parse)
            .transpose()
            .map_err(|e| IllegalAuthority::wrapping(s, e))?;
        let (host, port) = split_host_port(rest)
            .ok_or_else(|| IllegalAuthority::with_detail(s, "text after IP literal"))?;
        let host = Host::parse(host).map_err(|e| IllegalAuthority::wrapping(s, e))?;
        let port = match port {
            None => PortField::Absent,
            Some("") => PortField::Empty,
            Some(port) => PortField::Value(
                Port::parse(port).map_err(|e| IllegalAuthority::wrapping(s, e))?,
            ),
        };
        Ok(Authority::from_parts(userinfo, host, port))
    }

    /// Assembles an authority from its parts.
    #[must_use]
    pub fn from_parts(userinfo: Option<UserInfo>, host: Host, port: PortField) -> Self {
        Authority {
            userinfo,
            host,
            port,
        }
    }

    /// Returns the user-info subcomponent, if present.
    #[must_use]
    pub fn userinfo(&self) -> Option<&UserInfo> {
        self.userinfo.as_ref()
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the port field.
    #[must_use]
    pub fn port(&self) -> &PortField {
        &self.port
    }

    /// Returns whether the authority is in normal form for `scheme`.
    ///
    /// An empty port, a port equal to the scheme's default, and a port
    /// with leading zeros are all abnormal. The verdict depends on
    /// `scheme` and is never cached; the same authority may be normal
    /// for one scheme and abnormal for another.
    #[must_use]
    pub fn is_normal_form(&self, scheme: Option<&Scheme>) -> bool {
        let port_normal = match &self.port {
            PortField::Absent => true,
            PortField::Empty => false,
            PortField::Value(port) => port.is_normal_form() && !is_default_port(port, scheme),
        };
        port_normal
            && self.host.is_normal_form()
            && self.userinfo.as_ref().map_or(true, UserInfo::is_normal_form)
    }

    /// Returns the authority in normal form for `scheme`.
    ///
    /// Empty ports and ports equal to the scheme's default are dropped.
    #[must_use]
    pub fn normalize(&self, scheme: Option<&Scheme>) -> Authority {
        if self.is_normal_form(scheme) {
            return self.clone();
        }
        let port = match &self.port {
            PortField::Absent | PortField::Empty => PortField::Absent,
            PortField::Value(port) if is_default_port(port, scheme) => PortField::Absent,
            PortField::Value(port) => PortField::Value(port.normalize()),
        };
        Authority {
            userinfo: self.userinfo.as_ref().map(UserInfo::normalize),
            host: self.host.normalize(),
            port,
        }
    }
}

/// An authority with no credentials, `host [":" port]`.
///
/// This is the authority shape of an origin; grammar positions that
/// forbid user info use it directly.
#[derive(Clone, Debug)]
pub struct HostAndPort {
    host: Host,
    port: PortField,
}

impl HostAndPort {
    /// Parses a host-and-port from a string.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string contains user info or either
    /// subcomponent is malformed.
    pub fn parse(s: &str) -> Result<Self, IllegalAuthority> {
        if s.contains('@') {
            return Err(IllegalAuthority::with_detail(s, "user info not allowed here"));
        }
        let authority = Authority::parse(s)?;
        Ok(HostAndPort::from_parts(authority.host, authority.port))
    }

    /// Assembles a host-and-port from its parts.
    #[must_use]
    pub fn from_parts(host: Host, port: PortField) -> Self {
        HostAndPort { host, port }
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the port field.
    #[must_use]
    pub fn port(&self) -> &PortField {
        &self.port
    }

    /// Returns whether the host and port are in normal form for `scheme`,
    /// with the same port rules as [`Authority::is_normal_form`]. Like
    /// that method, the verdict is computed fresh on every call.
    #[must_use]
    pub fn is_normal_form(&self, scheme: Option<&Scheme>) -> bool {
        let port_normal = match &self.port {
            PortField::Absent => true,
            PortField::Empty => false,
            PortField::Value(port) => port.is_normal_form() && !is_default_port(port, scheme),
        };
        port_normal && self.host.is_normal_form()
    }

    /// Returns the host and port in normal form for `scheme`.
    #[must_use]
    pub fn normalize(&self, scheme: Option<&Scheme>) -> HostAndPort {
        if self.is_normal_form(scheme) {
            return self.clone();
        }
        let port = match &self.port {
            PortField::Absent | PortField::Empty => PortField::Absent,
            PortField::Value(port) if is_default_port(port, scheme) => PortField::Absent,
            PortField::Value(port) => PortField::Value(port.normalize()),
        };
        HostAndPort {
            host: self.host.normalize(),
            port,
        }
    }
}

impl TryFrom<Authority> for HostAndPort {
    type Error = IllegalAuthority;

    fn try_from(authority: Authority) -> Result<Self, Self::Error> {
        if authority.userinfo.is_some() {
            return Err(IllegalAuthority::with_detail(
                authority.to_string(),
                "user info not allowed here",
            ));
        }
        Ok(HostAndPort::from_parts(authority.host, authority.port))
    }
}

impl From<HostAndPort> for Authority {
    fn from(value: HostAndPort) -> Authority {
        Authority::from_parts(None, value.host, value.port)
    }
}

impl PartialEq for HostAndPort {
    fn eq(&self, other: &Self) -> bool {
        self.host == other.host && self.port == other.port
    }
}

impl Eq for HostAndPort {}

impl fmt::Display for HostAndPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host.as_str())?;
        match &self.port {
            PortField::Absent => Ok(()),
            PortField::Empty => f.write_str(":"),
            PortField::Value(port) => write!(f, ":{port}"),
        }
    }
}

impl FromStr for HostAndPort {
    type Err = IllegalAuthority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HostAndPort::parse(s)
    }
}

fn is_default_port(port: &Port, scheme: Option<&Scheme>) -> bool {
    scheme
        .and_then(Scheme::default_port)
        .is_some_and(|default| port.number() == u64::from(default))
}

impl PartialEq for Authority {
    fn eq(&self, other: &Self) -> bool {
        self.userinfo == other.userinfo && self.host == other.host && self.port == other.port
    }
}

impl Eq for Authority {}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(userinfo) = &self.userinfo {
            write!(f, "{userinfo}@")?;
        }
        f.write_str(self.host.as_str())?;
        match &self.port {
            PortField::Absent => Ok(()),
            PortField::Empty => f.write_str(":"),
            PortField::Value(port) => write!(f, ":{port}"),
        }
    }
}

impl FromStr for Authority {
    type Err = IllegalAuthority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Authority::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_all_parts() {
        let auth = Authority::parse("user:pw@example.com:8080").unwrap();
        assert_eq!(auth.userinfo().unwrap().to_string(), "user:pw");
        assert_eq!(auth.host().as_str(), "example.com");
        assert_eq!(auth.port().as_port().unwrap().number(), 8080);
        assert_eq!(auth.to_string(), "user:pw@example.com:8080");
    }

    #[test]
    fn three_port_states_round_trip() {
        for s in ["example.com", "example.com:", "example.com:80"] {
            assert_eq!(Authority::parse(s).unwrap().to_string(), s);
        }
        assert_eq!(*Authority::parse("h").unwrap().port(), PortField::Absent);
        assert_eq!(*Authority::parse("h:").unwrap().port(), PortField::Empty);
        assert_ne!(
            Authority::parse("h").unwrap(),
            Authority::parse("h:").unwrap()
        );
    }

    #[test]
    fn brackets_shield_the_colon() {
        let auth = Authority::parse("[::1]:8080").unwrap();
        assert_eq!(auth.host().as_str(), "[::1]");
        assert_eq!(auth.port().as_port().unwrap().number(), 8080);
        assert!(Authority::parse("[::1]x").is_err());
        assert!(Authority::parse("[::1").is_err());
    }

    #[test]
    fn wraps_subcomponent_failures() {
        let err = Authority::parse("example.com:8o80").unwrap_err();
        assert_eq!(err.value, "example.com:8o80");
        assert!(matches!(
            err.cause(),
            Some(crate::error::ComponentError::Port(_))
        ));
    }

    #[test]
    fn host_and_port_refuses_credentials() {
        let hp = HostAndPort::parse("example.com:8080").unwrap();
        assert_eq!(hp.host().as_str(), "example.com");
        assert_eq!(hp.to_string(), "example.com:8080");
        assert!(HostAndPort::parse("u@example.com").is_err());

        let bare = Authority::parse("example.com").unwrap();
        assert_eq!(
            HostAndPort::try_from(bare).unwrap().to_string(),
            "example.com"
        );
        let with_user = Authority::parse("u@example.com").unwrap();
        assert!(HostAndPort::try_from(with_user).is_err());

        let scheme = Scheme::parse("ws").unwrap();
        let hp = HostAndPort::parse("EXAMPLE.com:80").unwrap();
        assert!(!hp.is_normal_form(Some(&scheme)));
        assert_eq!(hp.normalize(Some(&scheme)).to_string(), "example.com");
    }

    #[test]
    fn default_port_drops_in_normal_form() {
        let scheme = Scheme::parse("http").unwrap();
        let auth = Authority::parse("EXAMPLE.com:80").unwrap();
        assert!(!auth.is_normal_form(Some(&scheme)));
        assert_eq!(auth.normalize(Some(&scheme)).to_string(), "example.com");

        let other = Authority::parse("example.com:8080").unwrap();
        assert!(other.is_normal_form(Some(&scheme)));

        let empty = Authority::parse("example.com:").unwrap();
        assert_eq!(empty.normalize(None).to_string(), "example.com");
    }

    #[test]
    fn normal_form_verdict_tracks_the_scheme() {
        let auth = Authority::parse("h:80").unwrap();
        assert!(auth.is_normal_form(None));

        // The same instance, asked again for a scheme whose default
        // port is 80.
        let http = Scheme::parse("http").unwrap();
        assert!(!auth.is_normal_form(Some(&http)));
        assert_eq!(auth.normalize(Some(&http)).to_string(), "h");
        assert_eq!(auth.normalize(None).to_string(), "h:80");

        let hp = HostAndPort::parse("h:80").unwrap();
        assert!(hp.is_normal_form(None));
        assert!(!hp.is_normal_form(Some(&http)));
    }
}
