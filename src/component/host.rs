use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::encoding::{self, table, Table};
use crate::error::IllegalHost;
use crate::norm::NormalCell;

/// The shape a [`Host`] was recognized as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostKind {
    /// A registered name, possibly empty.
    RegisteredName,
    /// A dotted-quad IPv4 address.
    Ipv4,
    /// A bracketed IPv6 address or IPvFuture literal.
    IpLiteral,
}

/// The [host] subcomponent of an authority.
///
/// Hosts compare and hash case-insensitively.
///
/// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
#[derive(Clone, Debug)]
pub struct Host {
    raw: Box<str>,
    kind: HostKind,
    norm: NormalCell<Host>,
}

/// Checks a bracketed IP literal, brackets excluded.
fn check_ip_literal(inner: &str) -> bool {
    let version_prefix = inner.strip_prefix('v').or_else(|| inner.strip_prefix('V'));
    if let Some(future) = version_prefix {
        // IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
        let Some((version, addr)) = future.split_once('.') else {
            return false;
        };
        !version.is_empty()
            && version.bytes().all(|x| table::HEXDIG.allows(x))
            && !addr.is_empty()
            && addr.bytes().all(|x| table::IPV_FUTURE.allows(x))
    } else {
        Ipv6Addr::from_str(inner).is_ok()
    }
}

impl Host {
    /// Parses a host from a string.
    ///
    /// The empty string parses as an empty registered name. A string that
    /// matches the `IPv4address` grammar is recognized as [`HostKind::Ipv4`]
    /// rather than as a registered name.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is neither a well-formed IP literal in
    /// brackets nor a `reg-name`.
    pub fn parse(s: &str) -> Result<Self, IllegalHost> {
        let kind = if let Some(rest) = s.strip_prefix('[') {
            let Some(inner) = rest.strip_suffix(']') else {
                return Err(IllegalHost::with_detail(s, "unclosed bracket"));
            };
            if !check_ip_literal(inner) {
                return Err(IllegalHost::with_detail(s, "malformed IP literal"));
            }
            HostKind::IpLiteral
        } else if table::REG_NAME.validate(s.as_bytes()) {
            if Ipv4Addr::from_str(s).is_ok() {
                HostKind::Ipv4
            } else {
                HostKind::RegisteredName
            }
        } else {
            return Err(IllegalHost::new(s));
        };
        Ok(Host {
            raw: s.into(),
            kind,
            norm: NormalCell::new(),
        })
    }

    /// The empty registered name.
    pub(crate) fn empty() -> Host {
        Host {
            raw: "".into(),
            kind: HostKind::RegisteredName,
            norm: NormalCell::new(),
        }
    }

    /// Returns the host as a string slice, brackets included for IP literals.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the shape this host was recognized as.
    #[must_use]
    pub fn kind(&self) -> HostKind {
        self.kind
    }

    /// Returns whether the host is in normal form.
    ///
    /// A registered name is normal when it is lowercase and its
    /// percent-encoding is normal. IP addresses and bracketed literals
    /// are kept verbatim as parsed and are always normal.
    #[must_use]
    pub fn is_normal_form(&self) -> bool {
        self.norm.is_normal_form(|| match self.kind {
            HostKind::RegisteredName => {
                !self.raw.bytes().any(|x| x.is_ascii_uppercase())
                    && encoding::is_normal_form(&self.raw, table::REG_NAME, Table::EMPTY)
            }
            HostKind::Ipv4 | HostKind::IpLiteral => true,
        })
    }

    /// Returns the host in normal form, leaving IP addresses and
    /// bracketed literals untouched.
    #[must_use]
    pub fn normalize(&self) -> Host {
        self.norm.normalize(self, || {
            if self.kind != HostKind::RegisteredName {
                return None;
            }
            let normalized = encoding::normalize(
                &self.raw.to_ascii_lowercase(),
                table::REG_NAME,
                Table::EMPTY,
            );
            if *normalized == *self.raw {
                None
            } else {
                Some(Host {
                    raw: normalized.into(),
                    kind: self.kind,
                    norm: NormalCell::normal(),
                })
            }
        })
    }
}

impl PartialEq for Host {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.raw.eq_ignore_ascii_case(&other.raw)
    }
}

impl Eq for Host {}

impl Hash for Host {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        for x in self.raw.bytes() {
            state.write_u8(x.to_ascii_lowercase());
        }
    }
}

impl PartialOrd for Host {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Host {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw
            .bytes()
            .map(|x| x.to_ascii_lowercase())
            .cmp(other.raw.bytes().map(|x| x.to_ascii_lowercase()))
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Host {
    type Err = IllegalHost;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Host::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_kinds() {
        assert_eq!(Host::parse("example.com").unwrap().kind(), HostKind::RegisteredName);
        assert_eq!(Host::parse("").unwrap().kind(), HostKind::RegisteredName);
        assert_eq!(Host::parse("127.0.0.1").unwrap().kind(), HostKind::Ipv4);
        assert_eq!(Host::parse("[::1]").unwrap().kind(), HostKind::IpLiteral);
        assert_eq!(Host::parse("[v1.fe]").unwrap().kind(), HostKind::IpLiteral);
    }

    #[test]
    fn near_miss_addresses_are_names() {
        assert_eq!(Host::parse("256.1.1.1").unwrap().kind(), HostKind::RegisteredName);
        assert_eq!(Host::parse("1.2.3").unwrap().kind(), HostKind::RegisteredName);
        assert_eq!(Host::parse("01.2.3.4").unwrap().kind(), HostKind::RegisteredName);
    }

    #[test]
    fn rejects_malformed() {
        assert!(Host::parse("[::1").is_err());
        assert!(Host::parse("[vz.1]").is_err());
        assert!(Host::parse("[1.2.3.4]").is_err());
        assert!(Host::parse("ex ample").is_err());
        assert!(Host::parse("a/b").is_err());
        assert!(Host::parse("%zz").is_err());
    }

    #[test]
    fn normalizes_case_and_encoding() {
        let host = Host::parse("EXAMPLE.com").unwrap();
        assert!(!host.is_normal_form());
        assert_eq!(host.normalize().as_str(), "example.com");
        assert_eq!(host, Host::parse("example.COM").unwrap());

        let encoded = Host::parse("ex%61mple.com").unwrap();
        assert_eq!(encoded.normalize().as_str(), "example.com");
    }

    #[test]
    fn ip_hosts_are_preserved_verbatim() {
        let literal = Host::parse("[2001:DB8::1]").unwrap();
        assert!(literal.is_normal_form());
        assert_eq!(literal.normalize().as_str(), "[2001:DB8::1]");

        let future = Host::parse("[V1.FE]").unwrap();
        assert!(future.is_normal_form());
        assert_eq!(future.normalize().as_str(), "[V1.FE]");

        let quad = Host::parse("127.0.0.1").unwrap();
        assert!(quad.is_normal_form());
        assert_eq!(quad.normalize().as_str(), "127.0.0.1");
    }
}
