use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use crate::encoding::table;
use crate::error::IllegalScheme;
use crate::norm::NormalCell;

/// Maximum accepted scheme length in bytes.
const MAX_LEN: usize = 256;

/// The [scheme] component of a URI reference.
///
/// Schemes compare and hash case-insensitively, so `Scheme::parse("HTTP")`
/// equals `Scheme::parse("http")` while both render as written.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
#[derive(Clone, Debug)]
pub struct Scheme {
    raw: Box<str>,
    norm: NormalCell<Scheme>,
}

/// Well-known schemes and their default ports.
static DEFAULT_PORTS: &[(&str, u16)] = &[
    ("ftp", 21),
    ("http", 80),
    ("https", 443),
    ("ssh", 22),
    ("ws", 80),
    ("wss", 443),
];

impl Scheme {
    /// Parses a scheme from a string.
    ///
    /// # Errors
    ///
    /// Returns `Err` unless the string matches
    /// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
    /// and is at most 256 bytes long.
    pub fn parse(s: &str) -> Result<Self, IllegalScheme> {
        let bytes = s.as_bytes();
        match bytes.first() {
            None => return Err(IllegalScheme::with_detail(s, "empty")),
            Some(&x) if !x.is_ascii_alphabetic() => {
                return Err(IllegalScheme::with_detail(s, "must start with a letter"))
            }
            _ => {}
        }
        if bytes.len() > MAX_LEN {
            return Err(IllegalScheme::with_detail(s, "too long"));
        }
        if !bytes.iter().all(|&x| table::SCHEME.allows(x)) {
            return Err(IllegalScheme::new(s));
        }
        Ok(Scheme {
            raw: s.into(),
            norm: NormalCell::new(),
        })
    }

    /// Returns the scheme as a string slice, in its original case.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the default port registered for this scheme, if any.
    ///
    /// Known schemes are `ftp` (21), `http` (80), `https` (443),
    /// `ssh` (22), `ws` (80) and `wss` (443), matched case-insensitively.
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        DEFAULT_PORTS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&self.raw))
            .map(|&(_, port)| port)
    }

    /// Returns whether the scheme is lowercase.
    #[must_use]
    pub fn is_normal_form(&self) -> bool {
        self.norm
            .is_normal_form(|| !self.raw.bytes().any(|x| x.is_ascii_uppercase()))
    }

    /// Returns the scheme in normal form, i.e. lowercased.
    #[must_use]
    pub fn normalize(&self) -> Scheme {
        self.norm.normalize(self, || {
            if self.raw.bytes().any(|x| x.is_ascii_uppercase()) {
                Some(Scheme {
                    raw: self.raw.to_ascii_lowercase().into(),
                    norm: NormalCell::normal(),
                })
            } else {
                None
            }
        })
    }
}

impl PartialEq for Scheme {
    fn eq(&self, other: &Self) -> bool {
        self.raw.eq_ignore_ascii_case(&other.raw)
    }
}

impl Eq for Scheme {}

impl PartialEq<str> for Scheme {
    fn eq(&self, other: &str) -> bool {
        self.raw.eq_ignore_ascii_case(other)
    }
}

impl Hash for Scheme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for x in self.raw.bytes() {
            state.write_u8(x.to_ascii_lowercase());
        }
    }
}

impl PartialOrd for Scheme {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheme {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw
            .bytes()
            .map(|x| x.to_ascii_lowercase())
            .cmp(other.raw.bytes().map(|x| x.to_ascii_lowercase()))
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Scheme {
    type Err = IllegalScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scheme::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_enforces_grammar() {
        assert!(Scheme::parse("http").is_ok());
        assert!(Scheme::parse("coap+tcp").is_ok());
        assert!(Scheme::parse("x-1.2").is_ok());
        assert!(Scheme::parse("").is_err());
        assert!(Scheme::parse("1http").is_err());
        assert!(Scheme::parse("ht tp").is_err());
        assert!(Scheme::parse("http:").is_err());
        assert!(Scheme::parse(&"a".repeat(257)).is_err());
    }

    #[test]
    fn eq_ignores_case_but_render_preserves_it() {
        let upper = Scheme::parse("HTTPS").unwrap();
        let lower = Scheme::parse("https").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.as_str(), "HTTPS");
        assert_eq!(upper.normalize().as_str(), "https");
        assert!(!upper.is_normal_form());
        assert!(lower.is_normal_form());
    }

    #[test]
    fn default_ports() {
        assert_eq!(Scheme::parse("HTTP").unwrap().default_port(), Some(80));
        assert_eq!(Scheme::parse("wss").unwrap().default_port(), Some(443));
        assert_eq!(Scheme::parse("gopher").unwrap().default_port(), None);
    }
}
