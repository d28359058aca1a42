use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use crate::error::IllegalPort;
use crate::norm::NormalCell;

/// The [port] subcomponent of an authority, always non-empty.
///
/// Ports compare and hash by numeric value, so `Port::parse("080")`
/// equals `Port::parse("80")` while rendering as written. An empty port
/// (`"http://example.com:"`) is represented at the authority level, not
/// here.
///
/// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
#[derive(Clone, Debug)]
pub struct Port {
    raw: Box<str>,
    value: u64,
    norm: NormalCell<Port>,
}

impl Port {
    /// Parses a port from a string of decimal digits.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is empty, contains a non-digit, or
    /// exceeds `u64::MAX`.
    pub fn parse(s: &str) -> Result<Self, IllegalPort> {
        if s.is_empty() {
            return Err(IllegalPort::with_detail(s, "empty"));
        }
        if !s.bytes().all(|x| x.is_ascii_digit()) {
            return Err(IllegalPort::new(s));
        }
        let value = s
            .parse::<u64>()
            .map_err(|_| IllegalPort::with_detail(s, "out of range"))?;
        Ok(Port {
            raw: s.into(),
            value,
            norm: NormalCell::new(),
        })
    }

    /// Creates a port from a number.
    #[must_use]
    pub fn from_number(value: u16) -> Port {
        Port {
            raw: value.to_string().into(),
            value: u64::from(value),
            norm: NormalCell::normal(),
        }
    }

    /// Returns the port as written, leading zeros included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the numeric value of the port.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.value
    }

    /// Returns whether the port has no leading zeros.
    #[must_use]
    pub fn is_normal_form(&self) -> bool {
        self.norm
            .is_normal_form(|| self.raw.len() == 1 || !self.raw.starts_with('0'))
    }

    /// Returns the port with leading zeros removed.
    ///
    /// An all-zeros port normalizes to `"0"`.
    #[must_use]
    pub fn normalize(&self) -> Port {
        self.norm.normalize(self, || {
            let canonical = self.value.to_string();
            if *canonical == *self.raw {
                None
            } else {
                Some(Port {
                    raw: canonical.into(),
                    value: self.value,
                    norm: NormalCell::normal(),
                })
            }
        })
    }
}

impl PartialEq for Port {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Port {}

impl Hash for Port {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for Port {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Port {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Port {
    type Err = IllegalPort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Port::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_digits_only() {
        assert_eq!(Port::parse("8080").unwrap().number(), 8080);
        assert!(Port::parse("").is_err());
        assert!(Port::parse("80a").is_err());
        assert!(Port::parse("-1").is_err());
        assert!(Port::parse("18446744073709551616").is_err());
    }

    #[test]
    fn eq_is_numeric() {
        let padded = Port::parse("080").unwrap();
        assert_eq!(padded, Port::parse("80").unwrap());
        assert_eq!(padded.as_str(), "080");
        assert!(!padded.is_normal_form());
        assert_eq!(padded.normalize().as_str(), "80");
    }

    #[test]
    fn zeros_normalize_to_single_zero() {
        assert_eq!(Port::parse("0000").unwrap().normalize().as_str(), "0");
        assert!(Port::parse("0").unwrap().is_normal_form());
    }
}
