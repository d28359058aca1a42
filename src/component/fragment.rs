use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use crate::encoding::{self, table, Table};
use crate::error::IllegalFragment;
use crate::norm::NormalCell;

/// The [fragment] component of a URI reference, without the leading `#`.
///
/// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
#[derive(Clone, Debug)]
pub struct Fragment {
    raw: Box<str>,
    norm: NormalCell<Fragment>,
}

impl Fragment {
    /// Parses a fragment from a string. The empty string is allowed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string contains a character outside
    /// `*( pchar / "/" / "?" )`.
    pub fn parse(s: &str) -> Result<Self, IllegalFragment> {
        if !table::FRAGMENT.validate(s.as_bytes()) {
            return Err(IllegalFragment::new(s));
        }
        Ok(Fragment {
            raw: s.into(),
            norm: NormalCell::new(),
        })
    }

    /// Builds a fragment from un-encoded text, percent-encoding as needed.
    #[must_use]
    pub fn encode(raw: &str) -> Fragment {
        Fragment {
            raw: encoding::encode(raw, table::FRAGMENT).into(),
            norm: NormalCell::normal(),
        }
    }

    /// Returns the fragment as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the fragment with its percent-encoding decoded.
    #[must_use]
    pub fn decode(&self) -> String {
        encoding::decode(&self.raw)
    }

    /// Returns whether the percent-encoding of the fragment is normal.
    #[must_use]
    pub fn is_normal_form(&self) -> bool {
        self.norm
            .is_normal_form(|| encoding::is_normal_form(&self.raw, table::FRAGMENT, Table::EMPTY))
    }

    /// Returns the fragment with its percent-encoding normalized.
    #[must_use]
    pub fn normalize(&self) -> Fragment {
        self.norm.normalize(self, || {
            let normalized = encoding::normalize(&self.raw, table::FRAGMENT, Table::EMPTY);
            if *normalized == *self.raw {
                None
            } else {
                Some(Fragment {
                    raw: normalized.into(),
                    norm: NormalCell::normal(),
                })
            }
        })
    }
}

impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Fragment {}

impl Hash for Fragment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Fragment {
    type Err = IllegalFragment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fragment::parse(s)
    }
}
