use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;
use std::sync::OnceLock;

use crate::encoding::{self, table};
use crate::error::IllegalQuery;
use crate::norm::NormalCell;

/// The [query] component of a URI reference.
///
/// Besides its literal form, a query exposes an ordered list of
/// `key[=value]` entries in the `application/x-www-form-urlencoded`
/// style: entries are separated by `&`, and `+` decodes to a space
/// inside them. The entry list is computed lazily, once.
///
/// [query]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
#[derive(Clone, Debug)]
pub struct Query {
    raw: Box<str>,
    entries: OnceLock<Vec<(String, Option<String>)>>,
    norm: NormalCell<Query>,
}

impl Query {
    /// Parses a query from a string. The empty string is allowed and has
    /// no entries.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string contains a character outside
    /// `*( pchar / "/" / "?" )`.
    pub fn parse(s: &str) -> Result<Self, IllegalQuery> {
        if !table::QUERY.validate(s.as_bytes()) {
            return Err(IllegalQuery::new(s));
        }
        Ok(Query {
            raw: s.into(),
            entries: OnceLock::new(),
            norm: NormalCell::new(),
        })
    }

    /// Assembles a query from decoded entries.
    ///
    /// Keys and values are percent-encoded as needed; a space encodes as
    /// `%20`, never as `+`.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, Option<V>)>) -> Query
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = String::new();
        for (key, value) in entries {
            if !raw.is_empty() {
                raw.push('&');
            }
            raw.push_str(&encoding::encode(key.as_ref(), table::QUERY_PARAM));
            if let Some(value) = value {
                raw.push('=');
                raw.push_str(&encoding::encode(value.as_ref(), table::QUERY_PARAM));
            }
        }
        Query {
            raw: raw.into(),
            entries: OnceLock::new(),
            norm: NormalCell::new(),
        }
    }

    /// Returns the query as written, without the leading `?`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the decoded entries, in order of appearance.
    ///
    /// A key without `=` has a `None` value; a key with a trailing `=`
    /// has an empty one. Empty chunks between separators are skipped.
    #[must_use]
    pub fn entries(&self) -> &[(String, Option<String>)] {
        self.entries.get_or_init(|| {
            self.raw
                .split('&')
                .filter(|chunk| !chunk.is_empty())
                .map(|chunk| match chunk.split_once('=') {
                    Some((key, value)) => (
                        encoding::decode_form(key),
                        Some(encoding::decode_form(value)),
                    ),
                    None => (encoding::decode_form(chunk), None),
                })
                .collect()
        })
    }

    /// Returns the first value for `key`, comparing decoded keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    /// Returns whether the percent-encoding of the query is normal.
    ///
    /// Encoded separators (`%26`, `%3D`, `%2B`) are never decoded, so
    /// they do not make a query abnormal.
    #[must_use]
    pub fn is_normal_form(&self) -> bool {
        self.norm.is_normal_form(|| {
            encoding::is_normal_form(&self.raw, table::QUERY, table::QUERY_DELIMS)
        })
    }

    /// Returns the query with its percent-encoding normalized.
    #[must_use]
    pub fn normalize(&self) -> Query {
        self.norm.normalize(self, || {
            let normalized = encoding::normalize(&self.raw, table::QUERY, table::QUERY_DELIMS);
            if *normalized == *self.raw {
                None
            } else {
                Some(Query {
                    raw: normalized.into(),
                    entries: OnceLock::new(),
                    norm: NormalCell::normal(),
                })
            }
        })
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Query {}

impl Hash for Query {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Query {
    type Err = IllegalQuery;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Query::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_decode_in_order() {
        let query = Query::parse("a=1&b&c=&a=2").unwrap();
        assert_eq!(
            query.entries(),
            [
                ("a".to_owned(), Some("1".to_owned())),
                ("b".to_owned(), None),
                ("c".to_owned(), Some(String::new())),
                ("a".to_owned(), Some("2".to_owned())),
            ]
        );
        assert_eq!(query.get("a"), Some(Some("1")));
        assert_eq!(query.get("b"), Some(None));
        assert_eq!(query.get("missing"), None);
    }

    #[test]
    fn plus_decodes_to_space_in_entries_only() {
        let query = Query::parse("full+name=Ada+L&x=a%2Bb").unwrap();
        assert_eq!(query.as_str(), "full+name=Ada+L&x=a%2Bb");
        assert_eq!(query.get("full name"), Some(Some("Ada L")));
        assert_eq!(query.get("x"), Some(Some("a+b")));
    }

    #[test]
    fn empty_query_has_no_entries() {
        assert!(Query::parse("").unwrap().entries().is_empty());
        assert!(Query::parse("&&").unwrap().entries().is_empty());
    }

    #[test]
    fn from_entries_encodes_spaces_as_pct() {
        let query = Query::from_entries([("full name", Some("Ada L")), ("q", None)]);
        assert_eq!(query.as_str(), "full%20name=Ada%20L&q");

        let separators = Query::from_entries([("a&b", Some("c=d+e"))]);
        assert_eq!(separators.as_str(), "a%26b=c%3Dd%2Be");
        assert_eq!(separators.get("a&b"), Some(Some("c=d+e")));
    }

    #[test]
    fn normalize_keeps_encoded_separators() {
        let query = Query::parse("%61=%31&x=%2B").unwrap();
        assert!(!query.is_normal_form());
        assert_eq!(query.normalize().as_str(), "a=1&x=%2B");
        assert!(Query::parse("a=1&x=%2B").unwrap().is_normal_form());
    }
}
