//! Byte pattern tables from RFC 3986.
//!
//! A [`Table`] is the "safe set" of a percent-encoding context: the bytes
//! that may appear unencoded in that context. The same type doubles as a
//! "leave encoded" set, naming decoded bytes that must stay
//! percent-encoded because decoding them would move a delimiter (for
//! example `%2F` inside a path must not become `/`).
//!
//! The predefined constants are documented with the ABNF notation of
//! [RFC 2234](https://datatracker.ietf.org/doc/html/rfc2234/).

const fn gen_hex_table() -> [u8; 512] {
    const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    let mut i = 0;
    let mut out = [0; 512];
    while i < 256 {
        out[i * 2] = HEX_DIGITS[i >> 4];
        out[i * 2 + 1] = HEX_DIGITS[i & 0b1111];
        i += 1;
    }
    out
}

const HEX_TABLE: &[u8; 512] = &gen_hex_table();

/// A table determining the bytes allowed unencoded in a string.
#[derive(Clone, Copy, Debug)]
pub struct Table {
    arr: [bool; 256],
    allows_pct_encoded: bool,
}

impl Table {
    /// Generates a table that only allows the given unencoded bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes equals `b'%'`.
    pub const fn gen(mut bytes: &[u8]) -> Table {
        let mut arr = [false; 256];
        while let [cur, rem @ ..] = bytes {
            assert!(*cur != b'%', "cannot allow unencoded %");
            arr[*cur as usize] = true;
            bytes = rem;
        }
        Table {
            arr,
            allows_pct_encoded: false,
        }
    }

    /// An empty table, allowing nothing.
    pub const EMPTY: &'static Table = &Table::gen(b"");

    /// Marks this table as allowing percent-encoded octets.
    pub const fn enc(mut self) -> Table {
        self.allows_pct_encoded = true;
        self
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the bytes allowed either by
    /// `self` or by `other`.
    pub const fn or(mut self, other: &Table) -> Table {
        let mut i = 0;
        while i < 256 {
            self.arr[i] |= other.arr[i];
            i += 1;
        }
        self.allows_pct_encoded |= other.allows_pct_encoded;
        self
    }

    /// Subtracts from this table.
    ///
    /// Returns a new table that allows all the bytes allowed by `self`
    /// but not allowed by `other`.
    pub const fn sub(mut self, other: &Table) -> Table {
        let mut i = 0;
        while i < 256 {
            if other.arr[i] {
                self.arr[i] = false;
            }
            i += 1;
        }
        if other.allows_pct_encoded {
            self.allows_pct_encoded = false;
        }
        self
    }

    /// Returns `true` if the given unencoded byte is allowed by the table.
    #[inline]
    pub const fn allows(&self, x: u8) -> bool {
        self.arr[x as usize]
    }

    /// Returns `true` if percent-encoded octets are allowed by the table.
    #[inline]
    pub const fn allows_pct_encoded(&self) -> bool {
        self.allows_pct_encoded
    }

    /// Validates the given byte sequence with the table.
    ///
    /// Percent-encoded octets are accepted if the table allows them, and
    /// must then consist of two hexadecimal digits.
    pub(crate) const fn validate(&self, s: &[u8]) -> bool {
        let mut i = 0;
        while i < s.len() {
            let x = s[i];
            if x == b'%' && self.allows_pct_encoded() {
                if i + 2 >= s.len() {
                    return false;
                }
                if !(HEXDIG.allows(s[i + 1]) && HEXDIG.allows(s[i + 2])) {
                    return false;
                }
                i += 3;
            } else {
                if !self.allows(x) {
                    return false;
                }
                i += 1;
            }
        }
        true
    }
}

/// Pushes a byte onto `buf` as an uppercase percent-encoded octet.
pub(crate) fn push_pct_encoded(buf: &mut String, x: u8) {
    buf.push('%');
    buf.push(HEX_TABLE[x as usize * 2] as char);
    buf.push(HEX_TABLE[x as usize * 2 + 1] as char);
}

/// Decodes a hexadecimal digit, returning `None` for other bytes.
pub(crate) const fn hex_digit(x: u8) -> Option<u8> {
    match x {
        b'0'..=b'9' => Some(x - b'0'),
        b'A'..=b'F' => Some(x - b'A' + 10),
        b'a'..=b'f' => Some(x - b'a' + 10),
        _ => None,
    }
}

const fn gen(bytes: &[u8]) -> Table {
    Table::gen(bytes)
}

/// ALPHA = A-Z / a-z
pub const ALPHA: &Table = &gen(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// DIGIT = 0-9
pub const DIGIT: &Table = &gen(b"0123456789");

/// HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"
///                / "a" / "b" / "c" / "d" / "e" / "f"
pub const HEXDIG: &Table = &DIGIT.or(&gen(b"ABCDEFabcdef"));

/// sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///            / "*" / "+" / "," / ";" / "="
pub const SUB_DELIMS: &Table = &gen(b"!$&'()*+,;=");

/// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
pub const UNRESERVED: &Table = &ALPHA.or(DIGIT).or(&gen(b"-._~"));

/// pchar = unreserved / pct-encoded / sub-delims / ":" / "@"
pub const PCHAR: &Table = &UNRESERVED.or(SUB_DELIMS).or(&gen(b":@")).enc();

/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
pub const SCHEME: &Table = &ALPHA.or(DIGIT).or(&gen(b"+-."));

/// userinfo = *( unreserved / pct-encoded / sub-delims / ":" )
pub const USERINFO: &Table = &UNRESERVED.or(SUB_DELIMS).or(&gen(b":")).enc();

/// The username part of userinfo: userinfo without ":".
pub const USERNAME: &Table = &USERINFO.sub(&gen(b":")).enc();

/// IPvFuture = "v" 1\*HEXDIG "." 1\*( unreserved / sub-delims / ":" )
pub const IPV_FUTURE: &Table = &UNRESERVED.or(SUB_DELIMS).or(&gen(b":"));

/// reg-name = *( unreserved / pct-encoded / sub-delims )
pub const REG_NAME: &Table = &UNRESERVED.or(SUB_DELIMS).enc();

/// path = *( pchar / "/" )
pub const PATH: &Table = &PCHAR.or(&gen(b"/"));

/// query = *( pchar / "/" / "?" )
pub const QUERY: &Table = &PCHAR.or(&gen(b"/?"));

/// fragment = *( pchar / "/" / "?" )
pub const FRAGMENT: &Table = QUERY;

/// Leave-encoded set for a whole path: a decoded `/` would move a
/// segment boundary.
pub const PATH_DELIMS: &Table = &gen(b"/");

/// Leave-encoded set for a query: decoded `&`, `=` or `+` would change
/// the entry structure.
pub const QUERY_DELIMS: &Table = &gen(b"&=+");

/// Safe set for query keys and values produced from raw text: query
/// characters minus the entry delimiters.
pub const QUERY_PARAM: &Table = &QUERY.sub(QUERY_DELIMS).enc();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_algebra() {
        assert!(PCHAR.allows(b':'));
        assert!(PCHAR.allows(b'@'));
        assert!(!PCHAR.allows(b'/'));
        assert!(PATH.allows(b'/'));
        assert!(!USERNAME.allows(b':'));
        assert!(USERINFO.allows(b':'));
        assert!(!QUERY_PARAM.allows(b'&'));
        assert!(!QUERY_PARAM.allows(b'='));
        assert!(!QUERY_PARAM.allows(b'+'));
        assert!(QUERY_PARAM.allows(b'a'));
    }

    #[test]
    fn validate_pct_encoded() {
        assert!(QUERY.validate(b"a=%C3%A9"));
        assert!(!QUERY.validate(b"a=%C3%"));
        assert!(!QUERY.validate(b"a=%GG"));
        assert!(!SCHEME.validate(b"a%41"));
    }
}
