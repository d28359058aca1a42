//! The percent-encoding codec.
//!
//! All operations take a "safe set" [`Table`] describing the bytes that may
//! appear unencoded in the surrounding grammar production, and — for
//! normalization — a "leave encoded" table of decoded bytes that must stay
//! percent-encoded because decoding them would move a delimiter.
//!
//! Multi-byte UTF-8 sequences spanning several `%XX` octets are grouped by
//! inspecting the lead byte's high bits, so a multi-byte code point is
//! never split mid-sequence.

pub mod table;

pub use table::Table;

use table::{hex_digit, push_pct_encoded};

/// Percent-encodes `raw` against the given safe set.
///
/// Characters in the safe set are emitted literally; any other character is
/// UTF-8 encoded and each byte emitted as an uppercase `%XX` octet.
///
/// # Examples
///
/// ```
/// use uri_shapes::encoding::{encode, table};
///
/// assert_eq!(encode("a b", table::PCHAR), "a%20b");
/// assert_eq!(encode("café", table::PCHAR), "caf%C3%A9");
/// ```
pub fn encode(raw: &str, safe: &Table) -> String {
    let mut out = String::with_capacity(raw.len());
    for &x in raw.as_bytes() {
        if x.is_ascii() && safe.allows(x) {
            out.push(x as char);
        } else {
            push_pct_encoded(&mut out, x);
        }
    }
    out
}

/// Percent-decodes `text`.
///
/// Maximal runs of `%XX` octets are decoded together as UTF-8; invalid
/// sequences decode to U+FFFD. Literal characters pass through unchanged,
/// as does any `%` not followed by two hexadecimal digits.
///
/// # Examples
///
/// ```
/// use uri_shapes::encoding::decode;
///
/// assert_eq!(decode("a%20b"), "a b");
/// assert_eq!(decode("caf%C3%A9"), "café");
/// ```
pub fn decode(text: &str) -> String {
    decode_inner(text, false)
}

/// Decodes like [`decode`], additionally mapping `+` to a space.
///
/// This is the query-entry exception; paths and fragments keep `+`
/// literal.
pub(crate) fn decode_form(text: &str) -> String {
    decode_inner(text, true)
}

fn decode_inner(text: &str, plus_as_space: bool) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut run = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if let Some(x) = pct_octet(bytes, i) {
            run.push(x);
            i += 3;
            continue;
        }
        if !run.is_empty() {
            out.push_str(&String::from_utf8_lossy(&run));
            run.clear();
        }
        let x = bytes[i];
        if plus_as_space && x == b'+' {
            out.push(' ');
            i += 1;
        } else {
            let rest = &text[i..];
            let ch = rest.chars().next().unwrap();
            out.push(ch);
            i += ch.len_utf8();
        }
    }
    if !run.is_empty() {
        out.push_str(&String::from_utf8_lossy(&run));
    }
    out
}

/// Rewrites `text` into the normal form of its percent-encoding context.
///
/// Every `%XX` octet that decodes to a safe character outside the
/// leave-encoded set is replaced with the literal character; every other
/// octet keeps its encoding with uppercase hexadecimal digits; every
/// literal character outside the safe set is percent-encoded. Multi-byte
/// UTF-8 sequences are consumed as a unit and always stay encoded.
pub fn normalize(text: &str, safe: &Table, leave_encoded: &Table) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < bytes.len() {
        if let Some(x) = pct_octet(bytes, i) {
            i += consume_encoded(bytes, i, x, safe, leave_encoded, &mut out);
        } else {
            let rest = &text[i..];
            let ch = rest.chars().next().unwrap();
            if ch.is_ascii() && safe.allows(ch as u8) {
                out.push(ch);
            } else {
                let mut buf = [0u8; 4];
                for &x in ch.encode_utf8(&mut buf).as_bytes() {
                    push_pct_encoded(&mut out, x);
                }
            }
            i += ch.len_utf8();
        }
    }
    out
}

/// Returns `true` iff [`normalize`] would leave `text` unchanged.
pub fn is_normal_form(text: &str, safe: &Table, leave_encoded: &Table) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if let Some(x) = pct_octet(bytes, i) {
            if !bytes[i + 1].is_ascii_uppercase() && !bytes[i + 1].is_ascii_digit() {
                return false;
            }
            if !bytes[i + 2].is_ascii_uppercase() && !bytes[i + 2].is_ascii_digit() {
                return false;
            }
            if x.is_ascii() && safe.allows(x) && !leave_encoded.allows(x) {
                return false;
            }
            // Non-ASCII octets stay encoded whether or not they group into
            // a well-formed sequence, so triples can be checked one by one.
            i += 3;
        } else {
            let x = bytes[i];
            if !x.is_ascii() || !safe.allows(x) {
                return false;
            }
            i += 1;
        }
    }
    true
}

/// Reads the `%XX` octet starting at `i`, if the next three bytes form one.
fn pct_octet(bytes: &[u8], i: usize) -> Option<u8> {
    if bytes.len() < i + 3 || bytes[i] != b'%' {
        return None;
    }
    let hi = hex_digit(bytes[i + 1])?;
    let lo = hex_digit(bytes[i + 2])?;
    Some((hi << 4) | lo)
}

/// Expected width of a UTF-8 sequence from its lead byte's high bits.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Handles one encoded octet (or the multi-byte group it leads) starting
/// at `i`, writing the normalized form to `out`.
///
/// Returns the number of input bytes consumed.
fn consume_encoded(
    bytes: &[u8],
    i: usize,
    lead: u8,
    safe: &Table,
    leave_encoded: &Table,
    out: &mut String,
) -> usize {
    if lead.is_ascii() {
        if safe.allows(lead) && !leave_encoded.allows(lead) {
            out.push(lead as char);
        } else {
            push_pct_encoded(out, lead);
        }
        return 3;
    }

    // A multi-byte sequence: group the continuation octets with the lead
    // so the code point is never split. Non-ASCII always stays encoded.
    let mut group = vec![lead];
    if let Some(width) = utf8_width(lead) {
        while group.len() < width {
            match pct_octet(bytes, i + group.len() * 3) {
                Some(x) if x & 0xC0 == 0x80 => group.push(x),
                _ => break,
            }
        }
        if group.len() < width || std::str::from_utf8(&group).is_err() {
            // Malformed sequence; re-encode only the lead octet.
            group.truncate(1);
        }
    }
    for &x in &group {
        push_pct_encoded(out, x);
    }
    group.len() * 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        for s in ["", "abc", "a b c", "café/au lait", "100%", "snow\u{2603}man"] {
            let encoded = encode(s, table::PCHAR);
            assert_eq!(decode(&encoded), s, "round trip of {s:?}");
            assert!(is_normal_form(&encoded, table::PCHAR, Table::EMPTY));
        }
    }

    #[test]
    fn decode_groups_maximal_runs() {
        // Two triples forming one two-byte code point.
        assert_eq!(decode("%C3%A9"), "é");
        // A lone continuation octet is invalid UTF-8.
        assert_eq!(decode("%A9"), "\u{FFFD}");
        // Literal characters intermixed with runs pass through.
        assert_eq!(decode("x%C3%A9y%20z"), "xéy z");
    }

    #[test]
    fn plus_stays_literal_outside_queries() {
        assert_eq!(decode("a+b"), "a+b");
        assert_eq!(decode_inner("a+b", true), "a b");
    }

    #[test]
    fn normalize_decodes_safe_octets() {
        assert_eq!(normalize("%61%2F", table::PCHAR, Table::EMPTY), "a%2F");
        assert_eq!(normalize("%61%2f", table::PATH, table::PATH_DELIMS), "a%2F");
        assert_eq!(normalize("%61%2f", table::PATH, Table::EMPTY), "a/");
    }

    #[test]
    fn normalize_uppercases_hex() {
        assert_eq!(normalize("%c3%a9", table::PCHAR, Table::EMPTY), "%C3%A9");
        assert!(!is_normal_form("%c3%a9", table::PCHAR, Table::EMPTY));
        assert!(is_normal_form("%C3%A9", table::PCHAR, Table::EMPTY));
    }

    #[test]
    fn normalize_encodes_unsafe_literals() {
        assert_eq!(normalize("a b", table::PCHAR, Table::EMPTY), "a%20b");
        assert_eq!(normalize("café", table::PCHAR, Table::EMPTY), "caf%C3%A9");
    }

    #[test]
    fn malformed_multibyte_stays_encoded() {
        // Lead octet without its continuation.
        assert_eq!(normalize("%C3%41", table::PCHAR, Table::EMPTY), "%C3A");
        assert_eq!(normalize("%C3", table::PCHAR, Table::EMPTY), "%C3");
    }

    #[test]
    fn is_normal_form_matches_normalize() {
        for s in ["%2f", "%2F", "a", "a b", "%61", "%C3%A9", "caf%c3%a9"] {
            let normal = normalize(s, table::QUERY, table::QUERY_DELIMS) == s;
            assert_eq!(
                is_normal_form(s, table::QUERY, table::QUERY_DELIMS),
                normal,
                "{s:?}"
            );
        }
    }
}
