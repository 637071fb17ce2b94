// src/entry.rs

//! The `Entry` triple (member, canonical score bytes, score) that lives in
//! both the member map and the order-statistics tree, plus the permissive
//! score grammar and canonicalization rule described in spec §3 and §6.

use crate::error::{Error, Result};
use bytes::Bytes;

/// A single member of a sorted set: its bytes, its score, and the canonical
/// textual form of that score returned to clients.
///
/// Shared between the member map and the order-statistics tree via `Arc`
/// (see `DESIGN.md`); never mutated in place once inserted into the tree —
/// a score update removes the old `Arc<Entry>` and builds a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub member: Bytes,
    pub score_bytes: Bytes,
    pub score: f64,
}

impl Entry {
    pub fn new(member: Bytes, score: f64) -> Self {
        Entry {
            member,
            score_bytes: format_score(score),
            score,
        }
    }
}

/// Parses a score (or ZINCRBY increment) per the permissive grammar: an
/// optional sign, digits, an optional `.` followed by digits, OR one of
/// `inf`/`+inf`/`-inf` case-insensitively. No exponents, no `nan`. NaN is
/// always rejected, whether it would come from the literal text (it can't,
/// under this grammar) or is produced upstream by arithmetic.
pub fn parse_score(raw: &[u8]) -> Result<f64> {
    let s = std::str::from_utf8(raw).map_err(|_| Error::NotAValidFloat)?;
    let trimmed = s.trim();
    let value = match trimmed.to_ascii_lowercase().as_str() {
        "inf" | "+inf" => f64::INFINITY,
        "-inf" => f64::NEG_INFINITY,
        _ => parse_decimal(trimmed)?,
    };
    if value.is_nan() {
        return Err(Error::NotAValidFloat);
    }
    Ok(value)
}

/// Hand-rolled `[+-]?digits(.digits)?` grammar; deliberately narrower than
/// `f64::from_str` so that `nan`, exponents, and `infinity` are rejected
/// rather than silently accepted.
fn parse_decimal(s: &str) -> Result<f64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return Err(Error::NotAValidFloat);
    }
    let mut i = 0;
    if bytes[i] == b'+' || bytes[i] == b'-' {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut has_digits = i > int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        has_digits = has_digits && i > frac_start || (!has_digits && i > frac_start);
    }
    if !has_digits || i != bytes.len() {
        return Err(Error::NotAValidFloat);
    }
    s.parse::<f64>().map_err(|_| Error::NotAValidFloat)
}

/// Formats a score as the canonical bytes returned to clients: the
/// shortest round-trip decimal representation with trailing zeros (and a
/// trailing decimal point) stripped, or `inf`/`-inf` for infinities. Zero
/// (either sign) always canonicalizes to `0`.
pub fn format_score(score: f64) -> Bytes {
    if score == 0.0 {
        return Bytes::from_static(b"0");
    }
    if score.is_infinite() {
        return if score > 0.0 {
            Bytes::from_static(b"inf")
        } else {
            Bytes::from_static(b"-inf")
        };
    }
    let mut buf = ryu::Buffer::new();
    let formatted = buf.format(score);
    Bytes::from(strip_trailing_zeros(formatted))
}

/// Strips trailing fractional zeros (and a now-trailing decimal point) from
/// a plain decimal string. Exponential forms (which `ryu` only emits for
/// extreme magnitudes, already in shortest form) are passed through as-is.
fn strip_trailing_zeros(s: &str) -> String {
    if s.contains(['e', 'E']) || !s.contains('.') {
        return s.to_string();
    }
    let trimmed = s.trim_end_matches('0');
    trimmed.trim_end_matches('.').to_string()
}
