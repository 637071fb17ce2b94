// src/comparator.rs

//! Total order on (score, member) plus the boundary-sentinel and lex-probe
//! machinery that lets every range endpoint be located with a single
//! `index_of` call against the order-statistics tree.

use bytes::Bytes;
use std::cmp::Ordering;

/// A member identity as seen by the comparator: a real member's bytes, one
/// of the two boundary sentinels, or a short-lived lex-range probe.
///
/// Sentinels are a dedicated enum tag rather than a sigil byte string, so
/// there is no risk of a user-supplied member colliding with one by value —
/// the distinction the teacher's object-identity sentinels gave for free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKey {
    /// Compares less than every real member.
    Least,
    /// Compares greater than every real member.
    Greatest,
    /// A real member's bytes.
    Bytes(Bytes),
    /// A lex-range boundary probe: carries the byte-equal member it
    /// straddles plus which side of the range it marks.
    LexProbe {
        bytes: Bytes,
        is_minimum: bool,
        is_exclusive: bool,
    },
}

impl MemberKey {
    fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            MemberKey::Bytes(b) => Some(b),
            MemberKey::LexProbe { bytes, .. } => Some(bytes),
            MemberKey::Least | MemberKey::Greatest => None,
        }
    }
}

/// A (score, member) pair: what the order-statistics tree actually
/// compares, whether backed by a live `Entry` or a throwaway probe.
#[derive(Debug, Clone)]
pub struct ScoreKey {
    pub score: f64,
    pub member: MemberKey,
}

impl ScoreKey {
    pub fn new(score: f64, member: MemberKey) -> Self {
        ScoreKey { score, member }
    }
}

/// Compares two (score, member) keys: first by score, then by member.
///
/// Panics if both members are the same sentinel — comparing LEAST against
/// LEAST (or GREATEST against GREATEST) can only happen if the tree or a
/// caller mis-built a probe, which is an internal invariant violation.
pub fn compare_entries(a: &ScoreKey, b: &ScoreKey) -> Ordering {
    if a.score != b.score {
        return a
            .score
            .partial_cmp(&b.score)
            .unwrap_or_else(|| panic!("comparator saw a NaN score: {} vs {}", a.score, b.score));
    }
    compare_members(&a.member, &b.member)
}

/// Compares two member keys per the sentinel/lex-probe rules.
pub fn compare_members(a: &MemberKey, b: &MemberKey) -> Ordering {
    if matches!(
        (a, b),
        (MemberKey::Least, MemberKey::Least) | (MemberKey::Greatest, MemberKey::Greatest)
    ) {
        panic!("comparator asked to compare a sentinel against itself: {a:?} vs {b:?}");
    }
    if matches!(a, MemberKey::Least) || matches!(b, MemberKey::Greatest) {
        return Ordering::Less;
    }
    if matches!(b, MemberKey::Least) || matches!(a, MemberKey::Greatest) {
        return Ordering::Greater;
    }

    let ab = a.as_bytes().expect("non-sentinel member key must carry bytes");
    let bb = b.as_bytes().expect("non-sentinel member key must carry bytes");
    match ab.cmp(bb) {
        Ordering::Equal => lex_probe_tiebreak(a, b),
        other => other,
    }
}

/// Breaks a tie between byte-equal members when one (or both) sides is a
/// lex-range probe straddling that exact member.
fn lex_probe_tiebreak(a: &MemberKey, b: &MemberKey) -> Ordering {
    match (a, b) {
        (
            MemberKey::LexProbe {
                is_minimum,
                is_exclusive,
                ..
            },
            MemberKey::Bytes(_),
        ) => {
            if is_minimum ^ is_exclusive {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (
            MemberKey::Bytes(_),
            MemberKey::LexProbe {
                is_minimum,
                is_exclusive,
                ..
            },
        ) => {
            if is_minimum ^ is_exclusive {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        _ => Ordering::Equal,
    }
}

/// Builds the member key for a score-range boundary: LEAST for an
/// inclusive-min/exclusive-max endpoint, GREATEST otherwise.
pub fn score_boundary_member(is_minimum: bool, is_exclusive: bool) -> MemberKey {
    if is_exclusive ^ is_minimum {
        MemberKey::Least
    } else {
        MemberKey::Greatest
    }
}
