// src/commands/options.rs

//! Parsing and option types shared across the command layer: score/lex range
//! boundaries, ZADD's flag set, and LIMIT.

use crate::entry::parse_score;
use crate::error::{Error, Result};
use bytes::Bytes;

/// One end of a `ZRANGEBYSCORE`/`ZCOUNT` range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreBoundary {
    Inclusive(f64),
    Exclusive(f64),
}

impl ScoreBoundary {
    pub fn score(self) -> f64 {
        match self {
            ScoreBoundary::Inclusive(s) | ScoreBoundary::Exclusive(s) => s,
        }
    }

    pub fn is_exclusive(self) -> bool {
        matches!(self, ScoreBoundary::Exclusive(_))
    }
}

/// Parses `"10"`, `"(10"`, `"-inf"`, `"+inf"` into a score boundary.
pub fn parse_score_boundary(s: &[u8]) -> Result<ScoreBoundary> {
    if let Some(rest) = s.strip_prefix(b"(") {
        let score = parse_score(rest)?;
        Ok(ScoreBoundary::Exclusive(score))
    } else {
        let score = parse_score(s)?;
        Ok(ScoreBoundary::Inclusive(score))
    }
}

/// One end of a `ZRANGEBYLEX` range.
#[derive(Debug, Clone, PartialEq)]
pub enum LexBoundary {
    /// `-`: below every real member.
    Min,
    /// `+`: above every real member.
    Max,
    Inclusive(Bytes),
    Exclusive(Bytes),
}

/// Parses `"-"`, `"+"`, `"[member"`, `"(member"` into a lex boundary.
pub fn parse_lex_boundary(s: &[u8]) -> Result<LexBoundary> {
    match s {
        b"-" => Ok(LexBoundary::Min),
        b"+" => Ok(LexBoundary::Max),
        _ => {
            if let Some(rest) = s.strip_prefix(b"[") {
                Ok(LexBoundary::Inclusive(Bytes::from(rest.to_vec())))
            } else if let Some(rest) = s.strip_prefix(b"(") {
                Ok(LexBoundary::Exclusive(Bytes::from(rest.to_vec())))
            } else {
                Err(Error::SyntaxError)
            }
        }
    }
}

/// `LIMIT offset count`, shared by `ZRANGEBYSCORE`/`ZRANGEBYLEX` (and their
/// reverse forms).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub offset: i64,
    pub count: i64,
}

impl Limit {
    /// No LIMIT clause given: take everything from the offset onward.
    pub fn unbounded() -> Self {
        Limit {
            offset: 0,
            count: -1,
        }
    }
}

/// `ZADD`'s existence-conditioned flags. `NX` and `XX` are mutually
/// exclusive; the parser rejects both set at once before reaching the
/// command body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZaddOptions {
    pub nx: bool,
    pub xx: bool,
    pub ch: bool,
    pub incr: bool,
}

impl ZaddOptions {
    pub fn validate(self) -> Result<()> {
        if self.nx && self.xx {
            return Err(Error::SyntaxError);
        }
        Ok(())
    }

    pub fn skip(self, member_present: bool) -> bool {
        (self.nx && member_present) || (self.xx && !member_present)
    }
}
