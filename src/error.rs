// src/error.rs

//! The error taxonomy for the sorted-set core.
//!
//! Input-format and semantic errors are returned to the caller and never
//! mutate the set. Internal invariant violations are not represented here:
//! they are programmer errors and `panic!` instead, since there is no
//! sensible repair once the member map and the order-statistics tree have
//! disagreed about what the set contains.

use thiserror::Error;

/// All recoverable failures a sorted-set command can raise.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A score (or ZINCRBY increment) did not match the permissive float
    /// grammar (integer, decimal, or `[+-]inf`, case-insensitive).
    #[error("value is not a valid float")]
    NotAValidFloat,

    /// `ZINCRBY` produced a NaN (e.g. adding `+inf` and `-inf`). The set is
    /// left unchanged.
    #[error("resulting score is not a number (NaN)")]
    OperationProducedNaN,

    /// A range/option string did not parse (bad score boundary, bad lex
    /// boundary, unknown ZADD flag, conflicting flag combination, ...).
    #[error("syntax error")]
    SyntaxError,

    /// A command variant requires an exact argument shape it didn't get
    /// (e.g. `INCR` with more than one score/member pair).
    #[error("wrong number of arguments for '{0}' command")]
    WrongArgumentCount(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
