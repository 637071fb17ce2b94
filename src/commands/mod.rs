// src/commands/mod.rs

//! The command layer: one module per command (or closely related pair),
//! each adding an `impl SortedSet` block. Parsing of range/option syntax
//! lives in `options`, shared by every range-taking command.

pub mod apply_delta;
pub mod options;
pub mod zadd;
pub mod zcard_zscore;
pub mod zcount;
pub mod zincrby;
pub mod zpopmax;
pub mod zrange;
pub mod zrangebylex;
pub mod zrangebyscore;
pub mod zrank;
pub mod zrem;

use crate::entry::Entry;
use bytes::Bytes;
use std::sync::Arc;

/// Flattens a positional or score/lex range result into the
/// `(member, scoreBytes)` pairs a client sees, interleaving scores only
/// when requested.
pub fn format_entries(entries: &[Arc<Entry>], with_scores: bool) -> Vec<(Bytes, Option<Bytes>)> {
    entries
        .iter()
        .map(|e| {
            let score = with_scores.then(|| e.score_bytes.clone());
            (e.member.clone(), score)
        })
        .collect()
}
