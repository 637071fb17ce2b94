// src/commands/zrangebylex.rs

use crate::comparator::{MemberKey, ScoreKey};
use crate::commands::options::{Limit, LexBoundary};
use crate::entry::Entry;
use crate::sorted_set::{Locked, SortedSet};
use std::sync::Arc;

/// Builds the insertion-index probe for one end of a lex range, at the
/// fixed `score` every member is assumed to share (the score of index 0 —
/// see the documented open question on mixed-score sets).
fn lex_boundary_probe(score: f64, boundary: &LexBoundary, is_minimum: bool) -> ScoreKey {
    match boundary {
        LexBoundary::Min => ScoreKey::new(score, MemberKey::Least),
        LexBoundary::Max => ScoreKey::new(score, MemberKey::Greatest),
        LexBoundary::Inclusive(bytes) => Locked::lex_probe(score, bytes.clone(), is_minimum, false),
        LexBoundary::Exclusive(bytes) => Locked::lex_probe(score, bytes.clone(), is_minimum, true),
    }
}

impl SortedSet {
    /// `ZRANGEBYLEX min max LIMIT offset count`. Assumes every member
    /// shares the same score; when that precondition is violated, behavior
    /// is unspecified (it probes against the score of the first entry, as
    /// the lineage this is drawn from always has).
    pub fn zrangebylex(&self, min: LexBoundary, max: LexBoundary, limit: Limit, reverse: bool) -> Vec<Arc<Entry>> {
        let locked = self.lock();
        let size = locked.tree.len();
        if size == 0 {
            return Vec::new();
        }
        let score = locked.tree.get_by_index(0).expect("size > 0").score;
        let min_probe = lex_boundary_probe(score, &min, true);
        let max_probe = lex_boundary_probe(score, &max, false);
        let mut min_index = locked.tree.index_of(&min_probe) as i64;
        let mut max_index = locked.tree.index_of(&max_probe) as i64;
        let total = size as i64;

        if !reverse {
            min_index += limit.offset;
            if min_index > max_index || min_index > total {
                return Vec::new();
            }
        } else {
            max_index -= limit.offset;
            if max_index < 0 {
                return Vec::new();
            }
        }

        let remaining = max_index - min_index;
        if remaining <= 0 {
            return Vec::new();
        }
        let take = if limit.count < 0 {
            remaining
        } else {
            limit.count.min(remaining)
        };
        if take <= 0 {
            return Vec::new();
        }

        if !reverse {
            locked.tree.range_by_index(min_index as usize, take as usize, false)
        } else {
            locked
                .tree
                .range_by_index((max_index - 1) as usize, take as usize, true)
        }
    }
}
