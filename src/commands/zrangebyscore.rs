// src/commands/zrangebyscore.rs

use crate::commands::options::{Limit, ScoreBoundary};
use crate::entry::Entry;
use crate::sorted_set::{Locked, SortedSet};
use std::sync::Arc;

impl SortedSet {
    /// `ZRANGEBYSCORE`/`ZREVRANGEBYSCORE min max LIMIT offset count`.
    ///
    /// Forward iterates ascending from `minIndex`; reverse applies the
    /// offset to `maxIndex` instead and iterates descending from
    /// `maxIndex - 1`, per the asymmetric LIMIT semantics the two command
    /// directions require.
    pub fn zrangebyscore(
        &self,
        min: ScoreBoundary,
        max: ScoreBoundary,
        limit: Limit,
        reverse: bool,
    ) -> Vec<Arc<Entry>> {
        let locked = self.lock();
        let min_probe = Locked::score_probe(min.score(), true, min.is_exclusive());
        let max_probe = Locked::score_probe(max.score(), false, max.is_exclusive());
        let mut min_index = locked.tree.index_of(&min_probe) as i64;
        let mut max_index = locked.tree.index_of(&max_probe) as i64;
        let size = locked.tree.len() as i64;

        if !reverse {
            min_index += limit.offset;
            if min_index > max_index || min_index > size {
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
