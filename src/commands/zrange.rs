// src/commands/zrange.rs

use crate::entry::Entry;
use crate::sorted_set::SortedSet;
use std::sync::Arc;

impl SortedSet {
    /// `ZRANGE`/`ZREVRANGE min max` — index-based, with Redis's negative
    /// index wraparound. `min`/`max` are inclusive on both ends.
    pub fn zrange(&self, min: i64, max: i64, reverse: bool) -> Vec<Arc<Entry>> {
        let locked = self.lock();
        let size = locked.tree.len() as i64;
        if size == 0 {
            return Vec::new();
        }
        let start = if min < 0 { min + size } else { min }.max(0);
        let end = (if max < 0 { max + size } else { max }.max(-1)).min(size - 1);
        if start >= size {
            return Vec::new();
        }
        let range_size = end - start + 1;
        if range_size <= 0 {
            return Vec::new();
        }
        let range_size = range_size as usize;
        if !reverse {
            locked.tree.range_by_index(start as usize, range_size, false)
        } else {
            let ascending_start = (size - 1 - start) as usize;
            locked.tree.range_by_index(ascending_start, range_size, true)
        }
    }
}
