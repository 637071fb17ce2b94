// src/member_map.rs

//! The member map: a content-hashed index from member bytes to the live
//! entry, shared with the order-statistics tree via `Arc`.

use crate::entry::Entry;
use bytes::Bytes;
use indexmap::IndexMap;
use std::sync::Arc;

/// Fixed per-entry bookkeeping overhead counted by `memory_usage`, on top of
/// the member bytes and the `f64` score — mirrors the flat overhead the
/// teacher's `SortedSet::memory_usage` adds per key.
const ENTRY_OVERHEAD_BYTES: usize = std::mem::size_of::<Arc<Entry>>();

/// Hash map from member bytes to the shared `Entry`, by content hash and
/// equality (`IndexMap`'s `Bytes` key already gives this, plus a stable
/// iteration order that makes serialization deterministic for a given
/// mutation history).
#[derive(Default)]
pub struct MemberMap {
    inner: IndexMap<Bytes, Arc<Entry>>,
}

impl MemberMap {
    pub fn new() -> Self {
        MemberMap {
            inner: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MemberMap {
            inner: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, member: &[u8]) -> Option<&Arc<Entry>> {
        self.inner.get(member)
    }

    pub fn contains(&self, member: &[u8]) -> bool {
        self.inner.contains_key(member)
    }

    /// Inserts or replaces the entry for `member`, returning the previous
    /// entry if any.
    pub fn insert(&mut self, member: Bytes, entry: Arc<Entry>) -> Option<Arc<Entry>> {
        self.inner.insert(member, entry)
    }

    /// Removes and returns the entry for `member`, if present. Uses
    /// `shift_remove` so iteration order stays deterministic for the
    /// entries that remain, at the cost of an O(n) shift — acceptable here
    /// since the member map is not on the rank/range hot path (the tree is).
    pub fn remove(&mut self, member: &[u8]) -> Option<Arc<Entry>> {
        self.inner.shift_remove(member)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Bytes, &Arc<Entry>)> {
        self.inner.iter()
    }

    /// True once every member carries the same score, the precondition
    /// `ZRANGEBYLEX` silently assumes.
    pub fn scores_are_all_equal(&self) -> bool {
        let mut scores = self.inner.values().map(|e| e.score);
        let Some(first) = scores.next() else {
            return true;
        };
        scores.all(|s| s == first)
    }

    /// Sum of member-byte lengths, the constant per-entry score overhead,
    /// and the fixed shared-pointer bookkeeping overhead.
    pub fn memory_usage(&self) -> usize {
        let f64_size = std::mem::size_of::<f64>();
        self.inner
            .keys()
            .map(|member| member.len() + f64_size + ENTRY_OVERHEAD_BYTES)
            .sum()
    }
}
