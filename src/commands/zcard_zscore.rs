// src/commands/zcard_zscore.rs

use crate::sorted_set::SortedSet;
use bytes::Bytes;

impl SortedSet {
    /// `ZCARD`: the number of members.
    pub fn zcard(&self) -> i64 {
        self.len() as i64
    }

    /// `ZSCORE member`: the member's canonical score bytes, or `None` if
    /// absent (the spec's nil sentinel).
    pub fn zscore(&self, member: &[u8]) -> Option<Bytes> {
        self.lock().members.get(member).map(|e| e.score_bytes.clone())
    }
}
