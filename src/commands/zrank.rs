// src/commands/zrank.rs

use crate::comparator::{MemberKey, ScoreKey};
use crate::sorted_set::SortedSet;

impl SortedSet {
    /// `ZRANK member`: ascending rank, or `None` if the member is absent —
    /// the idiomatic stand-in for the spec's nil sentinel (callers wire
    /// this to whatever "absent" looks like at their boundary).
    pub fn zrank(&self, member: &[u8]) -> Option<i64> {
        let locked = self.lock();
        let entry = locked.members.get(member)?;
        let key = ScoreKey::new(entry.score, MemberKey::Bytes(entry.member.clone()));
        Some(locked.tree.index_of(&key) as i64)
    }

    /// `ZREVRANK member`: descending rank, or `None` if absent.
    pub fn zrevrank(&self, member: &[u8]) -> Option<i64> {
        let locked = self.lock();
        let entry = locked.members.get(member)?;
        let key = ScoreKey::new(entry.score, MemberKey::Bytes(entry.member.clone()));
        let rank = locked.tree.index_of(&key) as i64;
        Some(locked.tree.len() as i64 - 1 - rank)
    }
}
