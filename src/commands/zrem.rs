// src/commands/zrem.rs

use crate::delta::Delta;
use crate::sorted_set::SortedSet;
use bytes::Bytes;

impl SortedSet {
    /// `ZREM members`. Returns the number of members actually removed.
    pub fn zrem(&self, members: &[Bytes]) -> i64 {
        let mut locked = self.lock();
        let mut removed = Vec::new();
        for member in members {
            if locked.member_remove(member).is_some() {
                removed.push(member.clone());
            }
        }
        let count = removed.len() as i64;
        locked.emit(Delta::Removes(removed));
        self.maybe_check_invariants(&locked);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::options::ZaddOptions;
    use crate::config::Config;

    #[test]
    fn removes_only_present_members() {
        let set = SortedSet::new(Config::default());
        set.zadd(
            vec![(1.0, Bytes::from_static(b"a")), (2.0, Bytes::from_static(b"b"))],
            ZaddOptions::default(),
        )
        .unwrap();
        let removed = set.zrem(&[Bytes::from_static(b"a"), Bytes::from_static(b"missing")]);
        assert_eq!(removed, 1);
        assert_eq!(set.len(), 1);
        assert!(set.zscore(b"a").is_none());
    }
}
