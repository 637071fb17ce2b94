// src/commands/zpopmax.rs

use crate::delta::Delta;
use crate::entry::Entry;
use crate::sorted_set::SortedSet;
use std::sync::Arc;

impl SortedSet {
    /// `ZPOPMAX count`: pops up to `count` highest-ranked members, highest
    /// first. `count > size` drains the set.
    pub fn zpopmax(&self, count: i64) -> Vec<Arc<Entry>> {
        let mut locked = self.lock();
        let mut result = Vec::new();
        let mut removed_members = Vec::new();
        let wanted = count.max(0) as usize;
        for _ in 0..wanted {
            let len = locked.tree.len();
            if len == 0 {
                break;
            }
            let top = locked
                .tree
                .get_by_index(len - 1)
                .expect("len > 0 implies a max element");
            let removed = locked
                .member_remove(&top.member)
                .expect("top came from the tree, must be present in the map");
            removed_members.push(removed.member.clone());
            result.push(removed);
        }
        locked.emit(Delta::Removes(removed_members));
        self.maybe_check_invariants(&locked);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::options::ZaddOptions;
    use crate::config::Config;
    use bytes::Bytes;

    #[test]
    fn pops_ties_by_higher_lex_first() {
        let set = SortedSet::new(Config::default());
        set.zadd(
            vec![
                (1.0, Bytes::from_static(b"a")),
                (2.0, Bytes::from_static(b"b")),
                (2.0, Bytes::from_static(b"c")),
            ],
            ZaddOptions::default(),
        )
        .unwrap();
        let popped = set.zpopmax(2);
        let rendered: Vec<(String, String)> = popped
            .iter()
            .map(|e| {
                (
                    String::from_utf8(e.member.to_vec()).unwrap(),
                    String::from_utf8(e.score_bytes.to_vec()).unwrap(),
                )
            })
            .collect();
        assert_eq!(
            rendered,
            vec![("c".to_string(), "2".to_string()), ("b".to_string(), "2".to_string())]
        );
        assert_eq!(set.len(), 1);
        assert_eq!(&set.zscore(b"a").unwrap()[..], b"1");
    }

    #[test]
    fn count_greater_than_size_drains_the_set() {
        let set = SortedSet::new(Config::default());
        set.zadd(
            vec![(1.0, Bytes::from_static(b"a")), (2.0, Bytes::from_static(b"b"))],
            ZaddOptions::default(),
        )
        .unwrap();
        let popped = set.zpopmax(10);
        assert_eq!(popped.len(), 2);
        assert!(set.is_empty());
        assert!(set.should_remove_from_region());
    }
}
