// src/commands/zcount.rs

use crate::commands::options::ScoreBoundary;
use crate::sorted_set::{Locked, SortedSet};

impl SortedSet {
    /// `ZCOUNT min max`: the number of members with scores inside the range.
    pub fn zcount(&self, min: ScoreBoundary, max: ScoreBoundary) -> i64 {
        let locked = self.lock();
        let min_probe = Locked::score_probe(min.score(), true, min.is_exclusive());
        let max_probe = Locked::score_probe(max.score(), false, max.is_exclusive());
        let min_index = locked.tree.index_of(&min_probe) as i64;
        let max_index = locked.tree.index_of(&max_probe) as i64;
        (max_index - min_index).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::options::ZaddOptions;
    use crate::config::Config;
    use bytes::Bytes;

    #[test]
    fn counts_inclusive_range() {
        let set = SortedSet::new(Config::default());
        set.zadd(
            vec![
                (1.0, Bytes::from_static(b"a")),
                (2.0, Bytes::from_static(b"b")),
                (3.0, Bytes::from_static(b"c")),
            ],
            ZaddOptions::default(),
        )
        .unwrap();
        assert_eq!(
            set.zcount(ScoreBoundary::Inclusive(1.0), ScoreBoundary::Inclusive(3.0)),
            3
        );
        assert_eq!(
            set.zcount(ScoreBoundary::Exclusive(1.0), ScoreBoundary::Exclusive(3.0)),
            1
        );
    }

    #[test]
    fn empty_exclusive_range_on_equal_endpoints() {
        let set = SortedSet::new(Config::default());
        set.zadd(vec![(5.0, Bytes::from_static(b"a"))], ZaddOptions::default())
            .unwrap();
        assert_eq!(
            set.zcount(ScoreBoundary::Exclusive(5.0), ScoreBoundary::Exclusive(5.0)),
            0
        );
    }
}
