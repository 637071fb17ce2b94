// tests/property/serialization_test.rs

//! Serialize-then-deserialize reproduces an equal set (spec §8): same
//! member set, same score per member, for arbitrary random sets.

use bytes::Bytes;
use proptest::prelude::*;
use spinel_zset_core::{Config, SortedSet, ZaddOptions};
use std::collections::HashMap;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 40,
        max_shrink_iters: 300,
        ..ProptestConfig::default()
    })]

    #[test]
    fn serialize_then_deserialize_reproduces_an_equal_set(
        members in prop::collection::hash_map("[a-z]{1,10}", -1_000_000f64..1_000_000f64, 0..=60),
    ) {
        let set = SortedSet::new(Config::default());
        let pairs: Vec<(f64, Bytes)> = members.iter().map(|(m, s)| (*s, Bytes::from(m.clone()))).collect();
        if !pairs.is_empty() {
            set.zadd(pairs, ZaddOptions::default()).unwrap();
        }

        let bytes = set.to_bytes();
        let restored = SortedSet::from_bytes(bytes, Config::default()).unwrap();

        assert_eq!(restored.zcard(), set.zcard());
        assert_eq!(restored.zcard() as usize, members.len());

        let restored_scores: HashMap<String, f64> = members
            .keys()
            .map(|m| {
                let score = restored
                    .zscore(m.as_bytes())
                    .unwrap_or_else(|| panic!("member {m} missing after deserialize"));
                (m.clone(), std::str::from_utf8(&score).unwrap().parse().unwrap())
            })
            .collect();
        for (member, score) in &members {
            assert_eq!(restored_scores[member], *score, "score for {member} must round-trip");
        }
    }

    #[test]
    fn round_trip_preserves_rank_order(
        members in prop::collection::hash_map("[a-z]{1,10}", -1_000f64..1_000f64, 1..=40),
    ) {
        let set = SortedSet::new(Config::default());
        let pairs: Vec<(f64, Bytes)> = members.iter().map(|(m, s)| (*s, Bytes::from(m.clone()))).collect();
        set.zadd(pairs, ZaddOptions::default()).unwrap();

        let bytes = set.to_bytes();
        let restored = SortedSet::from_bytes(bytes, Config::default()).unwrap();

        let original_order: Vec<Bytes> = set.zrange(0, -1, false).iter().map(|e| e.member.clone()).collect();
        let restored_order: Vec<Bytes> = restored.zrange(0, -1, false).iter().map(|e| e.member.clone()).collect();
        assert_eq!(original_order, restored_order, "rank order must survive a round trip");
    }
}
