// tests/property/roundtrip_test.rs

//! Round-trip and idempotence laws from spec §8: `ZADD` then `ZSCORE`
//! reproduces the canonicalization of the score, a repeated `ZADD` of the
//! same score is a no-op, and `ZREM` after `ZADD` restores the prior state.

use bytes::Bytes;
use proptest::prelude::*;
use spinel_zset_core::entry::format_score;
use spinel_zset_core::{Config, SortedSet, ZaddOptions, ZaddOutcome};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn zadd_then_zscore_returns_the_canonicalization(
        member in "[a-z]{1,10}",
        score in -1_000_000f64..1_000_000f64,
    ) {
        let set = SortedSet::new(Config::default());
        set.zadd(vec![(score, Bytes::from(member.clone()))], ZaddOptions::default()).unwrap();
        let stored = set.zscore(member.as_bytes()).unwrap();
        assert_eq!(stored, format_score(score));
    }

    #[test]
    fn repeated_zadd_of_the_same_score_is_a_no_op(
        member in "[a-z]{1,10}",
        score in -1_000_000f64..1_000_000f64,
    ) {
        let set = SortedSet::new(Config::default());
        let opts = ZaddOptions { ch: true, ..Default::default() };
        let first = set.zadd(vec![(score, Bytes::from(member.clone()))], opts).unwrap();
        assert_eq!(first, ZaddOutcome::Count(1));
        let second = set.zadd(vec![(score, Bytes::from(member.clone()))], opts).unwrap();
        assert_eq!(second, ZaddOutcome::Count(0), "re-applying the same score must add and change nothing");
    }

    #[test]
    fn zrem_after_zadd_restores_the_prior_state(
        members in prop::collection::hash_map("[a-z]{1,8}", -1_000f64..1_000f64, 1..=20),
        new_member in "[a-z]{9,12}",
        new_score in -1_000f64..1_000f64,
    ) {
        let set = SortedSet::new(Config::default());
        let pairs: Vec<(f64, Bytes)> = members.iter().map(|(m, s)| (*s, Bytes::from(m.clone()))).collect();
        set.zadd(pairs, ZaddOptions::default()).unwrap();
        let before = set.zcard();

        set.zadd(vec![(new_score, Bytes::from(new_member.clone()))], ZaddOptions::default()).unwrap();
        set.zrem(&[Bytes::from(new_member.clone())]);

        assert_eq!(set.zcard(), before);
        assert!(set.zscore(new_member.as_bytes()).is_none());
        for (member, score) in &members {
            assert_eq!(set.zscore(member.as_bytes()).unwrap(), format_score(*score));
        }
    }

    #[test]
    fn deltas_replayed_onto_an_empty_replica_reproduce_the_set(
        members in prop::collection::hash_map("[a-z]{1,8}", -1_000f64..1_000f64, 1..=20),
        removed_index in 0usize..20,
    ) {
        use spinel_zset_core::{Delta, DeltaSink};
        use std::sync::{Arc, Mutex};

        struct SharedSink(Arc<Mutex<Vec<Delta>>>);
        impl DeltaSink for SharedSink {
            fn accept(&mut self, delta: Delta) {
                self.0.lock().unwrap().push(delta);
            }
        }

        let captured = Arc::new(Mutex::new(Vec::new()));
        let source = SortedSet::with_sink(Config::default(), SharedSink(captured.clone()));
        let pairs: Vec<(f64, Bytes)> = members.iter().map(|(m, s)| (*s, Bytes::from(m.clone()))).collect();
        source.zadd(pairs, ZaddOptions::default()).unwrap();

        let keys: Vec<String> = members.keys().cloned().collect();
        if !keys.is_empty() {
            let victim = &keys[removed_index % keys.len()];
            source.zrem(&[Bytes::from(victim.clone())]);
        }

        let replica = SortedSet::new(Config::default());
        for delta in captured.lock().unwrap().drain(..) {
            replica.apply_delta(delta);
        }

        assert_eq!(replica.zcard(), source.zcard());
        for (member, score) in &members {
            assert_eq!(
                replica.zscore(member.as_bytes()),
                source.zscore(member.as_bytes()),
                "replica must agree with source for member {member}"
            );
        }
    }
}
