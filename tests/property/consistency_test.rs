// tests/property/consistency_test.rs

//! Random `ZADD`/`ZREM` sequences checked against the five universal
//! invariants from spec §8: member map and tree agree on membership, the
//! tree stays sorted under the comparator, `index_of(get(i)) == i`, no
//! entry ever carries a NaN score, and both indexes agree on size.

use bytes::Bytes;
use proptest::prelude::*;
use spinel_zset_core::{Config, SortedSet, ZaddOptions};
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Op {
    Add(String, f64),
    Remove(String),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let member = "[a-z]{1,6}";
    prop_oneof![
        (member.clone(), -1_000_000f64..1_000_000f64).prop_map(|(m, s)| Op::Add(m, s)),
        member.prop_map(Op::Remove),
    ]
}

fn assert_invariants(set: &SortedSet, shadow: &HashMap<String, f64>) {
    assert_eq!(set.zcard() as usize, shadow.len(), "size must agree with the shadow model");

    let all = set.zrange(0, -1, false);
    assert_eq!(all.len(), shadow.len(), "member map and tree size must agree");

    for window in all.windows(2) {
        let ordered = (window[0].score, &window[0].member) <= (window[1].score, &window[1].member);
        assert!(ordered, "tree must stay sorted by (score, member)");
    }

    for entry in &all {
        assert!(!entry.score.is_nan(), "no entry may ever carry a NaN score");
        let member_str = std::str::from_utf8(&entry.member).unwrap();
        let expected = shadow.get(member_str).expect("tree member must exist in the shadow model");
        assert_eq!(entry.score, *expected, "tree score must match the shadow model");
    }

    for (i, entry) in all.iter().enumerate() {
        let rank = set.zrank(&entry.member).expect("member just listed must be rankable");
        assert_eq!(rank as usize, i, "index_of(get(i)) must equal i");
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 80,
        max_shrink_iters: 500,
        ..ProptestConfig::default()
    })]

    #[test]
    fn invariants_hold_after_every_mutation(ops in prop::collection::vec(op_strategy(), 1..=200)) {
        let set = SortedSet::new(Config::default());
        let mut shadow: HashMap<String, f64> = HashMap::new();

        for op in ops {
            match op {
                Op::Add(member, score) => {
                    set.zadd(vec![(score, Bytes::from(member.clone()))], ZaddOptions::default()).unwrap();
                    shadow.insert(member, score);
                }
                Op::Remove(member) => {
                    set.zrem(&[Bytes::from(member.clone())]);
                    shadow.remove(&member);
                }
            }
            assert_invariants(&set, &shadow);
        }
    }
}
