// src/sorted_set.rs

//! `SortedSet`: the self-contained, lock-guarded union of the member map and
//! the order-statistics tree, plus the single mutator function every
//! score-changing command funnels through.

use crate::comparator::{MemberKey, ScoreKey};
use crate::config::Config;
use crate::delta::{Delta, DeltaSink, NullSink};
use crate::entry::Entry;
use crate::member_map::MemberMap;
use crate::tree::ScoreSet;
use bytes::Bytes;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::error;

/// What happened to a member as a result of `member_add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AddOutcome {
    /// The member was absent and is now present.
    Added,
    /// The member was present and its canonical score bytes changed.
    Changed,
    /// The member was present and re-inserted, but its canonical score
    /// bytes are unchanged (e.g. ZADD re-applying the same score).
    Unchanged,
}

/// The mutable state behind the per-instance lock: the two indexes plus the
/// delta sink they report through. Grouped together because the spec
/// requires the sink to be invoked synchronously, inside the same lock that
/// guards the indexes.
pub(crate) struct Locked {
    pub(crate) members: MemberMap,
    pub(crate) tree: ScoreSet,
    sink: Box<dyn DeltaSink + Send>,
}

impl Locked {
    /// Creates the entry for `member` if absent, or removes-mutates-reinserts
    /// it if present — the one place a score is ever attached to a member,
    /// per the data model's "must be removed from the tree, mutated, and
    /// re-inserted" lifecycle rule.
    pub(crate) fn member_add(&mut self, member: Bytes, score: f64) -> AddOutcome {
        match self.members.get(&member).cloned() {
            None => {
                let entry = Arc::new(Entry::new(member.clone(), score));
                self.tree.insert(entry.clone());
                self.members.insert(member, entry);
                AddOutcome::Added
            }
            Some(old) => {
                let new_entry = Arc::new(Entry::new(member.clone(), score));
                self.tree.remove(old.score, &member);
                self.tree.insert(new_entry.clone());
                let changed = old.score_bytes != new_entry.score_bytes;
                self.members.insert(member, new_entry);
                if changed {
                    AddOutcome::Changed
                } else {
                    AddOutcome::Unchanged
                }
            }
        }
    }

    /// Removes `member` if present, returning its old entry.
    pub(crate) fn member_remove(&mut self, member: &[u8]) -> Option<Arc<Entry>> {
        let removed = self.members.remove(member)?;
        self.tree.remove(removed.score, &removed.member);
        Some(removed)
    }

    pub(crate) fn emit(&mut self, delta: Delta) {
        if !delta.is_empty() {
            self.sink.accept(delta);
        }
    }

    /// Builds the insertion-index probe for a score boundary, per §4.1's
    /// endpoint encoding.
    pub(crate) fn score_probe(score: f64, is_minimum: bool, is_exclusive: bool) -> ScoreKey {
        ScoreKey::new(score, crate::comparator::score_boundary_member(is_minimum, is_exclusive))
    }

    /// Builds the insertion-index probe for a lex boundary at a fixed score
    /// (the score of index 0, per the documented open question).
    pub(crate) fn lex_probe(score: f64, bytes: Bytes, is_minimum: bool, is_exclusive: bool) -> ScoreKey {
        ScoreKey::new(
            score,
            MemberKey::LexProbe {
                bytes,
                is_minimum,
                is_exclusive,
            },
        )
    }

    fn check_invariants(&self) {
        let members_len = self.members.len();
        let tree_len = self.tree.len();
        if members_len != tree_len {
            error!(members_len, tree_len, "member map and tree size disagree");
            panic!("invariant violation: member map and tree size disagree");
        }
        let in_order = self.tree.in_order();
        for w in in_order.windows(2) {
            if crate::comparator::compare_entries(
                &ScoreKey::new(w[0].score, MemberKey::Bytes(w[0].member.clone())),
                &ScoreKey::new(w[1].score, MemberKey::Bytes(w[1].member.clone())),
            ) != std::cmp::Ordering::Less
            {
                error!("tree is not strictly ordered under the comparator");
                panic!("invariant violation: tree is not strictly ordered");
            }
        }
        for entry in &in_order {
            if entry.score.is_nan() {
                error!("entry carries a NaN score");
                panic!("invariant violation: entry carries a NaN score");
            }
            if self.members.get(&entry.member).map(Arc::as_ptr) != Some(Arc::as_ptr(entry)) {
                error!("tree entry not reachable from the member map by identity");
                panic!("invariant violation: member map and tree disagree on an entry");
            }
        }
    }
}

/// A single Redis-compatible sorted set: a dual-indexed, lock-guarded
/// member→score structure supporting O(log n) rank and range operations.
///
/// Every method — reads included — takes the internal lock for its
/// duration, per the concurrency model's "read commands hold the per-key
/// lock too." Concurrent access to two different `SortedSet` instances
/// needs no coordination.
pub struct SortedSet {
    locked: Mutex<Locked>,
    config: Config,
}

impl SortedSet {
    pub fn new(config: Config) -> Self {
        SortedSet::with_sink(config, NullSink)
    }

    pub fn with_sink(config: Config, sink: impl DeltaSink + Send + 'static) -> Self {
        SortedSet {
            locked: Mutex::new(Locked {
                members: MemberMap::with_capacity(config.member_map_capacity_hint),
                tree: ScoreSet::new(),
                sink: Box::new(sink),
            }),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.locked.lock().members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locked.lock().members.is_empty()
    }

    /// True once the structure is empty after a mutating call; callers
    /// (the external storage layer) are expected to poll it after ZREM and
    /// ZPOPMAX and delete the key if it answers true.
    pub fn should_remove_from_region(&self) -> bool {
        self.locked.lock().members.is_empty()
    }

    /// The member map's heap-size footprint, per §4.3's `MemberMap`
    /// contract: per-entry overhead plus member-byte length plus score
    /// storage, summed over every member currently in the set.
    pub fn memory_usage(&self) -> usize {
        self.locked.lock().members.memory_usage()
    }

    pub(crate) fn lock(&self) -> parking_lot::MutexGuard<'_, Locked> {
        self.locked.lock()
    }

    /// Serializes the set to the wire format described in `src/serialize.rs`.
    /// Takes the same lock every mutator does, so it is mutually exclusive
    /// with concurrent mutation.
    pub fn to_bytes(&self) -> Bytes {
        let locked = self.locked.lock();
        crate::serialize::serialize(&locked.members)
    }

    /// Reconstructs a `SortedSet` from bytes produced by [`Self::to_bytes`].
    /// The restored set reports no delta sink; attach one with
    /// [`Self::with_sink`] if replication needs to resume from here.
    pub fn from_bytes(data: Bytes, config: Config) -> std::io::Result<Self> {
        let (members, tree) = crate::serialize::deserialize(data)?;
        Ok(SortedSet {
            locked: Mutex::new(Locked {
                members,
                tree,
                sink: Box::new(NullSink),
            }),
            config,
        })
    }

    /// Runs the invariant sweep if `Config::check_invariants` is enabled.
    /// Call this after any mutating command, inside the same lock
    /// acquisition, before releasing it.
    pub(crate) fn maybe_check_invariants(&self, locked: &Locked) {
        if self.config.check_invariants {
            locked.check_invariants();
        }
    }
}
