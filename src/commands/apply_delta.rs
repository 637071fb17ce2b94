// src/commands/apply_delta.rs

use crate::delta::Delta;
use crate::entry::parse_score;
use crate::sorted_set::SortedSet;
use tracing::error;

impl SortedSet {
    /// Applies a delta received from replication: adds are unconditional
    /// (no NX/XX, no CH accounting) and removes are plain `memberRemove`.
    /// Never emits a further delta — that would echo the change back to
    /// whatever replicated it here.
    pub fn apply_delta(&self, delta: Delta) {
        let mut locked = self.lock();
        match delta {
            Delta::Adds(pairs) => {
                for (member, score_bytes) in pairs {
                    let score = match parse_score(&score_bytes) {
                        Ok(score) => score,
                        Err(_) => {
                            error!(?member, "delta carried an unparsable score, skipping member");
                            continue;
                        }
                    };
                    locked.member_add(member, score);
                }
            }
            Delta::Removes(members) => {
                for member in members {
                    locked.member_remove(&member);
                }
            }
        }
        self.maybe_check_invariants(&locked);
    }
}
