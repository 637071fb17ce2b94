// src/commands/zincrby.rs

use crate::delta::Delta;
use crate::entry::parse_score;
use crate::error::{Error, Result};
use crate::sorted_set::SortedSet;
use bytes::Bytes;

impl SortedSet {
    /// `ZINCRBY increment member`. Returns the new score's canonical bytes.
    pub fn zincrby(&self, increment: &[u8], member: Bytes) -> Result<Bytes> {
        let increment = parse_score(increment)?;
        let mut locked = self.lock();
        let old_score = locked.members.get(&member).map(|e| e.score).unwrap_or(0.0);
        let new_score = old_score + increment;
        if new_score.is_nan() {
            return Err(Error::OperationProducedNaN);
        }
        locked.member_add(member.clone(), new_score);
        let new_bytes = locked
            .members
            .get(&member)
            .expect("just inserted")
            .score_bytes
            .clone();
        locked.emit(Delta::Adds(vec![(member, new_bytes.clone())]));
        self.maybe_check_invariants(&locked);
        Ok(new_bytes)
    }
}
