// src/commands/zadd.rs

use crate::commands::options::ZaddOptions;
use crate::delta::Delta;
use crate::error::{Error, Result};
use crate::sorted_set::{AddOutcome, SortedSet};
use bytes::Bytes;

/// What `ZADD` returns: a plain count, or (under `INCR`) the new score bytes
/// — `None` when the single pair was skipped by `NX`/`XX`.
#[derive(Debug, Clone, PartialEq)]
pub enum ZaddOutcome {
    Count(i64),
    Incr(Option<Bytes>),
}

impl SortedSet {
    /// `ZADD pairs options`. `pairs` are `(score, member)` in argument
    /// order; under `INCR` the lone score is treated as an increment.
    pub fn zadd(&self, pairs: Vec<(f64, Bytes)>, options: ZaddOptions) -> Result<ZaddOutcome> {
        options.validate()?;

        if options.incr {
            if pairs.len() != 1 {
                return Err(Error::WrongArgumentCount("ZADD"));
            }
            let (increment, member) = pairs.into_iter().next().expect("checked len == 1");
            let mut locked = self.lock();
            let member_present = locked.members.contains(&member);
            if options.skip(member_present) {
                return Ok(ZaddOutcome::Incr(None));
            }
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
            return Ok(ZaddOutcome::Incr(Some(new_bytes)));
        }

        let mut locked = self.lock();
        let mut added = 0i64;
        let mut changed = 0i64;
        let mut applied = Vec::with_capacity(pairs.len());
        for (score, member) in pairs {
            let member_present = locked.members.contains(&member);
            if options.skip(member_present) {
                continue;
            }
            match locked.member_add(member.clone(), score) {
                AddOutcome::Added => added += 1,
                AddOutcome::Changed => changed += 1,
                AddOutcome::Unchanged => {}
            }
            let score_bytes = locked
                .members
                .get(&member)
                .expect("just inserted")
                .score_bytes
                .clone();
            applied.push((member, score_bytes));
        }
        locked.emit(Delta::Adds(applied));
        self.maybe_check_invariants(&locked);

        let count = if options.ch { added + changed } else { added };
        Ok(ZaddOutcome::Count(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn pair(score: f64, member: &str) -> (f64, Bytes) {
        (score, Bytes::from(member.to_string()))
    }

    #[test]
    fn ch_counts_changed_scores_as_well_as_additions() {
        let set = SortedSet::new(Config::default());
        let opts = ZaddOptions {
            ch: true,
            ..Default::default()
        };
        let result = set
            .zadd(vec![pair(1.0, "a"), pair(2.0, "b")], opts)
            .unwrap();
        assert_eq!(result, ZaddOutcome::Count(2));
        let result = set
            .zadd(vec![pair(1.0, "a"), pair(3.0, "b")], opts)
            .unwrap();
        assert_eq!(result, ZaddOutcome::Count(1));
        assert_eq!(&set.zscore(b"a").unwrap()[..], b"1");
        assert_eq!(&set.zscore(b"b").unwrap()[..], b"3");
    }

    #[test]
    fn nx_skips_existing_members() {
        let set = SortedSet::new(Config::default());
        set.zadd(vec![pair(1.0, "a")], ZaddOptions::default()).unwrap();
        let opts = ZaddOptions {
            nx: true,
            ..Default::default()
        };
        let result = set.zadd(vec![pair(2.0, "a"), pair(2.0, "b")], opts).unwrap();
        assert_eq!(result, ZaddOutcome::Count(1));
        assert_eq!(&set.zscore(b"a").unwrap()[..], b"1");
        assert_eq!(&set.zscore(b"b").unwrap()[..], b"2");
    }

    #[test]
    fn xx_skips_absent_members() {
        let set = SortedSet::new(Config::default());
        set.zadd(vec![pair(1.0, "a")], ZaddOptions::default()).unwrap();
        let opts = ZaddOptions {
            xx: true,
            ..Default::default()
        };
        let result = set.zadd(vec![pair(3.0, "a"), pair(3.0, "c")], opts).unwrap();
        assert_eq!(result, ZaddOutcome::Count(0));
        assert_eq!(&set.zscore(b"a").unwrap()[..], b"3");
        assert!(set.zscore(b"c").is_none());
    }

    #[test]
    fn nx_and_xx_together_is_a_syntax_error() {
        let set = SortedSet::new(Config::default());
        let opts = ZaddOptions {
            nx: true,
            xx: true,
            ..Default::default()
        };
        assert_eq!(set.zadd(vec![pair(1.0, "a")], opts).unwrap_err(), Error::SyntaxError);
    }
}
