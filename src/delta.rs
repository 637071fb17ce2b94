// src/delta.rs

//! The replication interface: a delta record emitted after every mutating
//! command, and the sink trait an embedding cluster framework implements to
//! ship those deltas to replicas.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// An incremental change to a sorted set, handed to a `DeltaSink` after each
/// mutating command that actually changed something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Delta {
    /// Ordered (member, canonical score bytes) pairs that were added or had
    /// their score updated, in application order.
    Adds(Vec<(Bytes, Bytes)>),
    /// Members that were removed.
    Removes(Vec<Bytes>),
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        match self {
            Delta::Adds(pairs) => pairs.is_empty(),
            Delta::Removes(members) => members.is_empty(),
        }
    }
}

/// External collaborator that accepts deltas and replicates them. The core
/// calls it synchronously, inside the per-key lock, once per mutating
/// command that produced a non-empty delta.
pub trait DeltaSink {
    fn accept(&mut self, delta: Delta);
}

/// A `DeltaSink` that drops every delta, for callers that don't replicate.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DeltaSink for NullSink {
    fn accept(&mut self, _delta: Delta) {}
}

/// A `DeltaSink` that accumulates every delta it receives, in order — used
/// by tests to assert on exactly what a command emitted, and a convenient
/// building block for an embedder's own replica-feeding logic.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub deltas: Vec<Delta>,
}

impl DeltaSink for RecordingSink {
    fn accept(&mut self, delta: Delta) {
        self.deltas.push(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_preserves_order() {
        let mut sink = RecordingSink::default();
        sink.accept(Delta::Adds(vec![(Bytes::from_static(b"a"), Bytes::from_static(b"1"))]));
        sink.accept(Delta::Removes(vec![Bytes::from_static(b"a")]));
        assert_eq!(sink.deltas.len(), 2);
        assert!(matches!(sink.deltas[0], Delta::Adds(_)));
        assert!(matches!(sink.deltas[1], Delta::Removes(_)));
    }
}
