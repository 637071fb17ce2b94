// src/lib.rs

//! A standalone Redis-compatible sorted set core: dual-indexed storage
//! (member map + order-statistics tree), the comparator and boundary
//! sentinels that back its range queries, and the full ZSET command
//! surface, extracted for use outside a full key-value server.
//!
//! Wire protocol parsing, connection lifecycle, per-key lock scheduling,
//! cluster membership, and persistence storage are all external
//! collaborators — see the crate's design notes for the assumed contract.

pub mod commands;
pub mod comparator;
pub mod config;
pub mod delta;
pub mod entry;
pub mod error;
pub mod member_map;
pub mod serialize;
pub mod sorted_set;
pub mod tree;

pub use commands::options::{Limit, LexBoundary, ScoreBoundary, ZaddOptions};
pub use commands::zadd::ZaddOutcome;
pub use config::Config;
pub use delta::{Delta, DeltaSink, NullSink, RecordingSink};
pub use entry::Entry;
pub use error::{Error, Result};
pub use sorted_set::SortedSet;
