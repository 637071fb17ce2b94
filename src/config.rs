// src/config.rs

//! Configuration for a standalone sorted-set core: the few knobs a core
//! with no server, no scheduler, and no cluster layer of its own actually
//! has. Follows the `#[serde(default = ...)]` + manual `Default` idiom the
//! rest of this lineage uses for every config section.

use serde::{Deserialize, Serialize};

fn default_check_invariants() -> bool {
    cfg!(debug_assertions)
}

fn default_member_map_capacity_hint() -> usize {
    16
}

/// Runtime knobs for a `SortedSet`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// Whether to run the O(n) invariant sweep (member map ↔ tree agreement,
    /// sortedness, no-NaN) after every mutating command. Defaults to on in
    /// debug builds, off in release — the sweep is too expensive to pay in
    /// production on every ZADD.
    #[serde(default = "default_check_invariants")]
    pub check_invariants: bool,

    /// Initial capacity hint for a new set's member map.
    #[serde(default = "default_member_map_capacity_hint")]
    pub member_map_capacity_hint: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            check_invariants: default_check_invariants(),
            member_map_capacity_hint: default_member_map_capacity_hint(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file, falling back to defaults for
    /// any field the file omits.
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let raw = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;
        raw.try_deserialize()
    }
}
