//! Construction-time configuration for the engine.
//!
//! `num_entries` (the node capacity N) fixes every bit width the engine uses:
//! node identifiers, the one-past-the-end scan offset and the result/level
//! counters. Everything else is policy for the surrounding harness.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Largest supported node capacity. The adjacency store is dense, so this
/// bounds it at 16M cells.
pub const MAX_NUM_ENTRIES: usize = 4096;

/// Default cycle bound used by the harness when none is configured.
pub const DEFAULT_MAX_CYCLES: u64 = 100_000;

/// What the engine does with a `run` event that arrives while a previous
/// query is still draining.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPolicy {
    /// Park the query and start it on the first idle cycle.
    #[default]
    Defer,
    /// Refuse the whole event with [`EngineError::QueryInFlight`].
    Reject,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub num_entries: usize,
    #[serde(default)]
    pub query_policy: QueryPolicy,
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

impl EngineConfig {
    pub fn new(num_entries: usize) -> Self {
        Self {
            num_entries,
            query_policy: QueryPolicy::default(),
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }

    pub fn with_query_policy(mut self, policy: QueryPolicy) -> Self {
        self.query_policy = policy;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.num_entries == 0 {
            return Err(EngineError::invalid_capacity("num_entries must be at least 1"));
        }
        if self.num_entries > MAX_NUM_ENTRIES {
            return Err(EngineError::invalid_capacity(format!(
                "num_entries {} exceeds maximum {MAX_NUM_ENTRIES}",
                self.num_entries
            )));
        }
        if self.max_cycles == 0 {
            return Err(EngineError::invalid_capacity("max_cycles must be positive"));
        }
        Ok(())
    }

    /// Structural capacity of the frontier queue (N²).
    pub fn queue_capacity(&self) -> usize {
        self.num_entries * self.num_entries
    }

    pub fn widths(&self) -> BitWidths {
        BitWidths::for_entries(self.num_entries)
    }
}

/// Field widths derived from the node capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BitWidths {
    /// Node identifier width, `clog2(N)`.
    pub node: u32,
    /// Scan offset width, `clog2(N + 1)`, wide enough for one past the last index.
    pub temp: u32,
    /// Level counter and result width, `clog2(N²)`.
    pub result: u32,
}

impl BitWidths {
    pub fn for_entries(num_entries: usize) -> Self {
        Self {
            node: clog2(num_entries),
            temp: clog2(num_entries + 1),
            result: clog2(num_entries * num_entries),
        }
    }

    /// Width of a packed input word: `src | dst | init | run`.
    pub fn message(&self) -> u32 {
        2 * self.node + 2
    }

    pub fn result_mask(&self) -> u64 {
        mask(self.result)
    }

    pub fn node_mask(&self) -> u64 {
        mask(self.node)
    }
}

/// Bits needed to index `n` distinct values, never less than one.
pub fn clog2(n: usize) -> u32 {
    if n <= 2 {
        1
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

pub(crate) fn mask(width: u32) -> u64 {
    if width >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}
