//! Request-generation counter for discarding stale responses.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stamp carried by one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic counter shared by everything that issues catalog requests for
/// one view. Only the most recently issued generation is current.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    latest: Arc<AtomicU64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new generation, superseding every earlier one.
    pub fn next(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn latest(&self) -> Generation {
        Generation(self.latest.load(Ordering::Acquire))
    }

    /// Returns true if no newer generation has been issued since `generation`.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest() == generation
    }
}
