//! Unit identities.
//!
//! ## Learning: Newtype Pattern
//!
//! `UnitId` wraps a `u64` so an item id can never be confused with a
//! cursor index or a line count, even though all three are integers.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of anything a world tracks: actors, items, lines, characters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UnitId(u64);

impl UnitId {
    /// Wraps a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id generator.
///
/// Clones share the same counter, so several worlds handed clones of one
/// generator never hand out the same id twice. Worlds run on one thread;
/// the counter is atomic only so a generator stays `Send` and can be
/// handed to a world living on another thread.
#[derive(Debug, Clone, Default)]
pub struct UnitIds {
    last: Arc<AtomicU64>,
}

impl UnitIds {
    /// Creates a generator whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id.
    pub fn next(&self) -> UnitId {
        UnitId(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Returns the most recently allocated id (0 before the first call).
    pub fn last(&self) -> UnitId {
        UnitId(self.last.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let ids = UnitIds::new();
        let a = ids.next();
        let b = ids.next();
        assert!(a < b);
        assert_eq!(ids.last(), b);
    }

    #[test]
    fn test_clones_share_counter() {
        let ids = UnitIds::new();
        let other = ids.clone();
        let a = ids.next();
        let b = other.next();
        assert_ne!(a, b);
        assert_eq!(ids.last(), other.last());
    }
}
