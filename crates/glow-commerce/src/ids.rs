//! Product identifiers.
//!
//! Ids are derived from the creation time in milliseconds, so ordering by id
//! approximates ordering by creation time. The generator never hands out the
//! same id twice: when two records are created within the same millisecond
//! the second one gets the next integer instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Identifier of a product record within its category list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw integer.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Monotonic, timestamp-derived id source.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id: the current Unix time in milliseconds, bumped past the
    /// previously issued id if the clock has not advanced.
    pub fn next_id(&self) -> ProductId {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    fn next_at(&self, now_ms: i64) -> ProductId {
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now_ms.max(last + 1);
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return ProductId(candidate),
                Err(actual) => last = actual,
            }
        }
    }

    /// Make sure future ids sort after `id` (used after loading stored data).
    pub fn observe(&self, id: ProductId) {
        self.last.fetch_max(id.0, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_millisecond_does_not_collide() {
        let ids = IdGenerator::new();
        let a = ids.next_at(1_700_000_000_000);
        let b = ids.next_at(1_700_000_000_000);
        assert_eq!(a.get(), 1_700_000_000_000);
        assert_eq!(b.get(), 1_700_000_000_001);
    }

    #[test]
    fn test_clock_going_backwards_stays_monotonic() {
        let ids = IdGenerator::new();
        let a = ids.next_at(2_000);
        let b = ids.next_at(1_000);
        assert!(b > a);
    }

    #[test]
    fn test_observe_bumps_floor() {
        let ids = IdGenerator::new();
        ids.observe(ProductId::new(5_000));
        assert_eq!(ids.next_at(10).get(), 5_001);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&ProductId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
