//! Flyweight cache for short, frequently repeated strings.
//!
//! Tag and attribute names repeat heavily across a document (`div`, `class`,
//! `href`, ...). The cache hands out shared `Arc<str>` instances for them so
//! that a page with ten thousand `<div class=..>` tags holds two name strings,
//! not twenty thousand.
//!
//! The table is direct-mapped: each string hashes to exactly one slot. A
//! slot holding a different string is simply overwritten, so a collision
//! costs one allocation and never yields a wrong string.

use std::sync::Arc;

/// Strings longer than this (in bytes) bypass the cache.
pub const MAX_CACHED_LEN: usize = 12;

/// Default number of slots used by [`StringCache::default`].
pub const DEFAULT_SLOTS: usize = 512;

/// Upper bound on the slot count; larger requests are clamped to it.
pub const MAX_SLOTS: usize = 1 << 16;

/// A fixed-size open-addressed string table keyed by a rolling hash.
#[derive(Debug, Clone)]
pub struct StringCache {
    slots: Vec<Option<Arc<str>>>,
}

impl StringCache {
    /// Create a cache with `slots` entries, rounded up to a power of two
    /// and clamped to [`MAX_SLOTS`]. A slot count of zero yields a disabled
    /// cache.
    #[must_use]
    pub fn new(slots: usize) -> Self {
        if slots == 0 {
            return Self::disabled();
        }
        let slots = slots
            .checked_next_power_of_two()
            .map_or(MAX_SLOTS, |n| n.min(MAX_SLOTS));
        Self {
            slots: vec![None; slots],
        }
    }

    /// A cache that never stores anything; every lookup allocates.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { slots: Vec::new() }
    }

    /// Returns true if lookups may be served from the table.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Number of slots in the table.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Return a shared string equal to `s`, reusing a cached instance when
    /// the slot for `s` already holds the same text.
    pub fn get(&mut self, s: &str) -> Arc<str> {
        if self.slots.is_empty() || s.is_empty() || s.len() > MAX_CACHED_LEN {
            return Arc::from(s);
        }

        let index = (rolling_hash(s) as usize) & (self.slots.len() - 1);
        if let Some(cached) = &self.slots[index]
            && **cached == *s
        {
            return Arc::clone(cached);
        }

        // Empty slot or a collision: the fresh string takes the slot over.
        let fresh: Arc<str> = Arc::from(s);
        self.slots[index] = Some(Arc::clone(&fresh));
        fresh
    }
}

impl Default for StringCache {
    fn default() -> Self {
        Self::new(DEFAULT_SLOTS)
    }
}

/// `h = 31 * h + c` over the string's code points.
fn rolling_hash(s: &str) -> u32 {
    s.chars()
        .fold(0u32, |hash, c| hash.wrapping_mul(31).wrapping_add(c as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_string_shares_allocation() {
        let mut cache = StringCache::new(16);
        let a = cache.get("div");
        let b = cache.get("div");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_collision_returns_correct_string() {
        // A single slot forces every distinct string to collide.
        let mut cache = StringCache::new(1);
        let div = cache.get("div");
        let span = cache.get("span");
        assert_eq!(&*div, "div");
        assert_eq!(&*span, "span");

        // "div" was evicted by "span"; the result is still correct.
        let again = cache.get("div");
        assert_eq!(&*again, "div");
        assert!(!Arc::ptr_eq(&div, &again));
    }

    #[test]
    fn test_long_strings_bypass_cache() {
        let mut cache = StringCache::new(16);
        let a = cache.get("averyveryverylongname");
        let b = cache.get("averyveryverylongname");
        assert_eq!(a, b);
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_disabled_cache() {
        let mut cache = StringCache::new(0);
        assert!(!cache.is_enabled());
        let a = cache.get("p");
        let b = cache.get("p");
        assert_eq!(&*a, "p");
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_slots_round_to_power_of_two() {
        assert_eq!(StringCache::new(100).capacity(), 128);
        assert_eq!(StringCache::default().capacity(), DEFAULT_SLOTS);
    }

    #[test]
    fn test_huge_slot_counts_are_clamped() {
        assert_eq!(StringCache::new(usize::MAX).capacity(), MAX_SLOTS);
        assert_eq!(StringCache::new(usize::MAX / 2 + 2).capacity(), MAX_SLOTS);
        assert_eq!(StringCache::new(MAX_SLOTS + 1).capacity(), MAX_SLOTS);
        let mut cache = StringCache::new(usize::MAX);
        assert_eq!(&*cache.get("div"), "div");
    }
}
