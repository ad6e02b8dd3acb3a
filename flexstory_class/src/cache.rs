// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-directive sparse storage for class inputs.
//!
//! [`InputCache`] keeps the most recent value of every class input a template
//! has bound, keyed by [`InputKey`]. Entries are stored in a sorted `SmallVec`
//! and found by binary search: an element rarely binds more than a handful of
//! responsive inputs, so the common case never touches the heap.
//!
//! The cache does not merge or interpret values. Choosing which entry is
//! effective is the job of [`resolve`](crate::resolve()).

use flexstory_media::BreakpointId;
use smallvec::SmallVec;

use crate::value::ClassValue;

const INLINE_CAPACITY: usize = 4;

/// Identifies one class input of a directive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputKey {
    /// The structured, non-responsive input (`ngClass`).
    Base,
    /// The raw `class` attribute.
    RawFallback,
    /// An input qualified by a breakpoint (`ngClass.md`, `class.gt-sm`, ...).
    Breakpoint(BreakpointId),
}

/// Sparse map from [`InputKey`] to the last [`ClassValue`] assigned to it.
///
/// # Example
///
/// ```rust
/// use flexstory_class::{ClassValue, InputCache, InputKey};
///
/// let mut cache = InputCache::new();
/// assert!(cache.set(InputKey::Base, "c1".into()).is_none());
///
/// let previous = cache.set(InputKey::Base, "c2".into());
/// assert_eq!(previous, Some(ClassValue::from("c1")));
/// assert_eq!(cache.get(InputKey::Base), Some(&ClassValue::from("c2")));
/// assert!(!cache.contains(InputKey::RawFallback));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputCache {
    entries: SmallVec<[(InputKey, ClassValue); INLINE_CAPACITY]>,
}

impl InputCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn find(&self, key: InputKey) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&key, |(k, _)| *k)
    }

    /// Stores `value` for `key`, returning the value it replaced.
    pub fn set(&mut self, key: InputKey, value: ClassValue) -> Option<ClassValue> {
        match self.find(key) {
            Ok(idx) => Some(core::mem::replace(&mut self.entries[idx].1, value)),
            Err(idx) => {
                self.entries.insert(idx, (key, value));
                None
            }
        }
    }

    /// Removes the entry for `key`, returning its value.
    pub fn remove(&mut self, key: InputKey) -> Option<ClassValue> {
        let idx = self.find(key).ok()?;
        Some(self.entries.remove(idx).1)
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: InputKey) -> Option<&ClassValue> {
        self.find(key).ok().map(|idx| &self.entries[idx].1)
    }

    /// Returns `true` if `key` has a value.
    #[must_use]
    #[inline]
    pub fn contains(&self, key: InputKey) -> bool {
        self.find(key).is_ok()
    }

    /// Returns the number of stored inputs.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no input has been stored.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the stored keys in order: `Base`, `RawFallback`, then
    /// breakpoints by id.
    pub fn keys(&self) -> impl Iterator<Item = InputKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const MD: InputKey = InputKey::Breakpoint(BreakpointId::new(4));
    const XS: InputKey = InputKey::Breakpoint(BreakpointId::new(0));

    #[test]
    fn set_overwrites_without_merging() {
        let mut cache = InputCache::new();
        assert!(cache.set(MD, "a b".into()).is_none());
        assert_eq!(cache.set(MD, "c".into()), Some("a b".into()));
        assert_eq!(cache.get(MD), Some(&"c".into()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_are_sorted() {
        let mut cache = InputCache::new();
        cache.set(MD, "md".into());
        cache.set(InputKey::RawFallback, "raw".into());
        cache.set(XS, "xs".into());
        cache.set(InputKey::Base, "base".into());
        assert_eq!(
            cache.keys().collect::<Vec<_>>(),
            [InputKey::Base, InputKey::RawFallback, XS, MD]
        );
    }

    #[test]
    fn remove_and_clear() {
        let mut cache = InputCache::new();
        cache.set(InputKey::Base, "base".into());
        cache.set(XS, "xs".into());

        assert_eq!(cache.remove(XS), Some("xs".into()));
        assert_eq!(cache.remove(XS), None);
        assert!(!cache.contains(XS));
        assert!(cache.contains(InputKey::Base));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(InputKey::Base), None);
    }

    #[test]
    fn spills_past_inline_capacity() {
        let mut cache = InputCache::new();
        for i in (0..12_u16).rev() {
            cache.set(InputKey::Breakpoint(BreakpointId::new(i)), "x".into());
        }
        assert_eq!(cache.len(), 12);
        assert!(cache.keys().is_sorted());
    }
}
