// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint identification.

use core::fmt;

/// A runtime breakpoint identifier.
///
/// This is a lightweight handle (u16) that uniquely identifies a breakpoint
/// within a [`BreakpointRegistry`](crate::BreakpointRegistry). Identifiers are
/// handed out in registration order and are never reused.
///
/// # Example
///
/// ```rust
/// use flexstory_media::BreakpointId;
///
/// let id = BreakpointId::new(3);
/// assert_eq!(id.index(), 3);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BreakpointId(u16);

impl BreakpointId {
    /// Creates a new breakpoint ID from the given index.
    ///
    /// This is typically called by
    /// [`BreakpointRegistry::register`](crate::BreakpointRegistry::register)
    /// rather than directly.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the underlying index of this breakpoint ID.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for BreakpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BreakpointId").field(&self.0).finish()
    }
}

impl fmt::Display for BreakpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BreakpointId({})", self.0)
    }
}
