// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of the effective class input.
//!
//! Given the active breakpoints and a directive's [`InputCache`], [`resolve`]
//! picks the one value that should reach the class binding:
//!
//! **Active breakpoint (by priority) → Base → Raw fallback → Empty**
//!
//! Overlapping breakpoints are ranked by registry priority, never by the order
//! the inputs were declared or assigned. Resolution is pure: the same inputs
//! always give the same [`Resolution`].

use flexstory_media::{ActivationState, BreakpointId};

use crate::cache::{InputCache, InputKey};
use crate::value::ClassValue;

/// Where a [`Resolution`] came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolvedSource {
    /// The entry of the highest-priority active breakpoint that has one.
    Breakpoint(BreakpointId),
    /// The structured non-responsive input.
    Base,
    /// The raw `class` attribute.
    RawFallback,
    /// Nothing applies.
    Empty,
}

impl ResolvedSource {
    /// Returns the cache key this source reads from, if any.
    #[must_use]
    pub fn input_key(self) -> Option<InputKey> {
        match self {
            Self::Breakpoint(id) => Some(InputKey::Breakpoint(id)),
            Self::Base => Some(InputKey::Base),
            Self::RawFallback => Some(InputKey::RawFallback),
            Self::Empty => None,
        }
    }
}

/// The winning class input, borrowed from the cache.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// Which input won.
    pub source: ResolvedSource,
    /// The winning value; `None` only for [`ResolvedSource::Empty`].
    pub value: Option<&'a ClassValue>,
}

impl Resolution<'_> {
    /// The resolution when no input applies.
    pub const EMPTY: Self = Self {
        source: ResolvedSource::Empty,
        value: None,
    };

    /// Returns `true` if a breakpoint-qualified input won.
    #[must_use]
    pub fn is_responsive(&self) -> bool {
        matches!(self.source, ResolvedSource::Breakpoint(_))
    }
}

/// Resolves the effective input for the current activation.
///
/// # Example
///
/// ```rust
/// use flexstory_class::{InputCache, InputKey, ResolvedSource, resolve};
/// use flexstory_media::{ActivationState, BreakpointRegistry};
///
/// let registry = BreakpointRegistry::with_defaults();
/// let xs = registry.by_alias("xs").unwrap();
/// let lt_md = registry.by_alias("lt-md").unwrap();
///
/// let mut cache = InputCache::new();
/// cache.set(InputKey::Base, "c1".into());
/// cache.set(InputKey::Breakpoint(lt_md), "narrow".into());
///
/// // Nothing active: the base input applies.
/// let idle = ActivationState::default();
/// assert_eq!(resolve(&idle, &cache).source, ResolvedSource::Base);
///
/// // Both active: xs outranks lt-md but has no entry, so lt-md wins.
/// let active = ActivationState::from_active(&registry, [lt_md, xs]);
/// let resolution = resolve(&active, &cache);
/// assert_eq!(resolution.source, ResolvedSource::Breakpoint(lt_md));
/// assert_eq!(resolution.value, Some(&"narrow".into()));
/// ```
#[must_use]
pub fn resolve<'a>(activation: &ActivationState, cache: &'a InputCache) -> Resolution<'a> {
    resolve_ordered(activation.active(), cache)
}

/// Resolves against `active`, which must already be in priority order
/// (highest first).
#[must_use]
pub fn resolve_ordered<'a>(active: &[BreakpointId], cache: &'a InputCache) -> Resolution<'a> {
    let responsive = active.iter().find_map(|id| {
        cache.get(InputKey::Breakpoint(*id)).map(|value| Resolution {
            source: ResolvedSource::Breakpoint(*id),
            value: Some(value),
        })
    });
    responsive
        .or_else(|| layer(cache, InputKey::Base, ResolvedSource::Base))
        .or_else(|| layer(cache, InputKey::RawFallback, ResolvedSource::RawFallback))
        .unwrap_or(Resolution::EMPTY)
}

fn layer(cache: &InputCache, key: InputKey, source: ResolvedSource) -> Option<Resolution<'_>> {
    cache.get(key).map(|value| Resolution {
        source,
        value: Some(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexstory_media::BreakpointRegistry;

    fn id(registry: &BreakpointRegistry, alias: &str) -> BreakpointId {
        registry.by_alias(alias).unwrap()
    }

    #[test]
    fn empty_cache_resolves_empty() {
        let cache = InputCache::new();
        assert_eq!(resolve(&ActivationState::default(), &cache), Resolution::EMPTY);
    }

    #[test]
    fn fallback_chain() {
        let registry = BreakpointRegistry::with_defaults();
        let md = id(&registry, "md");
        let active = ActivationState::from_active(&registry, [md]);
        let mut cache = InputCache::new();

        cache.set(InputKey::RawFallback, "raw".into());
        assert_eq!(resolve(&active, &cache).source, ResolvedSource::RawFallback);

        cache.set(InputKey::Base, "base".into());
        assert_eq!(resolve(&active, &cache).source, ResolvedSource::Base);

        cache.set(InputKey::Breakpoint(md), "md".into());
        let resolution = resolve(&active, &cache);
        assert_eq!(resolution.source, ResolvedSource::Breakpoint(md));
        assert!(resolution.is_responsive());
        assert_eq!(resolution.value, Some(&"md".into()));
    }

    #[test]
    fn inactive_entries_are_ignored() {
        let registry = BreakpointRegistry::with_defaults();
        let mut cache = InputCache::new();
        cache.set(InputKey::Breakpoint(id(&registry, "lg")), "lg".into());
        cache.set(InputKey::Base, "base".into());

        let active = ActivationState::from_active(&registry, [id(&registry, "sm")]);
        assert_eq!(resolve(&active, &cache).value, Some(&"base".into()));
    }

    #[test]
    fn exact_alias_beats_range_alias() {
        let registry = BreakpointRegistry::with_defaults();
        let md = id(&registry, "md");
        let gt_sm = id(&registry, "gt-sm");
        let lt_lg = id(&registry, "lt-lg");

        let mut cache = InputCache::new();
        cache.set(InputKey::Breakpoint(gt_sm), "gt-sm".into());
        cache.set(InputKey::Breakpoint(lt_lg), "lt-lg".into());
        cache.set(InputKey::Breakpoint(md), "md".into());

        let active = ActivationState::from_active(&registry, [gt_sm, lt_lg, md]);
        assert_eq!(resolve(&active, &cache).source, ResolvedSource::Breakpoint(md));

        cache.remove(InputKey::Breakpoint(md));
        assert_eq!(
            resolve(&active, &cache).source,
            ResolvedSource::Breakpoint(lt_lg)
        );
    }

    #[test]
    fn resolve_ordered_trusts_caller_order() {
        let registry = BreakpointRegistry::with_defaults();
        let xs = id(&registry, "xs");
        let lt_sm = id(&registry, "lt-sm");
        let mut cache = InputCache::new();
        cache.set(InputKey::Breakpoint(xs), "xs".into());
        cache.set(InputKey::Breakpoint(lt_sm), "lt-sm".into());

        assert_eq!(
            resolve_ordered(&[lt_sm, xs], &cache).source,
            ResolvedSource::Breakpoint(lt_sm)
        );
    }

    #[test]
    fn source_input_keys() {
        let md = BreakpointId::new(4);
        assert_eq!(
            ResolvedSource::Breakpoint(md).input_key(),
            Some(InputKey::Breakpoint(md))
        );
        assert_eq!(ResolvedSource::Base.input_key(), Some(InputKey::Base));
        assert_eq!(ResolvedSource::Empty.input_key(), None);
    }
}
