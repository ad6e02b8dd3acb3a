// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint registry.
//!
//! This module provides [`BreakpointRegistry`] for registering breakpoints and
//! ordering matched breakpoints by priority.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::breakpoint::{Breakpoint, DEFAULT_BREAKPOINTS, ORIENTATION_BREAKPOINTS};
use crate::config::{BreakpointDef, LayoutConfig};
use crate::id::BreakpointId;

/// An ordered list of breakpoints, highest priority first.
pub type BreakpointList = SmallVec<[BreakpointId; 8]>;

/// Errors raised while populating a [`BreakpointRegistry`].
///
/// These are configuration errors; hosts are expected to treat them as fatal
/// at startup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A breakpoint with this alias is already registered.
    #[error("breakpoint alias `{0}` is already registered")]
    DuplicateAlias(String),
    /// Breakpoint aliases must be non-empty.
    #[error("breakpoint alias must not be empty")]
    EmptyAlias,
    /// The registry is full.
    #[error("too many breakpoints registered (max {max})")]
    TooManyBreakpoints {
        /// Maximum number of breakpoints.
        max: usize,
    },
}

/// A registry of named breakpoints.
///
/// Breakpoints are registered once at startup. The registry is then shared
/// (typically behind an `Rc`) and only read: it resolves aliases and orders
/// matched breakpoints by priority.
///
/// # Example
///
/// ```rust
/// use flexstory_media::{BreakpointRegistry, RegistryError};
///
/// let mut registry = BreakpointRegistry::new();
/// let md = registry.register("md", "(min-width: 960px) and (max-width: 1279px)", 800)?;
/// let gt_sm = registry.register("gt-sm", "(min-width: 960px)", -850)?;
///
/// assert_eq!(registry.by_alias("md"), Some(md));
/// assert!(registry.register("md", "(min-width: 1px)", 0).is_err());
///
/// // Both match: the exact tier comes first.
/// let matched = registry.resolve_all(|_| true);
/// assert_eq!(matched.as_slice(), &[md, gt_sm]);
/// # Ok::<(), RegistryError>(())
/// ```
#[derive(Default)]
pub struct BreakpointRegistry {
    breakpoints: Vec<Breakpoint>,
    by_alias: HashMap<Rc<str>, BreakpointId>,
    /// All ids, sorted by descending priority then registration order.
    by_priority: Vec<BreakpointId>,
}

impl BreakpointRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in size breakpoints.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for bp in DEFAULT_BREAKPOINTS {
            let result = registry.register_breakpoint(Breakpoint::from(bp));
            debug_assert!(result.is_ok(), "built-in breakpoint `{}` rejected", bp.alias);
        }
        registry
    }

    /// Builds a registry from startup configuration.
    ///
    /// Built-in tables are included as configured; custom breakpoints replace
    /// built-in ones with the same alias and are appended otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateAlias`] if two custom breakpoints share
    /// an alias, and propagates any other registration error.
    pub fn from_config(config: &LayoutConfig) -> Result<Self, RegistryError> {
        let mut defs: Vec<BreakpointDef> = Vec::new();
        if !config.disable_default_breakpoints {
            defs.extend(DEFAULT_BREAKPOINTS.iter().map(BreakpointDef::from));
        }
        if config.add_orientation_breakpoints {
            defs.extend(ORIENTATION_BREAKPOINTS.iter().map(BreakpointDef::from));
        }

        let builtin = defs.len();
        for (i, custom) in config.breakpoints.iter().enumerate() {
            if config.breakpoints[..i]
                .iter()
                .any(|earlier| earlier.alias == custom.alias)
            {
                return Err(RegistryError::DuplicateAlias(custom.alias.clone()));
            }
            match defs[..builtin]
                .iter_mut()
                .find(|def| def.alias == custom.alias)
            {
                Some(existing) => *existing = custom.clone(),
                None => defs.push(custom.clone()),
            }
        }

        let mut registry = Self::new();
        for def in &defs {
            registry.register_breakpoint(Breakpoint::from(def))?;
        }
        tracing::debug!(
            count = registry.len(),
            custom = config.breakpoints.len(),
            "built breakpoint registry"
        );
        Ok(registry)
    }

    /// Registers a breakpoint with the given alias, media query and priority.
    ///
    /// # Errors
    ///
    /// Fails if the alias is empty or already registered, or the registry is full.
    pub fn register(
        &mut self,
        alias: &str,
        media_query: &str,
        priority: i32,
    ) -> Result<BreakpointId, RegistryError> {
        self.register_breakpoint(Breakpoint::new(alias, media_query, priority))
    }

    /// Registers a fully described breakpoint.
    ///
    /// # Errors
    ///
    /// Fails if the alias is empty or already registered, or the registry is full.
    pub fn register_breakpoint(
        &mut self,
        breakpoint: Breakpoint,
    ) -> Result<BreakpointId, RegistryError> {
        if breakpoint.alias().is_empty() {
            return Err(RegistryError::EmptyAlias);
        }
        if self.by_alias.contains_key(breakpoint.alias()) {
            return Err(RegistryError::DuplicateAlias(breakpoint.alias().into()));
        }
        let max = usize::from(u16::MAX);
        if self.breakpoints.len() >= max {
            return Err(RegistryError::TooManyBreakpoints { max });
        }

        #[expect(clippy::cast_possible_truncation, reason = "checked above")]
        let id = BreakpointId::new(self.breakpoints.len() as u16);

        // Equal priorities keep registration order.
        let priority = breakpoint.priority();
        let pos = self
            .by_priority
            .partition_point(|other| self.breakpoints[other.slot()].priority() >= priority);
        self.by_priority.insert(pos, id);

        tracing::trace!(
            alias = breakpoint.alias(),
            media_query = breakpoint.media_query(),
            priority,
            "registered breakpoint"
        );
        self.by_alias.insert(breakpoint.shared_alias(), id);
        self.breakpoints.push(breakpoint);
        Ok(id)
    }

    /// Returns the number of registered breakpoints.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    /// Returns `true` if no breakpoints are registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Looks up a breakpoint by alias.
    #[must_use]
    pub fn by_alias(&self, alias: &str) -> Option<BreakpointId> {
        self.by_alias.get(alias).copied()
    }

    /// Returns the breakpoint for an id.
    #[must_use]
    pub fn get(&self, id: BreakpointId) -> Option<&Breakpoint> {
        self.breakpoints.get(id.slot())
    }

    /// Returns the alias of a breakpoint.
    #[must_use]
    pub fn alias(&self, id: BreakpointId) -> Option<&str> {
        self.get(id).map(Breakpoint::alias)
    }

    /// Returns the breakpoint for an alias.
    #[must_use]
    pub fn find(&self, alias: &str) -> Option<&Breakpoint> {
        self.by_alias(alias).and_then(|id| self.get(id))
    }

    /// Returns all ids, highest priority first.
    #[must_use]
    pub fn by_priority(&self) -> &[BreakpointId] {
        &self.by_priority
    }

    /// Returns the ids of all breakpoints whose predicate matches, highest
    /// priority first. Equal priorities keep registration order.
    pub fn resolve_all(&self, mut matches: impl FnMut(&Breakpoint) -> bool) -> BreakpointList {
        self.by_priority
            .iter()
            .copied()
            .filter(|id| matches(&self.breakpoints[id.slot()]))
            .collect()
    }

    /// Sorts ids into priority order. Unknown ids sort last.
    pub fn sort_by_priority(&self, ids: &mut [BreakpointId]) {
        ids.sort_by_key(|id| {
            self.by_priority
                .iter()
                .position(|other| other == id)
                .unwrap_or(usize::MAX)
        });
    }

    /// Returns an iterator over all breakpoints in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BreakpointId, &Breakpoint)> {
        self.breakpoints.iter().enumerate().map(|(i, bp)| {
            #[expect(clippy::cast_possible_truncation, reason = "index < len <= u16::MAX")]
            let id = BreakpointId::new(i as u16);
            (id, bp)
        })
    }
}

impl core::fmt::Debug for BreakpointRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BreakpointRegistry")
            .field("count", &self.breakpoints.len())
            .field(
                "aliases",
                &self.breakpoints.iter().map(Breakpoint::alias).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActivationMode;
    use alloc::{format, vec, vec::Vec};

    fn aliases(registry: &BreakpointRegistry, ids: &[BreakpointId]) -> Vec<String> {
        ids.iter()
            .map(|id| registry.alias(*id).unwrap().into())
            .collect()
    }

    #[test]
    fn registry_new() {
        let registry = BreakpointRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = BreakpointRegistry::new();
        let xs = registry.register("xs", "(max-width: 599px)", 1000).unwrap();

        assert_eq!(xs.index(), 0);
        assert_eq!(registry.by_alias("xs"), Some(xs));
        assert_eq!(registry.by_alias("sm"), None);
        assert_eq!(registry.alias(xs), Some("xs"));
        assert_eq!(registry.find("xs").unwrap().media_query(), "(max-width: 599px)");
        assert_eq!(registry.get(BreakpointId::new(9)), None);
    }

    #[test]
    fn registry_rejects_duplicates() {
        let mut registry = BreakpointRegistry::new();
        registry.register("md", "(min-width: 960px)", 800).unwrap();
        assert_eq!(
            registry.register("md", "(min-width: 961px)", 1),
            Err(RegistryError::DuplicateAlias("md".into()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_rejects_empty_alias() {
        let mut registry = BreakpointRegistry::new();
        assert_eq!(
            registry.register("", "(min-width: 0px)", 0),
            Err(RegistryError::EmptyAlias)
        );
    }

    #[test]
    fn registry_rejects_overflow() {
        let mut registry = BreakpointRegistry::new();
        for i in 0..u16::MAX {
            registry.register(&format!("bp{i}"), "all", 0).unwrap();
        }
        assert_eq!(registry.len(), usize::from(u16::MAX));
        assert_eq!(
            registry.register("one-more", "all", 0),
            Err(RegistryError::TooManyBreakpoints {
                max: usize::from(u16::MAX)
            })
        );
        assert!(registry.by_alias("one-more").is_none());
    }

    #[test]
    fn resolve_all_orders_by_priority_then_registration() {
        let mut registry = BreakpointRegistry::new();
        let low = registry.register("low", "a", -10).unwrap();
        let high = registry.register("high", "b", 10).unwrap();
        let tie_first = registry.register("tie-first", "c", 0).unwrap();
        let tie_second = registry.register("tie-second", "d", 0).unwrap();

        assert_eq!(
            registry.by_priority(),
            &[high, tie_first, tie_second, low]
        );

        let matched = registry.resolve_all(|bp| bp.media_query() != "b");
        assert_eq!(matched.as_slice(), &[tie_first, tie_second, low]);
    }

    #[test]
    fn sort_by_priority_reorders_ids() {
        let registry = BreakpointRegistry::with_defaults();
        let gt_xs = registry.by_alias("gt-xs").unwrap();
        let sm = registry.by_alias("sm").unwrap();
        let lt_md = registry.by_alias("lt-md").unwrap();

        let mut ids = vec![gt_xs, lt_md, sm];
        registry.sort_by_priority(&mut ids);
        assert_eq!(aliases(&registry, &ids), ["sm", "lt-md", "gt-xs"]);
    }

    #[test]
    fn defaults_registered() {
        let registry = BreakpointRegistry::with_defaults();
        assert_eq!(registry.len(), DEFAULT_BREAKPOINTS.len());
        assert_eq!(
            aliases(&registry, &registry.by_priority()[..3]),
            ["xs", "lt-sm", "sm"]
        );
    }

    #[test]
    fn from_config_merges_custom_by_alias() {
        let config = LayoutConfig::new()
            .with_activation(ActivationMode::Exclusive)
            .with_breakpoint(BreakpointDef::new("xs", "(max-width: 479px)", 1000))
            .with_breakpoint(BreakpointDef::new("print", "print", 2000));

        let registry = BreakpointRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), DEFAULT_BREAKPOINTS.len() + 1);
        assert_eq!(registry.find("xs").unwrap().media_query(), "(max-width: 479px)");
        assert_eq!(registry.alias(registry.by_priority()[0]), Some("print"));
    }

    #[test]
    fn from_config_rejects_duplicate_custom() {
        let config = LayoutConfig::new()
            .with_breakpoint(BreakpointDef::new("md", "(min-width: 1px)", 1))
            .with_breakpoint(BreakpointDef::new("md", "(min-width: 2px)", 2));

        assert_eq!(
            BreakpointRegistry::from_config(&config).unwrap_err(),
            RegistryError::DuplicateAlias("md".into())
        );
    }

    #[test]
    fn from_config_optional_tables() {
        let config = LayoutConfig::new()
            .with_default_breakpoints_disabled(true)
            .with_orientation_breakpoints(true);
        let registry = BreakpointRegistry::from_config(&config).unwrap();

        assert_eq!(registry.len(), ORIENTATION_BREAKPOINTS.len());
        assert!(registry.by_alias("md").is_none());
        assert!(registry.by_alias("handset.portrait").is_some());
    }

    #[test]
    fn registry_debug() {
        let registry = BreakpointRegistry::with_defaults();
        let debug = format!("{registry:?}");
        assert!(debug.contains("BreakpointRegistry"));
        assert!(debug.contains("gt-lg"));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            format!("{}", RegistryError::DuplicateAlias("md".into())),
            "breakpoint alias `md` is already registered"
        );
        assert_eq!(
            format!("{}", RegistryError::TooManyBreakpoints { max: 3 }),
            "too many breakpoints registered (max 3)"
        );
    }
}
