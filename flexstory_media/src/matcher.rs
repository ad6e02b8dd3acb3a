// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The platform media-query primitive and a scriptable mock.

use alloc::collections::BTreeSet;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use crate::registry::BreakpointRegistry;

/// The platform's media-query match primitive.
///
/// Implementations report whether a media query currently matches. A query
/// the platform cannot parse must simply never match; a misconfigured
/// breakpoint then never activates instead of failing loudly.
///
/// Change notification is the host's job: when the platform signals that a
/// match state flipped, the host calls [`MediaMonitor::sync`](crate::MediaMonitor::sync).
pub trait MatchMedia {
    /// Returns `true` if `media_query` matches current conditions.
    fn matches(&self, media_query: &str) -> bool;
}

impl<T: MatchMedia + ?Sized> MatchMedia for Rc<T> {
    fn matches(&self, media_query: &str) -> bool {
        (**self).matches(media_query)
    }
}

impl<T: MatchMedia + ?Sized> MatchMedia for &T {
    fn matches(&self, media_query: &str) -> bool {
        (**self).matches(media_query)
    }
}

/// Range breakpoints that overlap each exact size tier.
const OVERLAPS: &[(&str, &[&str])] = &[
    ("xs", &["lt-sm", "lt-md", "lt-lg", "lt-xl"]),
    ("sm", &["gt-xs", "lt-md", "lt-lg", "lt-xl"]),
    ("md", &["gt-xs", "gt-sm", "lt-lg", "lt-xl"]),
    ("lg", &["gt-xs", "gt-sm", "gt-md", "lt-xl"]),
    ("xl", &["gt-xs", "gt-sm", "gt-md", "gt-lg"]),
];

/// A scriptable [`MatchMedia`] for tests and headless hosts.
///
/// Queries are activated explicitly, by alias or by raw query string. Share it
/// with a [`MediaMonitor`](crate::MediaMonitor) through an `Rc` and call
/// [`MediaMonitor::sync`](crate::MediaMonitor::sync) after each change.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use flexstory_media::{BreakpointRegistry, MatchMedia, MockMatchMedia};
///
/// let registry = Rc::new(BreakpointRegistry::with_defaults());
/// let media = MockMatchMedia::new(Rc::clone(&registry));
///
/// media.activate("md", true);
/// let md = registry.find("md").unwrap().media_query();
/// let gt_sm = registry.find("gt-sm").unwrap().media_query();
/// assert!(media.matches(md));
/// assert!(media.matches(gt_sm));
///
/// media.activate("xs", false);
/// assert!(!media.matches(md));
/// ```
#[derive(Debug)]
pub struct MockMatchMedia {
    registry: Rc<BreakpointRegistry>,
    active: RefCell<BTreeSet<String>>,
}

impl MockMatchMedia {
    /// Creates a mock with nothing active.
    #[must_use]
    pub fn new(registry: Rc<BreakpointRegistry>) -> Self {
        Self {
            registry,
            active: RefCell::new(BTreeSet::new()),
        }
    }

    /// Deactivates everything, then activates `alias_or_query`.
    ///
    /// A registered alias activates its media query; anything else is taken as
    /// a literal query. With `use_overlaps`, the range breakpoints overlapping
    /// an exact size tier are activated as well.
    pub fn activate(&self, alias_or_query: &str, use_overlaps: bool) {
        let mut active = self.active.borrow_mut();
        active.clear();
        active.insert(self.query_for(alias_or_query));

        if use_overlaps
            && let Some((_, ranges)) = OVERLAPS.iter().find(|(exact, _)| *exact == alias_or_query)
        {
            for range in *ranges {
                if let Some(bp) = self.registry.find(range) {
                    active.insert(bp.media_query().into());
                }
            }
        }
    }

    /// Sets the match state of one query (alias or literal), leaving others alone.
    pub fn set_query(&self, alias_or_query: &str, matches: bool) {
        let query = self.query_for(alias_or_query);
        let mut active = self.active.borrow_mut();
        if matches {
            active.insert(query);
        } else {
            active.remove(&query);
        }
    }

    /// Deactivates every query.
    pub fn clear_all(&self) {
        self.active.borrow_mut().clear();
    }

    /// Returns `true` if the query (alias or literal) is active.
    #[must_use]
    pub fn is_active(&self, alias_or_query: &str) -> bool {
        self.active
            .borrow()
            .contains(self.query_for(alias_or_query).as_str())
    }

    fn query_for(&self, alias_or_query: &str) -> String {
        self.registry
            .find(alias_or_query)
            .map_or(alias_or_query, |bp| bp.media_query())
            .into()
    }
}

impl MatchMedia for MockMatchMedia {
    fn matches(&self, media_query: &str) -> bool {
        self.active.borrow().contains(media_query)
    }
}
