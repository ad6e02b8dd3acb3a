// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint definitions and the built-in breakpoint tables.
//!
//! A [`Breakpoint`] names a responsive tier: an alias such as `md` or `gt-lg`,
//! the media query that activates it, and a priority used to pick a winner
//! when several breakpoints match at once.
//!
//! Priorities follow one rule: the more specific the range, the higher the
//! priority. Exact tiers (`xs` .. `xl`) outrank the `lt-*` ranges, which
//! outrank the `gt-*` ranges; within a range family the narrower range wins.

use alloc::rc::Rc;

/// A single breakpoint definition held by a
/// [`BreakpointRegistry`](crate::BreakpointRegistry).
///
/// Breakpoints are cheap to clone: the alias and media query are shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breakpoint {
    alias: Rc<str>,
    media_query: Rc<str>,
    priority: i32,
    overlapping: bool,
}

impl Breakpoint {
    /// Creates a non-overlapping breakpoint.
    #[must_use]
    pub fn new(alias: &str, media_query: &str, priority: i32) -> Self {
        Self {
            alias: Rc::from(alias),
            media_query: Rc::from(media_query),
            priority,
            overlapping: false,
        }
    }

    /// Marks whether this breakpoint's range overlaps other breakpoints.
    #[must_use]
    pub fn with_overlapping(mut self, overlapping: bool) -> Self {
        self.overlapping = overlapping;
        self
    }

    /// Returns the alias, e.g. `gt-md`.
    #[must_use]
    #[inline]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns a shared handle to the alias.
    #[must_use]
    #[inline]
    pub fn shared_alias(&self) -> Rc<str> {
        Rc::clone(&self.alias)
    }

    /// Returns the media query predicate.
    #[must_use]
    #[inline]
    pub fn media_query(&self) -> &str {
        &self.media_query
    }

    /// Returns a shared handle to the media query.
    #[must_use]
    #[inline]
    pub fn shared_media_query(&self) -> Rc<str> {
        Rc::clone(&self.media_query)
    }

    /// Returns the priority; higher values win ties between matching breakpoints.
    #[must_use]
    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns `true` if this breakpoint is a range that overlaps others.
    ///
    /// In [`ActivationMode::Exclusive`](crate::ActivationMode::Exclusive) a
    /// matching non-overlapping breakpoint always wins over ranges.
    #[must_use]
    #[inline]
    pub fn is_overlapping(&self) -> bool {
        self.overlapping
    }
}

/// A `const`-friendly breakpoint description used by the built-in tables.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StaticBreakpoint {
    /// Breakpoint alias.
    pub alias: &'static str,
    /// Media query predicate.
    pub media_query: &'static str,
    /// Priority (higher wins).
    pub priority: i32,
    /// Whether the range overlaps other breakpoints.
    pub overlapping: bool,
}

impl StaticBreakpoint {
    const fn exact(alias: &'static str, media_query: &'static str, priority: i32) -> Self {
        Self {
            alias,
            media_query,
            priority,
            overlapping: false,
        }
    }

    const fn range(alias: &'static str, media_query: &'static str, priority: i32) -> Self {
        Self {
            alias,
            media_query,
            priority,
            overlapping: true,
        }
    }
}

impl From<&StaticBreakpoint> for Breakpoint {
    fn from(bp: &StaticBreakpoint) -> Self {
        Self::new(bp.alias, bp.media_query, bp.priority).with_overlapping(bp.overlapping)
    }
}

/// The default size breakpoints.
pub const DEFAULT_BREAKPOINTS: &[StaticBreakpoint] = &[
    StaticBreakpoint::exact("xs", "screen and (min-width: 0px) and (max-width: 599px)", 1000),
    StaticBreakpoint::range("lt-sm", "screen and (max-width: 599px)", 950),
    StaticBreakpoint::exact("sm", "screen and (min-width: 600px) and (max-width: 959px)", 900),
    StaticBreakpoint::range("lt-md", "screen and (max-width: 959px)", 850),
    StaticBreakpoint::exact("md", "screen and (min-width: 960px) and (max-width: 1279px)", 800),
    StaticBreakpoint::range("lt-lg", "screen and (max-width: 1279px)", 750),
    StaticBreakpoint::exact("lg", "screen and (min-width: 1280px) and (max-width: 1919px)", 700),
    StaticBreakpoint::range("lt-xl", "screen and (max-width: 1919px)", 650),
    StaticBreakpoint::exact("xl", "screen and (min-width: 1920px) and (max-width: 5000px)", 600),
    StaticBreakpoint::range("gt-lg", "screen and (min-width: 1920px)", -650),
    StaticBreakpoint::range("gt-md", "screen and (min-width: 1280px)", -750),
    StaticBreakpoint::range("gt-sm", "screen and (min-width: 960px)", -850),
    StaticBreakpoint::range("gt-xs", "screen and (min-width: 600px)", -950),
];

const HANDSET_PORTRAIT: &str = "(orientation: portrait) and (max-width: 599px)";
const HANDSET_LANDSCAPE: &str = "(orientation: landscape) and (max-width: 959px)";
const TABLET_PORTRAIT: &str = "(orientation: portrait) and (min-width: 600px) and (max-width: 839px)";
const TABLET_LANDSCAPE: &str =
    "(orientation: landscape) and (min-width: 960px) and (max-width: 1279px)";
const WEB_PORTRAIT: &str = "(orientation: portrait) and (min-width: 840px)";
const WEB_LANDSCAPE: &str = "(orientation: landscape) and (min-width: 1280px)";

/// Device-class breakpoints keyed on orientation; opt-in via
/// [`LayoutConfig::add_orientation_breakpoints`](crate::LayoutConfig::add_orientation_breakpoints).
pub const ORIENTATION_BREAKPOINTS: &[StaticBreakpoint] = &[
    StaticBreakpoint::range("handset.portrait", HANDSET_PORTRAIT, 500),
    StaticBreakpoint::range("handset.landscape", HANDSET_LANDSCAPE, 490),
    StaticBreakpoint::range("tablet.portrait", TABLET_PORTRAIT, 480),
    StaticBreakpoint::range("tablet.landscape", TABLET_LANDSCAPE, 470),
    StaticBreakpoint::range("web.portrait", WEB_PORTRAIT, 460),
    StaticBreakpoint::range("web.landscape", WEB_LANDSCAPE, 450),
    StaticBreakpoint::range(
        "handset",
        "(orientation: portrait) and (max-width: 599px), (orientation: landscape) and (max-width: 959px)",
        400,
    ),
    StaticBreakpoint::range(
        "tablet",
        "(orientation: portrait) and (min-width: 600px) and (max-width: 839px), (orientation: landscape) and (min-width: 960px) and (max-width: 1279px)",
        390,
    ),
    StaticBreakpoint::range(
        "web",
        "(orientation: portrait) and (min-width: 840px), (orientation: landscape) and (min-width: 1280px)",
        380,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn breakpoint_accessors() {
        let bp = Breakpoint::new("gt-sm", "screen and (min-width: 960px)", -850)
            .with_overlapping(true);
        assert_eq!(bp.alias(), "gt-sm");
        assert_eq!(bp.media_query(), "screen and (min-width: 960px)");
        assert_eq!(bp.priority(), -850);
        assert!(bp.is_overlapping());
    }

    #[test]
    fn default_aliases_are_unique() {
        let mut aliases: Vec<_> = DEFAULT_BREAKPOINTS
            .iter()
            .chain(ORIENTATION_BREAKPOINTS)
            .map(|bp| bp.alias)
            .collect();
        let total = aliases.len();
        aliases.sort_unstable();
        aliases.dedup();
        assert_eq!(aliases.len(), total);
    }

    #[test]
    fn exact_tiers_outrank_ranges() {
        let priority = |alias: &str| {
            DEFAULT_BREAKPOINTS
                .iter()
                .find(|bp| bp.alias == alias)
                .map(|bp| bp.priority)
                .unwrap()
        };
        assert!(priority("md") > priority("lt-lg"));
        assert!(priority("lt-lg") > priority("gt-sm"));
        assert!(priority("lt-sm") > priority("lt-md"));
        assert!(priority("gt-lg") > priority("gt-xs"));
        assert!(
            DEFAULT_BREAKPOINTS
                .iter()
                .all(|bp| bp.overlapping != matches!(bp.alias, "xs" | "sm" | "md" | "lg" | "xl"))
        );
    }
}
