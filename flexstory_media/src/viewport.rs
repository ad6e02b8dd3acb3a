// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`MatchMedia`] that evaluates queries against a simulated viewport.
//!
//! Hosts without a browser (terminal UIs, server-side renderers, tests) can
//! drive breakpoints from a known viewport size. Only a small subset of the
//! media query language is understood:
//!
//! - comma-separated alternatives, any of which may match;
//! - terms joined by `and`;
//! - an optional leading `only`, then an optional media type: `all` and
//!   `screen` match, `print` never does;
//! - `min-width`, `max-width`, `min-height`, `max-height` in `px`;
//! - `orientation: portrait | landscape`.
//!
//! Anything else makes its alternative fail to match.

use core::cell::Cell;

use crate::matcher::MatchMedia;

/// Viewport orientation. Square viewports are portrait.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Height is at least the width.
    Portrait,
    /// Width exceeds the height.
    Landscape,
}

/// A viewport size in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the viewport orientation.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        if self.height >= self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Evaluates media queries against a mutable simulated [`Viewport`].
///
/// # Example
///
/// ```rust
/// use flexstory_media::{MatchMedia, Viewport, ViewportMatchMedia};
///
/// let media = ViewportMatchMedia::new(Viewport::new(1024, 768));
/// assert!(media.matches("screen and (min-width: 960px) and (max-width: 1279px)"));
/// assert!(media.matches("(orientation: landscape)"));
///
/// media.set_viewport(Viewport::new(400, 800));
/// assert!(media.matches("screen and (max-width: 599px)"));
/// assert!(!media.matches("screen and (min-width: 600px)"));
///
/// // Unsupported syntax never matches.
/// assert!(!media.matches("(min-resolution: 2dppx)"));
/// ```
#[derive(Debug, Default)]
pub struct ViewportMatchMedia {
    viewport: Cell<Viewport>,
}

impl ViewportMatchMedia {
    /// Creates a matcher for the given viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Cell::new(viewport),
        }
    }

    /// Returns the current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    /// Replaces the viewport. Call
    /// [`MediaMonitor::sync`](crate::MediaMonitor::sync) afterwards.
    pub fn set_viewport(&self, viewport: Viewport) {
        self.viewport.set(viewport);
    }
}

impl MatchMedia for ViewportMatchMedia {
    fn matches(&self, media_query: &str) -> bool {
        let viewport = self.viewport.get();
        media_query
            .split(',')
            .any(|alternative| matches_alternative(alternative, viewport))
    }
}

fn matches_alternative(alternative: &str, viewport: Viewport) -> bool {
    let mut rest = alternative.trim();
    if let Some(after) = strip_keyword(rest, "only") {
        rest = after;
    }
    if rest.is_empty() {
        return false;
    }

    let mut first = true;
    loop {
        let matched = if let Some(inner) = rest.strip_prefix('(') {
            let Some(end) = inner.find(')') else {
                return false;
            };
            let matched = feature_matches(&inner[..end], viewport);
            rest = inner[end + 1..].trim_start();
            matched
        } else if first {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '(')
                .unwrap_or(rest.len());
            let matched = media_type_matches(&rest[..end]);
            rest = rest[end..].trim_start();
            matched
        } else {
            false
        };
        if !matched {
            return false;
        }
        first = false;

        if rest.is_empty() {
            return true;
        }
        match strip_keyword(rest, "and") {
            Some(after) if !after.is_empty() => rest = after,
            _ => return false,
        }
    }
}

/// Strips a leading case-insensitive keyword followed by whitespace or `(`.
fn strip_keyword<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let head = input.get(..keyword.len())?;
    let tail = &input[keyword.len()..];
    let delimited = tail
        .chars()
        .next()
        .is_some_and(|c| c.is_whitespace() || c == '(');
    (head.eq_ignore_ascii_case(keyword) && delimited).then(|| tail.trim_start())
}

fn media_type_matches(media_type: &str) -> bool {
    media_type.eq_ignore_ascii_case("all") || media_type.eq_ignore_ascii_case("screen")
}

fn feature_matches(feature: &str, viewport: Viewport) -> bool {
    let Some((name, value)) = feature.split_once(':') else {
        return false;
    };
    let name = name.trim();
    let value = value.trim();

    if name.eq_ignore_ascii_case("orientation") {
        return match viewport.orientation() {
            Orientation::Portrait => value.eq_ignore_ascii_case("portrait"),
            Orientation::Landscape => value.eq_ignore_ascii_case("landscape"),
        };
    }

    let Some(px) = parse_px(value) else {
        return false;
    };
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    match name.to_ascii_lowercase().as_str() {
        "min-width" => width >= px,
        "max-width" => width <= px,
        "min-height" => height >= px,
        "max-height" => height <= px,
        _ => false,
    }
}

fn parse_px(value: &str) -> Option<f64> {
    let split = value.len().checked_sub(2)?;
    let (number, unit) = value.split_at_checked(split)?;
    if !unit.eq_ignore_ascii_case("px") {
        return None;
    }
    number.trim_end().parse::<f64>().ok().filter(|px| px.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::DEFAULT_BREAKPOINTS;
    use alloc::vec::Vec;

    fn matching_aliases(width: u32, height: u32) -> Vec<&'static str> {
        let media = ViewportMatchMedia::new(Viewport::new(width, height));
        DEFAULT_BREAKPOINTS
            .iter()
            .filter(|bp| media.matches(bp.media_query))
            .map(|bp| bp.alias)
            .collect()
    }

    #[test]
    fn orientation_of_viewport() {
        assert_eq!(Viewport::new(800, 600).orientation(), Orientation::Landscape);
        assert_eq!(Viewport::new(600, 800).orientation(), Orientation::Portrait);
        assert_eq!(Viewport::new(500, 500).orientation(), Orientation::Portrait);
    }

    #[test]
    fn default_breakpoints_at_small_width() {
        assert_eq!(
            matching_aliases(400, 800),
            ["xs", "lt-sm", "lt-md", "lt-lg", "lt-xl"]
        );
    }

    #[test]
    fn default_breakpoints_at_medium_width() {
        assert_eq!(
            matching_aliases(1000, 700),
            ["md", "lt-lg", "lt-xl", "gt-sm", "gt-xs"]
        );
    }

    #[test]
    fn boundaries_are_inclusive() {
        let media = ViewportMatchMedia::new(Viewport::new(600, 400));
        assert!(media.matches("(min-width: 600px)"));
        assert!(media.matches("(max-width: 600px)"));
        assert!(!media.matches("(max-width: 599.98px)"));
    }

    #[test]
    fn alternatives_and_keywords() {
        let media = ViewportMatchMedia::new(Viewport::new(700, 1000));
        assert!(media.matches("print, (orientation: portrait) and (min-width: 600px)"));
        assert!(media.matches("only screen and (max-height: 1000px)"));
        assert!(media.matches("ALL AND (MIN-WIDTH: 700PX)"));
        assert!(media.matches("all and (min-width:700px)"));
        assert!(!media.matches("print"));
    }

    #[test]
    fn malformed_queries_never_match() {
        let media = ViewportMatchMedia::new(Viewport::new(700, 1000));
        for query in [
            "",
            "(min-width: 600px",
            "(min-width: wide)",
            "(min-width: 600px) and",
            "(min-width: 600px) or (max-width: 100px)",
            "screen screen",
            "(hover: hover)",
            "not screen",
        ] {
            assert!(!media.matches(query), "{query:?} should not match");
        }
    }

    #[test]
    fn viewport_can_change() {
        let media = ViewportMatchMedia::default();
        assert!(media.matches("(max-width: 0px)"));
        media.set_viewport(Viewport::new(1920, 1080));
        assert_eq!(media.viewport(), Viewport::new(1920, 1080));
        assert!(media.matches("screen and (min-width: 1920px)"));
    }
}
