// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Application-level breakpoint configuration.
//!
//! [`LayoutConfig`] describes which breakpoints exist and how their activations
//! are reported. It is consumed once, at startup, by
//! [`BreakpointRegistry::from_config`](crate::BreakpointRegistry::from_config)
//! and [`MediaMonitor::from_config`](crate::MediaMonitor::from_config).
//!
//! With the `serde` feature enabled the configuration can be deserialized, so
//! hosts can ship custom breakpoints as data:
//!
//! ```rust
//! # #[cfg(feature = "serde")]
//! # {
//! use flexstory_media::{ActivationMode, LayoutConfig};
//!
//! let config: LayoutConfig = serde_json::from_str(r#"{
//!     "activation": "exclusive",
//!     "breakpoints": [
//!         { "alias": "print", "media_query": "print", "priority": 2000 }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(config.activation, ActivationMode::Exclusive);
//! assert_eq!(config.breakpoints[0].alias, "print");
//! # }
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::breakpoint::{Breakpoint, StaticBreakpoint};

/// How simultaneous breakpoint matches are reported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActivationMode {
    /// Every matching breakpoint is active at once; consumers pick among them
    /// by priority.
    #[default]
    Overlapping,
    /// At most one breakpoint is active: the highest-priority non-overlapping
    /// match, or the highest-priority range when no exact tier matches.
    /// Activating one implicitly deactivates its siblings.
    Exclusive,
}

/// An owned breakpoint definition, as found in configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakpointDef {
    /// Breakpoint alias, unique within a registry.
    pub alias: String,
    /// Media query predicate.
    pub media_query: String,
    /// Priority (higher wins).
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    /// Whether the range overlaps other breakpoints.
    #[cfg_attr(feature = "serde", serde(default))]
    pub overlapping: bool,
}

impl BreakpointDef {
    /// Creates a definition with `overlapping` unset.
    #[must_use]
    pub fn new(alias: impl Into<String>, media_query: impl Into<String>, priority: i32) -> Self {
        Self {
            alias: alias.into(),
            media_query: media_query.into(),
            priority,
            overlapping: false,
        }
    }

    /// Sets the `overlapping` flag.
    #[must_use]
    pub fn with_overlapping(mut self, overlapping: bool) -> Self {
        self.overlapping = overlapping;
        self
    }
}

impl From<&StaticBreakpoint> for BreakpointDef {
    fn from(bp: &StaticBreakpoint) -> Self {
        Self::new(bp.alias, bp.media_query, bp.priority).with_overlapping(bp.overlapping)
    }
}

impl From<&BreakpointDef> for Breakpoint {
    fn from(def: &BreakpointDef) -> Self {
        Self::new(&def.alias, &def.media_query, def.priority).with_overlapping(def.overlapping)
    }
}

/// Startup configuration for breakpoints and activation reporting.
///
/// Custom [`breakpoints`](Self::breakpoints) are merged by alias: a custom
/// definition that reuses a built-in alias replaces the built-in one.
///
/// # Example
///
/// ```rust
/// use flexstory_media::{ActivationMode, BreakpointDef, LayoutConfig};
///
/// let config = LayoutConfig::new()
///     .with_orientation_breakpoints(true)
///     .with_activation(ActivationMode::Exclusive)
///     .with_breakpoint(BreakpointDef::new("xs", "screen and (max-width: 479px)", 1000));
///
/// assert!(config.add_orientation_breakpoints);
/// assert_eq!(config.breakpoints.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Skip the built-in size breakpoints.
    pub disable_default_breakpoints: bool,
    /// Append the built-in orientation breakpoints.
    pub add_orientation_breakpoints: bool,
    /// How simultaneous matches are reported.
    pub activation: ActivationMode,
    /// Custom breakpoints, merged by alias.
    pub breakpoints: Vec<BreakpointDef>,
}

impl LayoutConfig {
    /// Creates the default configuration: built-in size breakpoints,
    /// overlapping activation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the built-in size breakpoints are skipped.
    #[must_use]
    pub fn with_default_breakpoints_disabled(mut self, disabled: bool) -> Self {
        self.disable_default_breakpoints = disabled;
        self
    }

    /// Sets whether the orientation breakpoints are appended.
    #[must_use]
    pub fn with_orientation_breakpoints(mut self, enabled: bool) -> Self {
        self.add_orientation_breakpoints = enabled;
        self
    }

    /// Sets the activation mode.
    #[must_use]
    pub fn with_activation(mut self, activation: ActivationMode) -> Self {
        self.activation = activation;
        self
    }

    /// Adds a custom breakpoint.
    #[must_use]
    pub fn with_breakpoint(mut self, def: BreakpointDef) -> Self {
        self.breakpoints.push(def);
        self
    }
}
