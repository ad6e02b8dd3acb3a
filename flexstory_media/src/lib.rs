// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flexstory Media: breakpoints and media-query activation.
//!
//! This crate provides the shared, application-wide half of responsive
//! bindings: the set of named breakpoints and the monitor that reports which
//! of them currently match. Per-element resolution of responsive inputs lives
//! in `flexstory_class`.
//!
//! ## Core Concepts
//!
//! ### Breakpoints
//!
//! A [`Breakpoint`] is an alias (`xs`, `gt-md`, ...) bound to a media query
//! and a priority. [`BreakpointRegistry`] holds them; it is populated once at
//! startup, from code or from a [`LayoutConfig`], and is read-only afterwards.
//!
//! ```rust
//! use flexstory_media::{BreakpointDef, BreakpointRegistry, LayoutConfig};
//!
//! let config = LayoutConfig::new()
//!     .with_breakpoint(BreakpointDef::new("tv", "screen and (min-width: 3840px)", 1100));
//! let registry = BreakpointRegistry::from_config(&config).unwrap();
//!
//! assert!(registry.by_alias("md").is_some());
//! assert_eq!(registry.find("tv").unwrap().priority(), 1100);
//! ```
//!
//! ### Activation
//!
//! [`MediaMonitor`] polls a [`MatchMedia`] source and keeps the
//! [`ActivationState`]: the active breakpoints, highest priority first. In
//! [`ActivationMode::Overlapping`] every match is reported and consumers
//! choose by priority; in [`ActivationMode::Exclusive`] only the winner is.
//!
//! ```rust
//! use std::rc::Rc;
//! use flexstory_media::{
//!     ActivationMode, BreakpointRegistry, MediaMonitor, Viewport, ViewportMatchMedia,
//! };
//!
//! let registry = Rc::new(BreakpointRegistry::with_defaults());
//! let viewport = Rc::new(ViewportMatchMedia::new(Viewport::new(1024, 768)));
//! let monitor = MediaMonitor::new(registry, Rc::clone(&viewport), ActivationMode::Overlapping);
//!
//! assert!(monitor.is_active("md"));
//! assert!(monitor.is_active("gt-sm"));
//!
//! viewport.set_viewport(Viewport::new(375, 812));
//! monitor.sync();
//! assert!(monitor.is_active("xs"));
//! assert!(!monitor.is_active("md"));
//! ```
//!
//! ### Subscriptions
//!
//! [`MediaMonitor::subscribe`] registers a callback for activation flips and
//! returns a [`Subscription`] that cancels on drop. The current state is
//! delivered on subscription.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod breakpoint;
mod config;
mod id;
mod matcher;
mod monitor;
mod registry;
mod viewport;

pub use breakpoint::{Breakpoint, DEFAULT_BREAKPOINTS, ORIENTATION_BREAKPOINTS, StaticBreakpoint};
pub use config::{ActivationMode, BreakpointDef, LayoutConfig};
pub use id::BreakpointId;
pub use matcher::{MatchMedia, MockMatchMedia};
pub use monitor::{ActivationState, BreakpointFilter, MediaChange, MediaMonitor, Subscription};
pub use registry::{BreakpointList, BreakpointRegistry, RegistryError};
pub use viewport::{Orientation, Viewport, ViewportMatchMedia};
