// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media monitor: breakpoint activation state and change subscriptions.
//!
//! [`MediaMonitor`] wraps a [`MatchMedia`] source. On every
//! [`sync`](MediaMonitor::sync) it re-evaluates each registered breakpoint,
//! updates the shared [`ActivationState`], and notifies subscribers of every
//! breakpoint whose activation flipped.
//!
//! ## Dispatch order
//!
//! Within one sync, deactivations are delivered before activations, each in
//! priority order. Subscribers never observe a half-updated state: the
//! activation state is committed before the first callback runs, and no
//! interior borrow is held while callbacks execute, so a callback may read
//! the monitor or cancel subscriptions (its own included).

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use smallvec::SmallVec;

use crate::config::{ActivationMode, LayoutConfig};
use crate::id::BreakpointId;
use crate::matcher::MatchMedia;
use crate::registry::{BreakpointList, BreakpointRegistry, RegistryError};

/// A single activation flip for one breakpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaChange {
    /// The breakpoint whose state changed.
    pub breakpoint: BreakpointId,
    /// The breakpoint's alias.
    pub alias: Rc<str>,
    /// The breakpoint's media query.
    pub media_query: Rc<str>,
    /// `true` if the breakpoint became active.
    pub matches: bool,
}

/// The set of active breakpoints, highest priority first.
///
/// Owned by a [`MediaMonitor`]; consumers read snapshots of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivationState {
    active: BreakpointList,
    trigger: Option<MediaChange>,
    revision: u64,
}

impl ActivationState {
    /// Builds a state from an arbitrary set of active breakpoints, ordering
    /// them by the registry's priorities.
    #[must_use]
    pub fn from_active(
        registry: &BreakpointRegistry,
        active: impl IntoIterator<Item = BreakpointId>,
    ) -> Self {
        let mut active: BreakpointList = active.into_iter().collect();
        registry.sort_by_priority(&mut active);
        active.dedup();
        Self {
            active,
            trigger: None,
            revision: 0,
        }
    }

    /// Returns the active breakpoints, highest priority first.
    #[must_use]
    pub fn active(&self) -> &[BreakpointId] {
        &self.active
    }

    /// Returns `true` if the breakpoint is active.
    #[must_use]
    pub fn is_active(&self, id: BreakpointId) -> bool {
        self.active.contains(&id)
    }

    /// Returns the highest-priority active breakpoint.
    #[must_use]
    pub fn highest(&self) -> Option<BreakpointId> {
        self.active.first().copied()
    }

    /// Returns `true` if no breakpoint is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Returns the last change that updated this state.
    #[must_use]
    pub fn trigger(&self) -> Option<&MediaChange> {
        self.trigger.as_ref()
    }

    /// Returns a counter bumped on every update.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Which breakpoints a subscription is interested in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BreakpointFilter {
    /// Every registered breakpoint.
    #[default]
    All,
    /// Only the listed breakpoints.
    Only(SmallVec<[BreakpointId; 4]>),
}

impl BreakpointFilter {
    /// Returns `true` if changes to `id` pass the filter.
    #[must_use]
    pub fn accepts(&self, id: BreakpointId) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(&id),
        }
    }
}

impl From<BreakpointId> for BreakpointFilter {
    fn from(id: BreakpointId) -> Self {
        Self::Only(SmallVec::from_slice(&[id]))
    }
}

impl From<&[BreakpointId]> for BreakpointFilter {
    fn from(ids: &[BreakpointId]) -> Self {
        Self::Only(SmallVec::from_slice(ids))
    }
}

type Callback = Rc<RefCell<dyn FnMut(&MediaChange)>>;

struct Listener {
    id: u64,
    filter: BreakpointFilter,
    cancelled: Rc<Cell<bool>>,
    callback: Callback,
}

struct Shared {
    registry: Rc<BreakpointRegistry>,
    source: Box<dyn MatchMedia>,
    mode: ActivationMode,
    state: RefCell<ActivationState>,
    listeners: RefCell<Vec<Listener>>,
    next_listener: Cell<u64>,
}

impl Shared {
    fn remove_listener(&self, id: u64) {
        self.listeners.borrow_mut().retain(|l| l.id != id);
    }
}

/// Observes breakpoint activation through a [`MatchMedia`] source.
///
/// The monitor is created once per application and shared by every
/// responsive binding. It is single-threaded: share it by reference or inside
/// an `Rc`.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use flexstory_media::{
///     ActivationMode, BreakpointFilter, BreakpointRegistry, MediaMonitor, MockMatchMedia,
/// };
///
/// let registry = Rc::new(BreakpointRegistry::with_defaults());
/// let media = Rc::new(MockMatchMedia::new(Rc::clone(&registry)));
/// let monitor = MediaMonitor::new(Rc::clone(&registry), Rc::clone(&media), ActivationMode::Overlapping);
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let log = Rc::clone(&seen);
/// let subscription = monitor.subscribe(BreakpointFilter::All, move |change| {
///     log.borrow_mut().push((change.alias.to_string(), change.matches));
/// });
///
/// media.activate("md", false);
/// monitor.sync();
/// assert_eq!(*seen.borrow(), [("md".to_string(), true)]);
///
/// subscription.cancel();
/// media.activate("lg", false);
/// monitor.sync();
/// assert_eq!(seen.borrow().len(), 1);
/// ```
pub struct MediaMonitor {
    shared: Rc<Shared>,
}

impl MediaMonitor {
    /// Creates a monitor over `source` and polls the initial state.
    pub fn new(
        registry: Rc<BreakpointRegistry>,
        source: impl MatchMedia + 'static,
        mode: ActivationMode,
    ) -> Self {
        let monitor = Self {
            shared: Rc::new(Shared {
                registry,
                source: Box::new(source),
                mode,
                state: RefCell::new(ActivationState::default()),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        };
        monitor.sync();
        monitor
    }

    /// Builds the registry from `config` and creates a monitor over it.
    ///
    /// # Errors
    ///
    /// Propagates registry construction errors.
    pub fn from_config(
        config: &LayoutConfig,
        source: impl MatchMedia + 'static,
    ) -> Result<Self, RegistryError> {
        let registry = BreakpointRegistry::from_config(config)?;
        Ok(Self::new(Rc::new(registry), source, config.activation))
    }

    /// Returns the breakpoint registry.
    #[must_use]
    pub fn registry(&self) -> &Rc<BreakpointRegistry> {
        &self.shared.registry
    }

    /// Returns the activation mode.
    #[must_use]
    pub fn mode(&self) -> ActivationMode {
        self.shared.mode
    }

    /// Returns a snapshot of the activation state.
    #[must_use]
    pub fn activation(&self) -> ActivationState {
        self.shared.state.borrow().clone()
    }

    /// Returns the active breakpoints, highest priority first.
    #[must_use]
    pub fn active_breakpoints(&self) -> BreakpointList {
        self.shared.state.borrow().active.clone()
    }

    /// Returns `true` if the breakpoint with `alias` is active.
    #[must_use]
    pub fn is_active(&self, alias: &str) -> bool {
        self.shared
            .registry
            .by_alias(alias)
            .is_some_and(|id| self.shared.state.borrow().is_active(id))
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.listeners.borrow().len()
    }

    /// Subscribes to activation changes of the breakpoints selected by `filter`.
    ///
    /// Every currently active breakpoint that passes the filter is delivered
    /// immediately (`matches == true`) before this returns, so no initial
    /// activation is missed.
    pub fn subscribe<F>(&self, filter: impl Into<BreakpointFilter>, on_change: F) -> Subscription
    where
        F: FnMut(&MediaChange) + 'static,
    {
        let filter = filter.into();
        let id = self.shared.next_listener.get();
        self.shared.next_listener.set(id + 1);

        let cancelled = Rc::new(Cell::new(false));
        let callback: Callback = Rc::new(RefCell::new(on_change));
        self.shared.listeners.borrow_mut().push(Listener {
            id,
            filter: filter.clone(),
            cancelled: Rc::clone(&cancelled),
            callback: Rc::clone(&callback),
        });
        tracing::trace!(listener = id, ?filter, "media subscription added");

        let subscription = Subscription {
            id,
            cancelled: Rc::clone(&cancelled),
            monitor: Rc::downgrade(&self.shared),
        };

        let active = self.active_breakpoints();
        for breakpoint in active.into_iter().filter(|bp| filter.accepts(*bp)) {
            if cancelled.get() {
                break;
            }
            if let Some(change) = self.change_for(breakpoint, true)
                && let Ok(mut callback) = callback.try_borrow_mut()
            {
                (*callback)(&change);
            }
        }
        subscription
    }

    /// Re-polls the source and notifies subscribers of every flip.
    ///
    /// Returns the changes in dispatch order: deactivations, then
    /// activations, each in priority order.
    pub fn sync(&self) -> Vec<MediaChange> {
        let shared = &self.shared;
        let matched = shared
            .registry
            .resolve_all(|bp| shared.source.matches(bp.media_query()));
        let next: BreakpointList = match shared.mode {
            ActivationMode::Overlapping => matched,
            ActivationMode::Exclusive => {
                // Exact tiers win; a range is reported only when no tier matches.
                let winner = matched
                    .iter()
                    .copied()
                    .find(|id| {
                        shared
                            .registry
                            .get(*id)
                            .is_some_and(|bp| !bp.is_overlapping())
                    })
                    .or_else(|| matched.first().copied());
                winner.into_iter().collect()
            }
        };

        let changes: Vec<MediaChange> = {
            let mut state = shared.state.borrow_mut();
            let deactivated = state.active.iter().filter(|bp| !next.contains(*bp));
            let activated = next.iter().filter(|bp| !state.active.contains(*bp));
            let changes: Vec<_> = deactivated
                .filter_map(|bp| self.change_for(*bp, false))
                .chain(activated.filter_map(|bp| self.change_for(*bp, true)))
                .collect();
            if !changes.is_empty() {
                state.active = next;
                state.trigger = changes.last().cloned();
                state.revision += 1;
            }
            changes
        };

        if !changes.is_empty() {
            tracing::debug!(
                changes = changes.len(),
                active = ?self.active_aliases(),
                "breakpoint activation changed"
            );
        }
        for change in &changes {
            self.dispatch(change);
        }
        changes
    }

    fn dispatch(&self, change: &MediaChange) {
        let targets: SmallVec<[(Rc<Cell<bool>>, Callback); 4]> = self
            .shared
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.filter.accepts(change.breakpoint))
            .map(|l| (Rc::clone(&l.cancelled), Rc::clone(&l.callback)))
            .collect();

        for (cancelled, callback) in targets {
            if cancelled.get() {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut callback) => (*callback)(change),
                Err(_) => tracing::warn!(
                    alias = &*change.alias,
                    "skipping re-entrant media change delivery"
                ),
            }
        }
    }

    fn change_for(&self, breakpoint: BreakpointId, matches: bool) -> Option<MediaChange> {
        let bp = self.shared.registry.get(breakpoint)?;
        Some(MediaChange {
            breakpoint,
            alias: bp.shared_alias(),
            media_query: bp.shared_media_query(),
            matches,
        })
    }

    fn active_aliases(&self) -> Vec<&str> {
        self.shared
            .state
            .borrow()
            .active
            .iter()
            .filter_map(|id| self.shared.registry.alias(*id))
            .collect()
    }
}

impl fmt::Debug for MediaMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaMonitor")
            .field("registry", &self.shared.registry)
            .field("mode", &self.shared.mode)
            .field("state", &self.shared.state.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

/// A live subscription to a [`MediaMonitor`].
///
/// Dropping the subscription cancels it. Once cancelled, the callback is never
/// invoked again, even for changes already being dispatched.
#[must_use = "dropping a subscription cancels it"]
pub struct Subscription {
    id: u64,
    cancelled: Rc<Cell<bool>>,
    monitor: Weak<Shared>,
}

impl Subscription {
    /// Cancels the subscription.
    pub fn cancel(self) {
        drop(self);
    }

    /// Returns `true` until the subscription is cancelled or its monitor is gone.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.cancelled.get() && self.monitor.strong_count() > 0
    }

    fn release(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        if let Some(shared) = self.monitor.upgrade() {
            shared.remove_listener(self.id);
            tracing::trace!(listener = self.id, "media subscription cancelled");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}
