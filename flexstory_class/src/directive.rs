// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The responsive class directive.
//!
//! [`ResponsiveClass`] sits between a host's template engine and a
//! [`ClassBinding`]. The host forwards attribute assignments and
//! change-detection passes; the directive caches the inputs, listens to the
//! shared [`MediaMonitor`] and pushes the resolved value into the binding
//! whenever it changes.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized --first on_detect_changes--> Subscribed --destroy / drop--> TornDown
//! ```
//!
//! Inputs can be assigned in any state before teardown. Nothing is pushed
//! until the first detection pass. After teardown every hook is a no-op.

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use core::cell::{Ref, RefCell};
use core::fmt;

use bitflags::bitflags;
use flexstory_media::{
    ActivationState, BreakpointFilter, BreakpointRegistry, LayoutConfig, MatchMedia, MediaChange,
    MediaMonitor, RegistryError, Subscription,
};
use thiserror::Error;

use crate::attributes::AttributeTable;
use crate::binding::ClassBinding;
use crate::cache::{InputCache, InputKey};
use crate::resolve::{ResolvedSource, resolve};
use crate::value::ClassValue;

/// Shared, application-wide state for responsive class directives.
///
/// Built once at startup and handed to every directive instance.
pub struct DirectiveContext {
    monitor: MediaMonitor,
    attributes: AttributeTable,
}

impl DirectiveContext {
    /// Wraps `monitor` and builds the attribute table for its registry.
    #[must_use]
    pub fn new(monitor: MediaMonitor) -> Rc<Self> {
        let attributes = AttributeTable::from_registry(monitor.registry());
        Rc::new(Self {
            monitor,
            attributes,
        })
    }

    /// Builds the registry and monitor from `config`.
    ///
    /// # Errors
    ///
    /// Propagates registry construction errors.
    pub fn from_config(
        config: &LayoutConfig,
        source: impl MatchMedia + 'static,
    ) -> Result<Rc<Self>, RegistryError> {
        Ok(Self::new(MediaMonitor::from_config(config, source)?))
    }

    /// Returns the shared media monitor.
    #[must_use]
    pub fn monitor(&self) -> &MediaMonitor {
        &self.monitor
    }

    /// Returns the attribute dispatch table.
    #[must_use]
    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }

    /// Returns the breakpoint registry.
    #[must_use]
    pub fn registry(&self) -> &BreakpointRegistry {
        self.monitor.registry()
    }
}

impl fmt::Debug for DirectiveContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveContext")
            .field("monitor", &self.monitor)
            .field("attributes", &self.attributes.len())
            .finish_non_exhaustive()
    }
}

/// Lifecycle state of a [`ResponsiveClass`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DirectiveState {
    /// Created; not yet listening to media changes.
    #[default]
    Uninitialized,
    /// Listening to media changes.
    Subscribed,
    /// Destroyed. The subscription is cancelled and the cache discarded.
    TornDown,
}

/// Errors reported by [`ResponsiveClass`].
#[derive(Debug, Error)]
pub enum DirectiveError<E> {
    /// The attribute name is not a class input.
    #[error("unknown class attribute `{0}`")]
    UnknownAttribute(String),
    /// The class binding rejected a value.
    #[error(transparent)]
    Binding(E),
}

bitflags! {
    /// What changed since the last push.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    struct PendingChanges: u8 {
        /// An input was assigned or cleared.
        const INPUTS = 1 << 0;
        /// Breakpoint activation changed.
        const MEDIA = 1 << 1;
    }
}

struct Inner<B> {
    binding: B,
    cache: InputCache,
    state: DirectiveState,
    pending: PendingChanges,
    resolved: Option<ClassValue>,
    source: ResolvedSource,
    subscription: Option<Subscription>,
}

impl<B: ClassBinding> Inner<B> {
    /// Resolves if anything is pending and pushes the result if it differs
    /// from the last pushed value.
    fn refresh(&mut self, activation: &ActivationState) -> Result<(), B::Error> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let pending = core::mem::take(&mut self.pending);

        let resolution = resolve(activation, &self.cache);
        let source = resolution.source;
        let value = resolution.value.cloned();
        if value == self.resolved {
            self.source = source;
            tracing::trace!(?source, "resolved class value unchanged");
            return Ok(());
        }

        if let Err(err) = self.binding.apply(value.as_ref()) {
            self.pending |= pending;
            return Err(err);
        }
        tracing::debug!(?source, ?pending, "pushed resolved class value");
        self.resolved = value;
        self.source = source;
        Ok(())
    }
}

/// A responsive class directive instance wrapping a [`ClassBinding`].
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use flexstory_class::{ClassList, DirectiveContext, ResponsiveClass};
/// use flexstory_media::{
///     ActivationMode, BreakpointRegistry, MediaMonitor, MockMatchMedia,
/// };
///
/// let registry = Rc::new(BreakpointRegistry::with_defaults());
/// let media = Rc::new(MockMatchMedia::new(Rc::clone(&registry)));
/// let monitor = MediaMonitor::new(registry, Rc::clone(&media), ActivationMode::Overlapping);
/// let context = DirectiveContext::new(monitor);
///
/// let mut directive = ResponsiveClass::new(Rc::clone(&context), ClassList::new());
/// directive.on_input_changed("class", Some("existing".into())).unwrap();
/// directive.on_input_changed("ngClass", Some("c1".into())).unwrap();
/// directive.on_input_changed("ngClass.xs", Some("xs-class".into())).unwrap();
/// directive.on_detect_changes().unwrap();
/// assert_eq!(directive.binding().to_string(), "c1 existing");
///
/// media.activate("xs", false);
/// context.monitor().sync();
/// assert_eq!(directive.binding().to_string(), "existing xs-class");
/// ```
pub struct ResponsiveClass<B: ClassBinding + 'static> {
    context: Rc<DirectiveContext>,
    inner: Rc<RefCell<Inner<B>>>,
}

impl<B: ClassBinding + 'static> ResponsiveClass<B> {
    /// Creates a directive over `binding`. Nothing is subscribed or pushed
    /// until the first [`on_detect_changes`](Self::on_detect_changes).
    #[must_use]
    pub fn new(context: Rc<DirectiveContext>, binding: B) -> Self {
        Self {
            context,
            inner: Rc::new(RefCell::new(Inner {
                binding,
                cache: InputCache::new(),
                state: DirectiveState::Uninitialized,
                pending: PendingChanges::INPUTS,
                resolved: None,
                source: ResolvedSource::Empty,
                subscription: None,
            })),
        }
    }

    /// Returns the shared context.
    #[must_use]
    pub fn context(&self) -> &Rc<DirectiveContext> {
        &self.context
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> DirectiveState {
        self.inner.borrow().state
    }

    /// Returns the value last pushed into the binding.
    #[must_use]
    pub fn resolved(&self) -> Option<ClassValue> {
        self.inner.borrow().resolved.clone()
    }

    /// Returns where the last resolution came from.
    #[must_use]
    pub fn resolved_source(&self) -> ResolvedSource {
        self.inner.borrow().source
    }

    /// Borrows the input cache.
    ///
    /// # Panics
    ///
    /// Panics if called from inside the wrapped binding.
    #[must_use]
    pub fn cache(&self) -> Ref<'_, InputCache> {
        Ref::map(self.inner.borrow(), |inner| &inner.cache)
    }

    /// Borrows the wrapped binding.
    ///
    /// # Panics
    ///
    /// Panics if called from inside the wrapped binding.
    #[must_use]
    pub fn binding(&self) -> Ref<'_, B> {
        Ref::map(self.inner.borrow(), |inner| &inner.binding)
    }

    /// Stores `value` for `key` and marks the directive dirty.
    ///
    /// The raw fallback also becomes the binding's static classes right away,
    /// so raw and structured classes stay additive. If the raw fallback is
    /// the value currently applied, it is re-applied immediately as well.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::Binding`] if the binding rejects the static
    /// classes.
    pub fn set_for(
        &mut self,
        key: InputKey,
        value: impl Into<ClassValue>,
    ) -> Result<(), DirectiveError<B::Error>> {
        self.store(key, Some(value.into()))
    }

    /// Removes the value for `key` and marks the directive dirty.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::Binding`] if clearing the raw fallback's
    /// static classes fails.
    pub fn clear_for(&mut self, key: InputKey) -> Result<(), DirectiveError<B::Error>> {
        self.store(key, None)
    }

    fn store(
        &mut self,
        key: InputKey,
        value: Option<ClassValue>,
    ) -> Result<(), DirectiveError<B::Error>> {
        let mut inner = self.inner.borrow_mut();
        if inner.state == DirectiveState::TornDown {
            return Ok(());
        }
        if key == InputKey::RawFallback {
            inner
                .binding
                .set_static_classes(value.as_ref())
                .map_err(DirectiveError::Binding)?;
        }
        tracing::trace!(?key, set = value.is_some(), "class input changed");
        match value {
            Some(value) => {
                inner.cache.set(key, value);
            }
            None => {
                inner.cache.remove(key);
            }
        }
        inner.pending |= PendingChanges::INPUTS;

        // The applied value is the old raw class; replace it with the new one
        // so the element never shows both.
        if key == InputKey::RawFallback
            && inner.state == DirectiveState::Subscribed
            && inner.source == ResolvedSource::RawFallback
        {
            let activation = self.context.monitor().activation();
            inner.refresh(&activation).map_err(DirectiveError::Binding)?;
        }
        Ok(())
    }

    /// Dispatches a template attribute assignment; `None` clears the input.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::UnknownAttribute`] for names that are not
    /// class inputs, and passes binding errors through.
    pub fn on_input_changed(
        &mut self,
        attribute: &str,
        value: Option<ClassValue>,
    ) -> Result<(), DirectiveError<B::Error>> {
        if self.state() == DirectiveState::TornDown {
            return Ok(());
        }
        let Some(attr) = self.context.attributes().lookup(attribute) else {
            return Err(DirectiveError::UnknownAttribute(String::from(attribute)));
        };
        self.store(attr.key, value)
    }

    /// Runs a change-detection pass.
    ///
    /// The first pass subscribes to the media monitor. Every pass resolves if
    /// inputs or activation changed and pushes the result into the binding if
    /// it differs from the last pushed value.
    ///
    /// # Errors
    ///
    /// Passes binding errors through. The change stays pending and is retried
    /// on the next pass.
    pub fn on_detect_changes(&mut self) -> Result<(), DirectiveError<B::Error>> {
        match self.state() {
            DirectiveState::TornDown => return Ok(()),
            DirectiveState::Uninitialized => self.subscribe(),
            DirectiveState::Subscribed => {}
        }
        let activation = self.context.monitor().activation();
        self.inner
            .borrow_mut()
            .refresh(&activation)
            .map_err(DirectiveError::Binding)
    }

    /// Tears the directive down: cancels the media subscription and discards
    /// the cached inputs. Idempotent; also runs on drop.
    pub fn destroy(&mut self) {
        let subscription = {
            let Ok(mut inner) = self.inner.try_borrow_mut() else {
                tracing::warn!("responsive class destroyed while borrowed");
                return;
            };
            if inner.state == DirectiveState::TornDown {
                return;
            }
            inner.state = DirectiveState::TornDown;
            inner.cache.clear();
            inner.pending = PendingChanges::empty();
            inner.subscription.take()
        };
        drop(subscription);
        tracing::debug!("responsive class torn down");
    }

    fn subscribe(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.state = DirectiveState::Subscribed;
            inner.pending |= PendingChanges::MEDIA;
        }

        let weak_inner = Rc::downgrade(&self.inner);
        let weak_context = Rc::downgrade(&self.context);
        let subscription = self
            .context
            .monitor()
            .subscribe(BreakpointFilter::All, move |change| {
                on_media_change(&weak_inner, &weak_context, change);
            });
        tracing::debug!("responsive class subscribed to media changes");
        self.inner.borrow_mut().subscription = Some(subscription);
    }
}

/// Handles a media change delivered by the monitor.
///
/// Changes delivered while the subscription is being set up only mark the
/// directive dirty; the detection pass that subscribed pushes once.
fn on_media_change<B: ClassBinding>(
    inner: &Weak<RefCell<Inner<B>>>,
    context: &Weak<DirectiveContext>,
    change: &MediaChange,
) {
    let (Some(inner), Some(context)) = (inner.upgrade(), context.upgrade()) else {
        return;
    };
    let Ok(mut inner) = inner.try_borrow_mut() else {
        tracing::warn!(alias = &*change.alias, "skipping re-entrant class refresh");
        return;
    };
    if inner.state != DirectiveState::Subscribed {
        return;
    }
    inner.pending |= PendingChanges::MEDIA;
    if inner.subscription.is_none() {
        return;
    }
    tracing::trace!(
        alias = &*change.alias,
        matches = change.matches,
        "media change for responsive class"
    );
    let activation = context.monitor().activation();
    if let Err(err) = inner.refresh(&activation) {
        tracing::warn!(error = %err, "class binding rejected resolved value");
    }
}

impl<B: ClassBinding + 'static> Drop for ResponsiveClass<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<B: ClassBinding + fmt::Debug + 'static> fmt::Debug for ResponsiveClass<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(inner) = self.inner.try_borrow() else {
            return f.debug_struct("ResponsiveClass").finish_non_exhaustive();
        };
        f.debug_struct("ResponsiveClass")
            .field("state", &inner.state)
            .field("binding", &inner.binding)
            .field("cache", &inner.cache)
            .field("resolved", &inner.resolved)
            .field("source", &inner.source)
            .finish_non_exhaustive()
    }
}
