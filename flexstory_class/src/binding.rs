// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host class-list primitive and an in-memory implementation.

use alloc::collections::BTreeSet;
use alloc::string::String;
use core::convert::Infallible;

use crate::value::ClassValue;

/// The host primitive that owns an element's class list.
///
/// A responsive directive wraps one binding and feeds it the resolved value.
/// The binding does the diffing: it knows which classes it added last time and
/// which belong to the element's static `class` attribute.
///
/// Implementations validate values as they see fit and report failures through
/// [`ClassBinding::Error`]; the directive passes those errors through
/// unchanged.
pub trait ClassBinding {
    /// Error raised for values the binding rejects.
    type Error: core::error::Error + 'static;

    /// Replaces the element's static classes, the ones present regardless of
    /// the applied value.
    ///
    /// # Errors
    ///
    /// Returns an error if the binding rejects `classes`.
    fn set_static_classes(&mut self, classes: Option<&ClassValue>) -> Result<(), Self::Error>;

    /// Applies a new value, replacing the previously applied one.
    ///
    /// # Errors
    ///
    /// Returns an error if the binding rejects `value`.
    fn apply(&mut self, value: Option<&ClassValue>) -> Result<(), Self::Error>;
}

/// An in-memory class list.
///
/// Behaves like a browser element under a class-binding directive:
///
/// - static classes are always present unless the applied value explicitly
///   disables them;
/// - applying a value first removes every class the previous value named,
///   then restores the static classes, then adds the enabled classes of the
///   new value and removes its disabled ones.
///
/// # Example
///
/// ```rust
/// use flexstory_class::{ClassBinding, ClassList, ClassValue};
///
/// let mut list = ClassList::new();
/// list.set_static_classes(Some(&"card".into())).unwrap();
/// list.apply(Some(&"a b".into())).unwrap();
/// assert_eq!(list.to_string(), "a b card");
///
/// list.apply(Some(&ClassValue::from([("b", true), ("card", false)]))).unwrap();
/// assert_eq!(list.to_string(), "b");
///
/// list.apply(None).unwrap();
/// assert_eq!(list.to_string(), "card");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: BTreeSet<String>,
    static_classes: Option<ClassValue>,
    applied: Option<ClassValue>,
    apply_count: usize,
}

impl ClassList {
    /// Creates an empty class list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current classes, sorted.
    pub fn classes(&self) -> impl Iterator<Item = &str> + '_ {
        self.classes.iter().map(String::as_str)
    }

    /// Returns `true` if `class` is present.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Returns the number of classes present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if no class is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Returns the static classes.
    #[must_use]
    pub fn static_classes(&self) -> Option<&ClassValue> {
        self.static_classes.as_ref()
    }

    /// Returns the last applied value.
    #[must_use]
    pub fn applied(&self) -> Option<&ClassValue> {
        self.applied.as_ref()
    }

    /// Returns how many times [`ClassBinding::apply`] was called.
    #[must_use]
    pub fn apply_count(&self) -> usize {
        self.apply_count
    }

    fn remove_named(&mut self, value: Option<&ClassValue>) {
        if let Some(value) = value {
            for (class, _) in value.class_toggles() {
                self.classes.remove(class);
            }
        }
    }

    fn add_static(&mut self) {
        if let Some(value) = &self.static_classes {
            for class in value.enabled_classes() {
                self.classes.insert(String::from(class));
            }
        }
    }

    fn add_applied(&mut self) {
        if let Some(value) = &self.applied {
            for (class, enabled) in value.class_toggles() {
                if enabled {
                    self.classes.insert(String::from(class));
                } else {
                    self.classes.remove(class);
                }
            }
        }
    }
}

impl ClassBinding for ClassList {
    type Error = Infallible;

    fn set_static_classes(&mut self, classes: Option<&ClassValue>) -> Result<(), Infallible> {
        let previous = self.static_classes.take();
        self.remove_named(previous.as_ref());
        self.static_classes = classes.cloned();
        self.add_static();
        self.add_applied();
        Ok(())
    }

    fn apply(&mut self, value: Option<&ClassValue>) -> Result<(), Infallible> {
        self.apply_count += 1;
        let previous = self.applied.take();
        self.remove_named(previous.as_ref());
        self.add_static();
        self.applied = value.cloned();
        self.add_applied();
        Ok(())
    }
}

impl core::fmt::Display for ClassList {
    /// Formats the classes space separated, like an element's `className`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(class)?;
        }
        Ok(())
    }
}
