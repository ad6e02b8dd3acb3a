// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The class value union accepted by class inputs.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// A class input value.
///
/// Mirrors the shapes a template may bind to a class input: a
/// whitespace-separated string, a list, a set, or a map from class name to an
/// enabled flag.
///
/// ```rust
/// use flexstory_class::ClassValue;
///
/// let text = ClassValue::from("card  elevated");
/// assert_eq!(text.class_toggles(), [("card", true), ("elevated", true)]);
///
/// let map = ClassValue::from([("card", true), ("hidden", false)]);
/// assert_eq!(map.class_toggles(), [("card", true), ("hidden", false)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClassValue {
    /// Whitespace-separated class names.
    Text(String),
    /// Class names, one per entry. Entries may contain whitespace.
    List(Vec<String>),
    /// A set of class names.
    Set(BTreeSet<String>),
    /// Class names mapped to whether they are enabled.
    Map(BTreeMap<String, bool>),
}

impl ClassValue {
    /// Returns each class name paired with whether it is enabled.
    ///
    /// Entries are split on whitespace; blank names are skipped. Only
    /// [`ClassValue::Map`] can produce disabled entries.
    #[must_use]
    pub fn class_toggles(&self) -> Vec<(&str, bool)> {
        match self {
            Self::Text(text) => text.split_whitespace().map(|c| (c, true)).collect(),
            Self::List(list) => list
                .iter()
                .flat_map(|entry| entry.split_whitespace())
                .map(|c| (c, true))
                .collect(),
            Self::Set(set) => set
                .iter()
                .flat_map(|entry| entry.split_whitespace())
                .map(|c| (c, true))
                .collect(),
            Self::Map(map) => map
                .iter()
                .flat_map(|(entry, enabled)| entry.split_whitespace().map(|c| (c, *enabled)))
                .collect(),
        }
    }

    /// Returns the names of the enabled classes.
    #[must_use]
    pub fn enabled_classes(&self) -> Vec<&str> {
        self.class_toggles()
            .into_iter()
            .filter_map(|(class, enabled)| enabled.then_some(class))
            .collect()
    }

    /// Returns `true` if the value names no class at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(list) => list.iter().all(|c| c.trim().is_empty()),
            Self::Set(set) => set.iter().all(|c| c.trim().is_empty()),
            Self::Map(map) => map.keys().all(|c| c.trim().is_empty()),
        }
    }
}

impl Default for ClassValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for ClassValue {
    /// Formats the enabled classes, space separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, class) in self.enabled_classes().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(class)?;
        }
        Ok(())
    }
}

impl From<&str> for ClassValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ClassValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for ClassValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for ClassValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(String::from).collect())
    }
}

impl From<BTreeSet<String>> for ClassValue {
    fn from(value: BTreeSet<String>) -> Self {
        Self::Set(value)
    }
}

impl From<BTreeMap<String, bool>> for ClassValue {
    fn from(value: BTreeMap<String, bool>) -> Self {
        Self::Map(value)
    }
}

impl<const N: usize> From<[(&str, bool); N]> for ClassValue {
    fn from(value: [(&str, bool); N]) -> Self {
        Self::Map(
            value
                .into_iter()
                .map(|(class, enabled)| (class.to_string(), enabled))
                .collect(),
        )
    }
}

impl<const N: usize> From<[&str; N]> for ClassValue {
    fn from(value: [&str; N]) -> Self {
        Self::List(value.into_iter().map(String::from).collect())
    }
}
