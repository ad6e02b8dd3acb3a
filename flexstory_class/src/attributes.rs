// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping from template attribute names to input keys.
//!
//! A responsive class directive accepts one input per breakpoint for each of
//! the two class syntaxes. Instead of one setter per attribute, the names are
//! generated once from the registry and dispatched through [`AttributeTable`].

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

use flexstory_media::BreakpointRegistry;

use crate::cache::InputKey;

/// Name of the raw class attribute.
pub const RAW_CLASS: &str = "class";

/// Name of the structured class input.
pub const STRUCTURED_CLASS: &str = "ngClass";

/// The syntax an attribute belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeFamily {
    /// `class` and `class.<alias>`.
    Raw,
    /// `ngClass` and `ngClass.<alias>`.
    Structured,
}

impl AttributeFamily {
    /// Returns the attribute name prefix of this family.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Raw => RAW_CLASS,
            Self::Structured => STRUCTURED_CLASS,
        }
    }
}

/// A known attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Which syntax the attribute uses.
    pub family: AttributeFamily,
    /// The input it writes.
    pub key: InputKey,
}

/// Attribute-name dispatch table, built from a [`BreakpointRegistry`].
///
/// Both families qualified by the same alias write the same input, so
/// `class.md` and `ngClass.md` are interchangeable. The unqualified names
/// differ: `class` is the raw fallback and `ngClass` is the base.
///
/// # Example
///
/// ```rust
/// use flexstory_class::{AttributeFamily, AttributeTable, InputKey};
/// use flexstory_media::BreakpointRegistry;
///
/// let registry = BreakpointRegistry::with_defaults();
/// let table = AttributeTable::from_registry(&registry);
/// let gt_sm = registry.by_alias("gt-sm").unwrap();
///
/// assert_eq!(table.lookup("class").unwrap().key, InputKey::RawFallback);
/// assert_eq!(table.lookup("ngClass").unwrap().key, InputKey::Base);
///
/// let attr = table.lookup("ngClass.gt-sm").unwrap();
/// assert_eq!(attr.family, AttributeFamily::Structured);
/// assert_eq!(attr.key, InputKey::Breakpoint(gt_sm));
/// assert!(table.lookup("ngClass.huge").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct AttributeTable {
    names: Vec<String>,
    by_name: HashMap<String, Attribute>,
}

impl AttributeTable {
    /// Builds the table for every breakpoint in `registry`.
    #[must_use]
    pub fn from_registry(registry: &BreakpointRegistry) -> Self {
        let mut table = Self::default();
        for family in [AttributeFamily::Raw, AttributeFamily::Structured] {
            let key = match family {
                AttributeFamily::Raw => InputKey::RawFallback,
                AttributeFamily::Structured => InputKey::Base,
            };
            table.insert(String::from(family.prefix()), Attribute { family, key });
            for (id, bp) in registry.iter() {
                table.insert(
                    format!("{}.{}", family.prefix(), bp.alias()),
                    Attribute {
                        family,
                        key: InputKey::Breakpoint(id),
                    },
                );
            }
        }
        tracing::trace!(attributes = table.len(), "attribute table built");
        table
    }

    fn insert(&mut self, name: String, attribute: Attribute) {
        if self.by_name.insert(name.clone(), attribute).is_none() {
            self.names.push(name);
        }
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Attribute> {
        self.by_name.get(name).copied()
    }

    /// Returns the number of known attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the table has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over attributes in construction order: the raw family first,
    /// each family's unqualified name before its breakpoints.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Attribute)> + '_ {
        self.names
            .iter()
            .filter_map(|name| Some((name.as_str(), *self.by_name.get(name)?)))
    }
}
