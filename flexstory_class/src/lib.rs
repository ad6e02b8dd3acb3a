// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flexstory Class: responsive class bindings.
//!
//! A template binds class inputs per breakpoint (`ngClass.xs`, `class.gt-md`,
//! ...). This crate caches those inputs per element, picks the one that applies
//! to the active breakpoints, and pushes it into the element's class list when
//! it changes.
//!
//! ## Resolution
//!
//! For each element the effective value is chosen from its [`InputCache`]:
//!
//! **Highest-priority active breakpoint with an entry → `ngClass` → `class` → nothing**
//!
//! The raw `class` attribute is additionally kept on the element as static
//! classes, so it merges with whatever structured value wins.
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use flexstory_class::{ClassList, DirectiveContext, ResponsiveClass};
//! use flexstory_media::{LayoutConfig, Viewport, ViewportMatchMedia};
//!
//! let viewport = Rc::new(ViewportMatchMedia::new(Viewport::new(1280, 800)));
//! let context = DirectiveContext::from_config(&LayoutConfig::new(), Rc::clone(&viewport)).unwrap();
//!
//! let mut card = ResponsiveClass::new(Rc::clone(&context), ClassList::new());
//! card.on_input_changed("class", Some("card".into())).unwrap();
//! card.on_input_changed("ngClass", Some("roomy".into())).unwrap();
//! card.on_input_changed("ngClass.lt-md", Some("compact".into())).unwrap();
//! card.on_detect_changes().unwrap();
//! assert_eq!(card.binding().to_string(), "card roomy");
//!
//! viewport.set_viewport(Viewport::new(600, 800));
//! context.monitor().sync();
//! assert_eq!(card.binding().to_string(), "card compact");
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod attributes;
mod binding;
mod cache;
mod directive;
mod resolve;
mod value;

pub use attributes::{Attribute, AttributeFamily, AttributeTable, RAW_CLASS, STRUCTURED_CLASS};
pub use binding::{ClassBinding, ClassList};
pub use cache::{InputCache, InputKey};
pub use directive::{DirectiveContext, DirectiveError, DirectiveState, ResponsiveClass};
pub use resolve::{Resolution, ResolvedSource, resolve, resolve_ordered};
pub use value::ClassValue;
