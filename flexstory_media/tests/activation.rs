// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for breakpoint activation as a viewport is resized.
//!
//! These drive a [`MediaMonitor`] from a [`ViewportMatchMedia`], the way a
//! headless host would, and check the reported activation order and flips.

use std::cell::RefCell;
use std::rc::Rc;

use flexstory_media::{
    ActivationMode, BreakpointFilter, BreakpointRegistry, LayoutConfig, MediaMonitor, Viewport,
    ViewportMatchMedia,
};

fn monitor_at(width: u32, mode: ActivationMode) -> (Rc<ViewportMatchMedia>, MediaMonitor) {
    let registry = Rc::new(BreakpointRegistry::with_defaults());
    let viewport = Rc::new(ViewportMatchMedia::new(Viewport::new(width, 800)));
    let monitor = MediaMonitor::new(registry, Rc::clone(&viewport), mode);
    (viewport, monitor)
}

fn active_aliases(monitor: &MediaMonitor) -> Vec<String> {
    monitor
        .active_breakpoints()
        .iter()
        .map(|id| monitor.registry().alias(*id).unwrap().to_string())
        .collect()
}

#[test]
fn each_width_activates_exactly_one_size_tier() {
    for (width, tier) in [(320, "xs"), (700, "sm"), (1100, "md"), (1500, "lg"), (2500, "xl")] {
        let (_viewport, monitor) = monitor_at(width, ActivationMode::Overlapping);
        let active = active_aliases(&monitor);
        let tiers: Vec<_> = active
            .iter()
            .filter(|alias| !alias.contains('-'))
            .collect();
        assert_eq!(tiers, [tier], "width {width}");
        // The exact tier always outranks the overlapping ranges.
        assert_eq!(active[0], tier, "width {width}");
    }
}

#[test]
fn exclusive_mode_reports_only_the_tier() {
    let (viewport, monitor) = monitor_at(1100, ActivationMode::Exclusive);
    assert_eq!(active_aliases(&monitor), ["md"]);

    viewport.set_viewport(Viewport::new(1500, 800));
    let flips: Vec<_> = monitor
        .sync()
        .into_iter()
        .map(|change| (change.alias.to_string(), change.matches))
        .collect();
    assert_eq!(
        flips,
        [("md".to_string(), false), ("lg".to_string(), true)]
    );
}

#[test]
fn resizing_notifies_subscribers_once_per_flip() {
    let (viewport, monitor) = monitor_at(700, ActivationMode::Overlapping);
    let gt_sm = monitor.registry().by_alias("gt-sm").unwrap();

    let flips = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&flips);
    let _subscription = monitor.subscribe(gt_sm, move |change| {
        log.borrow_mut().push(change.matches);
    });
    assert!(flips.borrow().is_empty());

    viewport.set_viewport(Viewport::new(1000, 800));
    monitor.sync();
    viewport.set_viewport(Viewport::new(1200, 800));
    monitor.sync();
    viewport.set_viewport(Viewport::new(800, 800));
    monitor.sync();

    assert_eq!(*flips.borrow(), [true, false]);
}

#[test]
fn orientation_breakpoints_follow_rotation() {
    let config = LayoutConfig::new().with_orientation_breakpoints(true);
    let viewport = Rc::new(ViewportMatchMedia::new(Viewport::new(390, 844)));
    let monitor = MediaMonitor::from_config(&config, Rc::clone(&viewport)).unwrap();
    assert!(monitor.is_active("handset.portrait"));
    assert!(monitor.is_active("handset"));

    viewport.set_viewport(Viewport::new(844, 390));
    monitor.sync();
    assert!(monitor.is_active("handset.landscape"));
    assert!(!monitor.is_active("handset.portrait"));
    assert!(monitor.is_active("handset"));
}

#[test]
fn all_filter_sees_initial_state() {
    let (_viewport, monitor) = monitor_at(320, ActivationMode::Overlapping);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let _subscription = monitor.subscribe(BreakpointFilter::All, move |change| {
        log.borrow_mut().push(change.alias.to_string());
    });
    assert_eq!(*seen.borrow(), active_aliases(&monitor));
}
