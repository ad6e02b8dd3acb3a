// Copyright 2026 the Flexstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for loading [`LayoutConfig`] from JSON.

#![cfg(feature = "serde")]

use flexstory_media::{ActivationMode, BreakpointDef, BreakpointRegistry, LayoutConfig};

#[test]
fn empty_object_is_default_config() {
    let config: LayoutConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, LayoutConfig::default());
}

#[test]
fn custom_breakpoints_from_json() {
    let config: LayoutConfig = serde_json::from_str(
        r#"{
            "add_orientation_breakpoints": true,
            "activation": "exclusive",
            "breakpoints": [
                { "alias": "xs", "media_query": "screen and (max-width: 479px)", "priority": 1000 },
                { "alias": "wide", "media_query": "screen and (min-width: 2560px)", "overlapping": true }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(config.activation, ActivationMode::Exclusive);
    assert_eq!(
        config.breakpoints[1],
        BreakpointDef::new("wide", "screen and (min-width: 2560px)", 0).with_overlapping(true)
    );

    let registry = BreakpointRegistry::from_config(&config).unwrap();
    assert_eq!(
        registry.find("xs").unwrap().media_query(),
        "screen and (max-width: 479px)"
    );
    assert!(registry.find("wide").unwrap().is_overlapping());
    assert!(registry.by_alias("web.landscape").is_some());
}

#[test]
fn config_round_trips_through_json() {
    let config = LayoutConfig::new()
        .with_default_breakpoints_disabled(true)
        .with_breakpoint(BreakpointDef::new("only", "all", 1));
    let json = serde_json::to_string(&config).unwrap();
    let back: LayoutConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
