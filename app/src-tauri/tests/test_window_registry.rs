//! FILENAME: tests/test_window_registry.rs
//! Integration tests for the window registry, display reconciliation and
//! focus dimming.

mod common;

use common::{FakeWindow, TestHarness};
use range_assistant_lib::config::{BLURRED_OPACITY, FOCUSED_OPACITY};
use range_assistant_lib::registry::{apply_opacity, reset_positions};
use range_assistant_lib::{DisplayDescriptor, DisplayTracker, WebPreferences};

fn display(name: &str) -> DisplayDescriptor {
    DisplayDescriptor::new(Some(name), 0, 0, 2560, 1440, 2.0)
}

// ============================================================================
// TRACKING
// ============================================================================

#[test]
fn test_size_follows_open_and_close() {
    let mut harness = TestHarness::new();
    assert!(harness.registry.is_empty());

    harness.open_window("range-a");
    harness.open_window("range-b");
    assert_eq!(harness.registry.len(), 2);

    assert!(harness.registry.untrack("range-a").is_some());
    assert_eq!(harness.registry.len(), 1);
    assert!(!harness.registry.contains("range-a"));

    assert!(harness.registry.untrack("range-b").is_some());
    assert!(harness.registry.is_empty());
}

#[test]
fn test_untrack_unknown_label_is_noop() {
    let mut harness = TestHarness::with_windows(1);
    assert!(harness.registry.untrack("range-zzz").is_none());
    assert_eq!(harness.registry.len(), 1);
}

#[test]
fn test_tracking_same_label_replaces() {
    let mut harness = TestHarness::new();
    harness.open_window("range-a");
    harness.open_window("range-a");
    assert_eq!(harness.registry.labels(), vec!["range-a".to_string()]);
}

#[test]
fn test_snapshot_keeps_creation_order() {
    let harness = TestHarness::with_windows(3);
    assert_eq!(
        harness.registry.labels(),
        vec!["range-0".to_string(), "range-1".to_string(), "range-2".to_string()]
    );
}

// ============================================================================
// ATTACH SANCTIONING
// ============================================================================

#[test]
fn test_only_issued_sanctioned_labels_may_attach() {
    let mut harness = TestHarness::new();
    let sanctioned = WebPreferences::sanctioned("/* preload */", false);

    harness.registry.issue("range-a", sanctioned.clone());
    assert!(harness.registry.is_sanctioned("range-a", &sanctioned));
    assert!(!harness.registry.is_sanctioned("range-b", &sanctioned));
}

#[test]
fn test_mismatched_preferences_are_rejected() {
    let mut harness = TestHarness::new();
    let sanctioned = WebPreferences::sanctioned("/* preload */", false);

    harness.registry.issue("range-dev", WebPreferences::sanctioned("/* preload */", true));
    harness.registry.issue("range-other", WebPreferences::sanctioned("/* injected */", false));

    assert!(!harness.registry.is_sanctioned("range-dev", &sanctioned));
    assert!(!harness.registry.is_sanctioned("range-other", &sanctioned));
}

#[test]
fn test_untrack_revokes_sanction() {
    let mut harness = TestHarness::new();
    let sanctioned = WebPreferences::sanctioned("/* preload */", false);
    harness.registry.issue("range-a", sanctioned.clone());
    harness.open_window("range-a");

    harness.registry.untrack("range-a");
    assert!(!harness.registry.is_sanctioned("range-a", &sanctioned));
}

// ============================================================================
// DISPLAY RECONCILIATION
// ============================================================================

#[test]
fn test_primary_change_resets_every_window() {
    let harness = TestHarness::with_windows(3);
    let mut tracker = DisplayTracker::new();
    tracker.prime(Some(display("DELL U2720Q")), String::new());

    if tracker.reconcile(Some(display("Built-in Retina Display"))) {
        reset_positions(&harness.windows());
    }

    assert_eq!(tracker.primary().unwrap().id, "Built-in Retina Display");
    for window in harness.windows() {
        assert_eq!(window.resets(), 1);
    }
}

#[test]
fn test_same_primary_does_not_reset() {
    let harness = TestHarness::with_windows(2);
    let mut tracker = DisplayTracker::new();
    tracker.prime(Some(display("DELL U2720Q")), String::new());

    let mut moved = DisplayDescriptor::new(Some("DELL U2720Q"), -2560, 0, 2560, 1440, 2.0);
    moved.scale_factor = 1.0;
    if tracker.reconcile(Some(moved)) {
        reset_positions(&harness.windows());
    }

    for window in harness.windows() {
        assert_eq!(window.resets(), 0);
    }
}

#[test]
fn test_missing_reading_keeps_cache() {
    let mut tracker = DisplayTracker::new();
    tracker.prime(Some(display("DELL U2720Q")), String::new());

    assert!(!tracker.reconcile(None));
    assert_eq!(tracker.primary().unwrap().id, "DELL U2720Q");
}

#[test]
fn test_unnamed_display_uses_geometry_id() {
    let a = DisplayDescriptor::new(None, 0, 0, 1920, 1080, 1.0);
    let b = DisplayDescriptor::new(Some("  "), 1920, 0, 1920, 1080, 1.0);
    assert_eq!(a.id, "1920x1080@0,0");
    assert_ne!(a.id, b.id);
}

// ============================================================================
// FOCUS DIMMING
// ============================================================================

#[test]
fn test_blur_dims_and_focus_restores_all_windows() {
    let harness = TestHarness::with_windows(2);

    apply_opacity(&harness.windows(), BLURRED_OPACITY);
    for window in harness.windows() {
        assert_eq!(window.last_opacity(), Some(BLURRED_OPACITY));
    }

    apply_opacity(&harness.windows(), FOCUSED_OPACITY);
    for window in harness.windows() {
        assert_eq!(window.last_opacity(), Some(1.0));
    }
}

#[test]
fn test_window_opened_later_is_unaffected_by_earlier_dim() {
    let mut harness = TestHarness::with_windows(1);
    apply_opacity(&harness.windows(), BLURRED_OPACITY);

    let late: FakeWindow = harness.open_window("range-late");
    assert_eq!(late.last_opacity(), None);
}
