//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for shell integration tests.

#![allow(dead_code)]

use range_assistant_lib::{RangeAlert, ShellWindow, WindowRegistry};
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// One recorded call on a fake window.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowCall {
    ResetPosition,
    Opacity(f64),
    Range(Value),
}

/// In-memory window that records what the shell did to it.
#[derive(Debug, Clone)]
pub struct FakeWindow {
    label: String,
    calls: Arc<Mutex<Vec<WindowCall>>>,
    fail_sends: bool,
}

impl FakeWindow {
    pub fn new(label: &str) -> Self {
        FakeWindow {
            label: label.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_sends: false,
        }
    }

    /// A window whose event channel is gone (e.g. webview crashed).
    pub fn unreachable(label: &str) -> Self {
        FakeWindow {
            fail_sends: true,
            ..Self::new(label)
        }
    }

    pub fn calls(&self) -> Vec<WindowCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ranges(&self) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WindowCall::Range(range) => Some(range),
                _ => None,
            })
            .collect()
    }

    pub fn resets(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| **call == WindowCall::ResetPosition)
            .count()
    }

    pub fn last_opacity(&self) -> Option<f64> {
        self.calls().into_iter().rev().find_map(|call| match call {
            WindowCall::Opacity(value) => Some(value),
            _ => None,
        })
    }
}

impl ShellWindow for FakeWindow {
    fn label(&self) -> &str {
        &self.label
    }

    fn reset_position(&self) -> Result<(), String> {
        self.calls.lock().unwrap().push(WindowCall::ResetPosition);
        Ok(())
    }

    fn set_opacity(&self, opacity: f64) -> Result<(), String> {
        self.calls.lock().unwrap().push(WindowCall::Opacity(opacity));
        Ok(())
    }

    fn send_range(&self, range: &Value) -> Result<(), String> {
        if self.fail_sends {
            return Err("webview gone".to_string());
        }
        self.calls.lock().unwrap().push(WindowCall::Range(range.clone()));
        Ok(())
    }
}

/// Counts "Invalid Range File" alerts.
#[derive(Debug, Default)]
pub struct RecordingAlert {
    shown: Mutex<usize>,
}

impl RecordingAlert {
    pub fn count(&self) -> usize {
        *self.shown.lock().unwrap()
    }
}

impl RangeAlert for RecordingAlert {
    fn invalid_range_file(&self) {
        *self.shown.lock().unwrap() += 1;
    }
}

/// Test harness: a registry of fake windows plus a scratch directory for range files.
pub struct TestHarness {
    pub registry: WindowRegistry<FakeWindow>,
    pub alert: RecordingAlert,
    dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        TestHarness {
            registry: WindowRegistry::new(),
            alert: RecordingAlert::default(),
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Harness with `count` tracked windows labelled range-0, range-1, ...
    pub fn with_windows(count: usize) -> Self {
        let mut harness = Self::new();
        for i in 0..count {
            harness.open_window(&format!("range-{}", i));
        }
        harness
    }

    pub fn open_window(&mut self, label: &str) -> FakeWindow {
        let window = FakeWindow::new(label);
        self.registry.track(window.clone());
        window
    }

    pub fn windows(&self) -> Vec<FakeWindow> {
        self.registry.snapshot()
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    pub fn missing_file(&self) -> PathBuf {
        self.dir.path().join("does-not-exist.range")
    }
}

pub const VALID_RANGE: &str = r##"{
    "name": "BTN open 2.5x",
    "version": 1,
    "actions": [
        { "name": "raise", "color": "#e0533d" },
        { "name": "fold", "color": "#3d7be0" }
    ],
    "hands": {
        "AA": { "raise": 1.0 },
        "K9s": { "raise": 0.6, "fold": 0.4 },
        "J7o": { "fold": 1.0 }
    }
}"##;

/// Parses as JSON but misses required fields.
pub const NONCONFORMING_RANGE: &str = r#"{ "name": "no hands", "version": 1 }"#;

pub const MALFORMED_RANGE: &str = r#"{ "name": "BTN", "version": 1, "#;
