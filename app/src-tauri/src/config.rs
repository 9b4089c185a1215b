//! FILENAME: app/src-tauri/src/config.rs
// PURPOSE: Runtime shell configuration (build-mode defaults + environment overrides).
// CONTEXT: Static window/bundle settings live in tauri.conf.json; this covers the
//          values the shell itself reads.

use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// CONSTANTS
// ============================================================================

pub const WINDOW_TITLE: &str = "Range Assistant";
pub const WINDOW_WIDTH: f64 = 330.0;
pub const WINDOW_HEIGHT: f64 = 426.0;

/// Opacity applied to every window while the application is in the background.
pub const BLURRED_OPACITY: f64 = 0.3;
pub const FOCUSED_OPACITY: f64 = 1.0;

/// Production range builder. Navigation to anything under it is redirected to
/// the external browser.
pub const PROD_BUILDER_URL: &str = "https://rangeassistant.holdem.tools";
pub const DEV_BUILDER_URL: &str = "http://localhost:3001";

/// UI dev server (matches `build.devUrl` in tauri.conf.json).
pub const DEV_SERVER_URL: &str = "http://localhost:3000/";

/// Bundled entry page used in production builds.
pub const APP_ENTRY: &str = "index.html";

pub const DEFAULT_DISPLAY_POLL_MS: u64 = 2000;

pub const ENV_DEV_SERVER_URL: &str = "RANGE_ASSISTANT_DEV_SERVER_URL";
pub const ENV_BUILDER_URL: &str = "RANGE_ASSISTANT_BUILDER_URL";
pub const ENV_LOG_LEVEL: &str = "RANGE_ASSISTANT_LOG_LEVEL";
pub const ENV_DISPLAY_POLL_MS: &str = "RANGE_ASSISTANT_DISPLAY_POLL_MS";

// ============================================================================
// SHELL CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShellConfig {
    /// Development build: dev server, devtools, debug logging.
    pub dev_mode: bool,
    pub dev_server_url: String,
    /// Where "open the range builder" actions send the user.
    pub builder_url: String,
    /// Navigation targets starting with this prefix are opened externally.
    pub builder_match_prefix: String,
    pub log_level: String,
    pub display_poll_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig::for_mode(cfg!(debug_assertions))
    }
}

impl ShellConfig {
    pub fn for_mode(dev_mode: bool) -> Self {
        ShellConfig {
            dev_mode,
            dev_server_url: DEV_SERVER_URL.to_string(),
            builder_url: if dev_mode { DEV_BUILDER_URL } else { PROD_BUILDER_URL }.to_string(),
            builder_match_prefix: PROD_BUILDER_URL.to_string(),
            log_level: if dev_mode { "debug" } else { "info" }.to_string(),
            display_poll_ms: DEFAULT_DISPLAY_POLL_MS,
        }
    }

    /// Build-mode defaults with `RANGE_ASSISTANT_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Empty or unparsable values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = value(ENV_DEV_SERVER_URL) {
            self.dev_server_url = url;
        }
        if let Some(url) = value(ENV_BUILDER_URL) {
            self.builder_url = url;
        }
        if let Some(level) = value(ENV_LOG_LEVEL).filter(|l| LogLevel::parse(l).is_some()) {
            self.log_level = level;
        }
        if let Some(ms) = value(ENV_DISPLAY_POLL_MS).and_then(|v| v.trim().parse::<u64>().ok()) {
            if ms > 0 {
                self.display_poll_ms = ms;
            }
        }
        self
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.log_level).unwrap_or(LogLevel::Info)
    }

    pub fn display_poll_interval(&self) -> Duration {
        Duration::from_millis(self.display_poll_ms.max(1))
    }
}
