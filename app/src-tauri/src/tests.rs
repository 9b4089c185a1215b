#[cfg(test)]
use super::*;
use crate::config::*;
use crate::lifecycle::{launch_paths, opened_paths};
use crate::menu::{action_enabled, menu_template, MenuEntry, Predefined, MENU_NEW_WINDOW, MENU_OPEN_BUILDER, MENU_OPEN_RANGE};
use crate::window::{new_window_label, window_url, WINDOW_LABEL_PREFIX};
use std::ffi::OsString;
use std::path::PathBuf;
use tauri::{Url, WebviewUrl};

// ============================================================================
// CONFIG
// ============================================================================

#[test]
fn test_dev_mode_defaults() {
    let config = ShellConfig::for_mode(true);
    assert_eq!(config.builder_url, DEV_BUILDER_URL);
    assert_eq!(config.builder_match_prefix, PROD_BUILDER_URL);
    assert_eq!(config.log_level(), LogLevel::Debug);
}

#[test]
fn test_production_defaults() {
    let config = ShellConfig::for_mode(false);
    assert_eq!(config.builder_url, PROD_BUILDER_URL);
    assert_eq!(config.log_level(), LogLevel::Info);
    assert_eq!(config.display_poll_ms, DEFAULT_DISPLAY_POLL_MS);
}

#[test]
fn test_env_overrides() {
    let config = ShellConfig::for_mode(false).with_overrides(|key| match key {
        ENV_BUILDER_URL => Some("https://staging.holdem.tools".to_string()),
        ENV_LOG_LEVEL => Some("warn".to_string()),
        ENV_DISPLAY_POLL_MS => Some("500".to_string()),
        _ => None,
    });
    assert_eq!(config.builder_url, "https://staging.holdem.tools");
    assert_eq!(config.log_level(), LogLevel::Warn);
    assert_eq!(config.display_poll_interval().as_millis(), 500);
}

#[test]
fn test_bad_env_overrides_are_ignored() {
    let config = ShellConfig::for_mode(false).with_overrides(|key| match key {
        ENV_LOG_LEVEL => Some("loud".to_string()),
        ENV_DISPLAY_POLL_MS => Some("0".to_string()),
        ENV_DEV_SERVER_URL => Some("   ".to_string()),
        _ => None,
    });
    assert_eq!(config, ShellConfig::for_mode(false));
}

#[test]
fn test_config_serializes_camel_case() {
    let json = serde_json::to_value(ShellConfig::for_mode(false)).unwrap();
    assert_eq!(json["builderUrl"], PROD_BUILDER_URL);
    assert_eq!(json["devMode"], false);
}

// ============================================================================
// LOGGING
// ============================================================================

#[test]
fn test_log_level_parse() {
    assert_eq!(LogLevel::parse("D"), Some(LogLevel::Debug));
    assert_eq!(LogLevel::parse("Info"), Some(LogLevel::Info));
    assert_eq!(LogLevel::parse(" warning "), Some(LogLevel::Warn));
    assert_eq!(LogLevel::parse("e"), Some(LogLevel::Error));
    assert_eq!(LogLevel::parse("verbose"), None);
}

#[test]
fn test_log_line_format() {
    assert_eq!(
        logging::format_line(7, "D", "RANGE", "rejected /tmp/x.range"),
        "7|D|RANGE|rejected /tmp/x.range"
    );
}

#[test]
fn test_sequence_is_monotonic() {
    let first = next_seq();
    let second = next_seq();
    assert!(second > first);
}

// ============================================================================
// MENU TEMPLATE
// ============================================================================

#[test]
fn test_import_item_follows_flag() {
    assert_eq!(action_enabled(&menu_template(true, false), MENU_OPEN_RANGE), Some(true));
    assert_eq!(action_enabled(&menu_template(false, false), MENU_OPEN_RANGE), Some(false));
}

#[test]
fn test_new_window_always_enabled() {
    assert_eq!(action_enabled(&menu_template(false, true), MENU_NEW_WINDOW), Some(true));
    assert_eq!(action_enabled(&menu_template(false, true), MENU_OPEN_BUILDER), Some(true));
}

#[test]
fn test_mac_template_has_app_menu() {
    let template = menu_template(true, true);
    assert_eq!(template[0].title, WINDOW_TITLE);
    assert!(template[0].entries.contains(&MenuEntry::Predefined(Predefined::Quit)));

    let file = template.iter().find(|s| s.title == "File").unwrap();
    assert!(!file.entries.contains(&MenuEntry::Predefined(Predefined::Quit)));
}

#[test]
fn test_other_platforms_quit_from_file_menu() {
    let template = menu_template(true, false);
    assert_eq!(template[0].title, "File");
    assert!(template[0].entries.contains(&MenuEntry::Predefined(Predefined::Quit)));
}

// ============================================================================
// WINDOWS
// ============================================================================

#[test]
fn test_window_labels_are_unique_and_prefixed() {
    let a = new_window_label();
    let b = new_window_label();
    assert!(a.starts_with(WINDOW_LABEL_PREFIX));
    assert_ne!(a, b);
}

#[test]
fn test_window_url_by_mode() {
    match window_url(&ShellConfig::for_mode(false)).unwrap() {
        WebviewUrl::App(path) => assert_eq!(path, PathBuf::from(APP_ENTRY)),
        other => panic!("expected bundled url, got {:?}", other),
    }
    match window_url(&ShellConfig::for_mode(true)).unwrap() {
        WebviewUrl::External(url) => assert_eq!(url.as_str(), DEV_SERVER_URL),
        other => panic!("expected dev server url, got {:?}", other),
    }
}

#[test]
fn test_invalid_dev_url_is_error() {
    let mut config = ShellConfig::for_mode(true);
    config.dev_server_url = "not a url".to_string();
    assert!(window_url(&config).is_err());
}

#[test]
fn test_fresh_state_has_no_windows() {
    let state: ShellState = ShellState::new(ShellConfig::for_mode(false));
    assert!(state.registry().is_empty());
    assert!(!state.import_enabled());
    assert!(!state.dialog.is_in_flight());
    assert!(!state.attach_allowed("range-unknown"));
}

// ============================================================================
// LAUNCH / OPEN-FILE PATHS
// ============================================================================

#[test]
fn test_launch_paths_keep_range_files_only() {
    let args: Vec<OsString> = vec![
        "--flag".into(),
        "/Users/me/CO open.range".into(),
        "notes.txt".into(),
        "BB.RANGE".into(),
    ];
    assert_eq!(
        launch_paths(args),
        vec![PathBuf::from("/Users/me/CO open.range"), PathBuf::from("BB.RANGE")]
    );
}

#[cfg(unix)]
#[test]
fn test_opened_paths_decode_file_urls() {
    let urls = vec![
        Url::parse("file:///Users/me/BTN%20open.range").unwrap(),
        Url::parse("https://rangeassistant.holdem.tools/r/1").unwrap(),
    ];
    assert_eq!(opened_paths(&urls), vec![PathBuf::from("/Users/me/BTN open.range")]);
}
