//! FILENAME: app/src-tauri/src/menu.rs
// PURPOSE: Application menu - template, install, and click dispatch.
// CONTEXT: The template is plain data so the "Open Range" enabled state can be
//          checked without a native menu. It is rebuilt and reinstalled every
//          time a window is created (import on) or the last one closes (import off).

use tauri::menu::{Menu, MenuEvent, MenuItem, PredefinedMenuItem, Submenu};
use tauri::{AppHandle, Manager, Runtime};

use crate::config::WINDOW_TITLE;
use crate::dialog::show_open_file_dialog;
use crate::navigation::open_external;
use crate::window::create_app_window;
use crate::{log_debug, log_error, ShellState};

pub const MENU_OPEN_RANGE: &str = "open-range";
pub const MENU_NEW_WINDOW: &str = "new-window";
pub const MENU_OPEN_BUILDER: &str = "open-builder";

// ============================================================================
// TEMPLATE
// ============================================================================

/// Platform-provided items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predefined {
    About,
    Hide,
    HideOthers,
    ShowAll,
    Quit,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Minimize,
    CloseWindow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Action {
        id: &'static str,
        label: &'static str,
        accelerator: Option<&'static str>,
        enabled: bool,
    },
    Separator,
    Predefined(Predefined),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    pub title: &'static str,
    pub entries: Vec<MenuEntry>,
}

fn action(id: &'static str, label: &'static str, accelerator: Option<&'static str>, enabled: bool) -> MenuEntry {
    MenuEntry::Action { id, label, accelerator, enabled }
}

/// Menu layout. `mac_app_menu` adds the macOS application submenu and moves
/// Quit there.
pub fn menu_template(import_enabled: bool, mac_app_menu: bool) -> Vec<MenuSection> {
    let mut sections = Vec::new();

    if mac_app_menu {
        sections.push(MenuSection {
            title: WINDOW_TITLE,
            entries: vec![
                MenuEntry::Predefined(Predefined::About),
                MenuEntry::Separator,
                MenuEntry::Predefined(Predefined::Hide),
                MenuEntry::Predefined(Predefined::HideOthers),
                MenuEntry::Predefined(Predefined::ShowAll),
                MenuEntry::Separator,
                MenuEntry::Predefined(Predefined::Quit),
            ],
        });
    }

    let mut file = vec![
        action(MENU_OPEN_RANGE, "Open Range…", Some("CmdOrCtrl+O"), import_enabled),
        action(MENU_NEW_WINDOW, "New Window", Some("CmdOrCtrl+N"), true),
        MenuEntry::Separator,
        MenuEntry::Predefined(Predefined::CloseWindow),
    ];
    if !mac_app_menu {
        file.push(MenuEntry::Predefined(Predefined::Quit));
    }
    sections.push(MenuSection { title: "File", entries: file });

    sections.push(MenuSection {
        title: "Edit",
        entries: vec![
            MenuEntry::Predefined(Predefined::Undo),
            MenuEntry::Predefined(Predefined::Redo),
            MenuEntry::Separator,
            MenuEntry::Predefined(Predefined::Cut),
            MenuEntry::Predefined(Predefined::Copy),
            MenuEntry::Predefined(Predefined::Paste),
            MenuEntry::Predefined(Predefined::SelectAll),
        ],
    });

    sections.push(MenuSection {
        title: "Window",
        entries: vec![
            MenuEntry::Predefined(Predefined::Minimize),
            MenuEntry::Predefined(Predefined::CloseWindow),
        ],
    });

    sections.push(MenuSection {
        title: "Help",
        entries: vec![action(MENU_OPEN_BUILDER, "Range Builder", None, true)],
    });

    sections
}

/// Enabled state of the action `id`, if the template has it.
pub fn action_enabled(template: &[MenuSection], id: &str) -> Option<bool> {
    template
        .iter()
        .flat_map(|section| section.entries.iter())
        .find_map(|entry| match entry {
            MenuEntry::Action { id: entry_id, enabled, .. } if *entry_id == id => Some(*enabled),
            _ => None,
        })
}

// ============================================================================
// NATIVE MENU
// ============================================================================

fn predefined_item<R: Runtime>(app: &AppHandle<R>, item: Predefined) -> tauri::Result<PredefinedMenuItem<R>> {
    match item {
        Predefined::About => PredefinedMenuItem::about(app, None, None),
        Predefined::Hide => PredefinedMenuItem::hide(app, None),
        Predefined::HideOthers => PredefinedMenuItem::hide_others(app, None),
        Predefined::ShowAll => PredefinedMenuItem::show_all(app, None),
        Predefined::Quit => PredefinedMenuItem::quit(app, None),
        Predefined::Undo => PredefinedMenuItem::undo(app, None),
        Predefined::Redo => PredefinedMenuItem::redo(app, None),
        Predefined::Cut => PredefinedMenuItem::cut(app, None),
        Predefined::Copy => PredefinedMenuItem::copy(app, None),
        Predefined::Paste => PredefinedMenuItem::paste(app, None),
        Predefined::SelectAll => PredefinedMenuItem::select_all(app, None),
        Predefined::Minimize => PredefinedMenuItem::minimize(app, None),
        Predefined::CloseWindow => PredefinedMenuItem::close_window(app, None),
    }
}

pub fn build_menu<R: Runtime>(app: &AppHandle<R>, template: &[MenuSection]) -> tauri::Result<Menu<R>> {
    let menu = Menu::new(app)?;
    for section in template {
        let submenu = Submenu::new(app, section.title, true)?;
        for entry in &section.entries {
            match entry {
                MenuEntry::Action { id, label, accelerator, enabled } => {
                    let item = MenuItem::with_id(app, *id, *label, *enabled, *accelerator)?;
                    submenu.append(&item)?;
                }
                MenuEntry::Separator => submenu.append(&PredefinedMenuItem::separator(app)?)?,
                MenuEntry::Predefined(kind) => submenu.append(&predefined_item(app, *kind)?)?,
            }
        }
        menu.append(&submenu)?;
    }
    Ok(menu)
}

/// Record `import_enabled` and, when it changed, rebuild the template and
/// install it as the application menu.
pub fn set_menu<R: Runtime>(app: &AppHandle<R>, import_enabled: bool) {
    let previous = app.state::<ShellState<R>>().set_import_enabled(import_enabled);
    if previous == import_enabled {
        return;
    }
    let template = menu_template(import_enabled, cfg!(target_os = "macos"));
    match build_menu(app, &template).and_then(|menu| app.set_menu(menu)) {
        Ok(_) => log_debug!("MENU", "menu installed, import_enabled={}", import_enabled),
        Err(e) => log_error!("MENU", "menu install failed: {}", e),
    }
}

pub fn handle_menu_event(app: &AppHandle, event: MenuEvent) {
    match event.id().as_ref() {
        MENU_OPEN_RANGE => show_open_file_dialog(app),
        MENU_NEW_WINDOW => {
            if let Err(e) = create_app_window(app) {
                log_error!("MENU", "New Window failed: {}", e);
            }
        }
        MENU_OPEN_BUILDER => {
            let url = app.state::<ShellState>().config.builder_url.clone();
            open_external(app, &url);
        }
        _ => {}
    }
}
