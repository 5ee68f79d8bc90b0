use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::config::key::{Key, KeyBinding};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub next_view: KeyBinding,
    pub previous_view: KeyBinding,
    pub export: KeyBinding,
    pub copy: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationKeybindings {
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub home: KeyBinding,
    pub end: KeyBinding,
    pub select: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchKeybindings {
    pub toggle: KeyBinding,
    pub exit: KeyBinding,
    pub filter: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableKeybindings {
    pub toggle_select: KeyBinding,
    pub select_all: KeyBinding,
    pub sort: KeyBinding,
    pub next_column: KeyBinding,
    pub previous_column: KeyBinding,
    pub first_page: KeyBinding,
    pub previous_page: KeyBinding,
    pub next_page: KeyBinding,
    pub last_page: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub navigation: NavigationKeybindings,
    pub search: SearchKeybindings,
    pub table: TableKeybindings,
}

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::char('q').into(),
            next_view: Key::new(KeyCode::Tab).into(),
            previous_view: Key::new(KeyCode::BackTab).into(),
            export: Key::char('e').into(),
            copy: Key::char('y').into(),
        }
    }
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: vec![Key::char('k'), Key::new(KeyCode::Up)].into(),
            down: vec![Key::char('j'), Key::new(KeyCode::Down)].into(),
            home: vec![Key::char('g'), Key::new(KeyCode::Home)].into(),
            end: vec![Key::char('G'), Key::new(KeyCode::End)].into(),
            select: Key::new(KeyCode::Enter).into(),
        }
    }
}

impl Default for SearchKeybindings {
    fn default() -> Self {
        Self {
            toggle: Key::char('/').into(),
            exit: Key::new(KeyCode::Esc).into(),
            filter: Key::char('f').into(),
        }
    }
}

impl Default for TableKeybindings {
    fn default() -> Self {
        Self {
            toggle_select: Key::char(' ').into(),
            select_all: Key::char('a').into(),
            sort: Key::char('s').into(),
            next_column: Key::char('>').into(),
            previous_column: Key::char('<').into(),
            first_page: vec![Key::char('['), Key::new(KeyCode::PageUp)].into(),
            previous_page: vec![Key::char('h'), Key::new(KeyCode::Left)].into(),
            next_page: vec![Key::char('l'), Key::new(KeyCode::Right)].into(),
            last_page: vec![Key::char(']'), Key::new(KeyCode::PageDown)].into(),
        }
    }
}
