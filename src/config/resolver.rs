use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{GlobalAction, NavAction, SearchAction, TableAction};
use crate::config::key::KeyBinding;
use crate::config::keybindings::KeybindingsConfig;

/// Maps key events to actions using the configured bindings.
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(KeybindingsConfig::default()))
    }
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    fn global(&self, action: GlobalAction) -> &KeyBinding {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => &kb.quit,
            GlobalAction::NextView => &kb.next_view,
            GlobalAction::PreviousView => &kb.previous_view,
            GlobalAction::Export => &kb.export,
            GlobalAction::Copy => &kb.copy,
        }
    }

    fn nav(&self, action: NavAction) -> &KeyBinding {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => &kb.up,
            NavAction::Down => &kb.down,
            NavAction::Home => &kb.home,
            NavAction::End => &kb.end,
            NavAction::Select => &kb.select,
        }
    }

    fn search(&self, action: SearchAction) -> &KeyBinding {
        let kb = &self.keybindings.search;
        match action {
            SearchAction::Toggle => &kb.toggle,
            SearchAction::Exit => &kb.exit,
            SearchAction::Filter => &kb.filter,
        }
    }

    fn table(&self, action: TableAction) -> &KeyBinding {
        let kb = &self.keybindings.table;
        match action {
            TableAction::ToggleSelect => &kb.toggle_select,
            TableAction::SelectAll => &kb.select_all,
            TableAction::Sort => &kb.sort,
            TableAction::NextColumn => &kb.next_column,
            TableAction::PreviousColumn => &kb.previous_column,
            TableAction::FirstPage => &kb.first_page,
            TableAction::PreviousPage => &kb.previous_page,
            TableAction::NextPage => &kb.next_page,
            TableAction::LastPage => &kb.last_page,
        }
    }

    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        self.global(action).matches(event)
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        self.global(action).display()
    }

    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        self.nav(action).matches(event)
    }

    pub fn display_nav(&self, action: NavAction) -> String {
        self.nav(action).display()
    }

    pub fn matches_search(&self, event: &KeyEvent, action: SearchAction) -> bool {
        self.search(action).matches(event)
    }

    pub fn display_search(&self, action: SearchAction) -> String {
        self.search(action).display()
    }

    pub fn matches_table(&self, event: &KeyEvent, action: TableAction) -> bool {
        self.table(action).matches(event)
    }

    pub fn display_table(&self, action: TableAction) -> String {
        self.table(action).display()
    }
}
