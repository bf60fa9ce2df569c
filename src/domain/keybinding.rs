use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::borrow::Cow;

use crate::domain::navigation::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    Logout,

    // Navigation
    NextPage,
    PreviousPage,
    GoTo(Page),
    NavigateUp,
    NavigateDown,
    NavigateLeft,
    NavigateRight,

    // Tasks
    NewTask,
    EditTask,
    DeleteTask,
    ToggleStatus,
    Refresh,

    // Calendar
    PreviousMonth,
    NextMonth,
    Today,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub key: KeyEvent,
    pub action: Action,
    pub label: Cow<'static, str>,
    pub key_display: Option<Cow<'static, str>>,
    pub visible_in_bar: bool,
}

impl Keybind {
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            key_display: None,
            visible_in_bar: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }

    /// Overrides how the key is printed in the footer.
    pub fn with_display(mut self, display: impl Into<Cow<'static, str>>) -> Self {
        self.key_display = Some(display.into());
        self
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        // Shift is implied by the character itself.
        let strip = |m: KeyModifiers| {
            if matches!(key.code, KeyCode::Char(_) | KeyCode::BackTab) {
                m.difference(KeyModifiers::SHIFT)
            } else {
                m
            }
        };
        self.key.code == key.code && strip(self.key.modifiers) == strip(key.modifiers)
    }
}

fn plain(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Key to action lookup for the authenticated shell.
#[derive(Debug, Clone)]
pub struct Keymap {
    global: Vec<Keybind>,
    tasks: Vec<Keybind>,
    calendar: Vec<Keybind>,
}

impl Keymap {
    /// Resolves a key pressed on `page`.
    #[must_use]
    pub fn action_for(&self, page: Page, key: &KeyEvent) -> Option<Action> {
        self.page_bindings(page)
            .chain(self.global.iter())
            .find(|binding| binding.matches(key))
            .map(|binding| binding.action)
    }

    /// Bindings shown in the footer for `page`.
    #[must_use]
    pub fn hints(&self, page: Page) -> Vec<Keybind> {
        self.page_bindings(page)
            .chain(self.global.iter())
            .filter(|binding| binding.visible_in_bar)
            .cloned()
            .collect()
    }

    fn page_bindings(&self, page: Page) -> impl Iterator<Item = &Keybind> {
        let specific: &[Keybind] = match page {
            Page::Home => &self.tasks[..1],
            Page::Tasks => &self.tasks,
            Page::Schedule => &self.calendar,
            Page::Achievements => &[],
        };
        specific.iter()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let global = vec![
            Keybind::new(plain(KeyCode::Tab), Action::NextPage, "Next"),
            Keybind::new(plain(KeyCode::BackTab), Action::PreviousPage, "Prev").hidden(),
            Keybind::new(plain(KeyCode::Char('1')), Action::GoTo(Page::Home), "Home").hidden(),
            Keybind::new(plain(KeyCode::Char('2')), Action::GoTo(Page::Tasks), "Tasks").hidden(),
            Keybind::new(
                plain(KeyCode::Char('3')),
                Action::GoTo(Page::Schedule),
                "Calendar",
            )
            .hidden(),
            Keybind::new(
                plain(KeyCode::Char('4')),
                Action::GoTo(Page::Achievements),
                "Achievements",
            )
            .hidden(),
            Keybind::new(plain(KeyCode::Char('r')), Action::Refresh, "Refresh"),
            Keybind::new(plain(KeyCode::Up), Action::NavigateUp, "Up").hidden(),
            Keybind::new(plain(KeyCode::Char('k')), Action::NavigateUp, "Up").hidden(),
            Keybind::new(plain(KeyCode::Down), Action::NavigateDown, "Down").hidden(),
            Keybind::new(plain(KeyCode::Char('j')), Action::NavigateDown, "Down").hidden(),
            Keybind::new(plain(KeyCode::Char('L')), Action::Logout, "Logout"),
            Keybind::new(plain(KeyCode::Char('q')), Action::Quit, "Quit"),
            Keybind::new(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                Action::Quit,
                "Quit",
            )
            .hidden(),
        ];

        let tasks = vec![
            Keybind::new(plain(KeyCode::Char('n')), Action::NewTask, "New"),
            Keybind::new(plain(KeyCode::Char(' ')), Action::ToggleStatus, "Done")
                .with_display("Space"),
            Keybind::new(plain(KeyCode::Char('x')), Action::ToggleStatus, "Done").hidden(),
            Keybind::new(plain(KeyCode::Char('e')), Action::EditTask, "Edit"),
            Keybind::new(plain(KeyCode::Char('d')), Action::DeleteTask, "Delete"),
        ];

        let calendar = vec![
            Keybind::new(plain(KeyCode::Left), Action::NavigateLeft, "Day").with_display("←→"),
            Keybind::new(plain(KeyCode::Char('h')), Action::NavigateLeft, "Day").hidden(),
            Keybind::new(plain(KeyCode::Right), Action::NavigateRight, "Day").hidden(),
            Keybind::new(plain(KeyCode::Char('l')), Action::NavigateRight, "Day").hidden(),
            Keybind::new(plain(KeyCode::Char('[')), Action::PreviousMonth, "Month")
                .with_display("[ ]"),
            Keybind::new(plain(KeyCode::Char(']')), Action::NextMonth, "Month").hidden(),
            Keybind::new(plain(KeyCode::Char('t')), Action::Today, "Today"),
        ];

        Self {
            global,
            tasks,
            calendar,
        }
    }
}
