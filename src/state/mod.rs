//! Shared UI state: which menu is open, the active theme and the shortcut
//! labels shown next to menu entries.
//!
//! The store is an explicit object owned by the application shell and lent
//! to widgets by reference. Every mutation is synchronous and is fanned out
//! to all subscribers before the mutating call returns.

// Part of the store API is only exercised by tests so far.
#![allow(dead_code)]

mod events;
mod menu_id;
mod theme;

pub use events::ActionLog;
pub use menu_id::MenuId;
pub use theme::{StyleSheet, Theme};

use std::collections::BTreeMap;
use std::fmt;

/// Shortcut labels registered at startup, keyed by action name.
pub const DEFAULT_SHORTCUTS: [(&str, &str); 8] = [
    ("newProject", "Ctrl+N"),
    ("openProject", "Ctrl+O"),
    ("saveProject", "Ctrl+S"),
    ("undo", "Ctrl+Z"),
    ("redo", "Ctrl+Y"),
    ("cut", "Ctrl+X"),
    ("copy", "Ctrl+C"),
    ("paste", "Ctrl+V"),
];

/// A change applied to the store, as seen by subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    MenuOpened(MenuId),
    MenuClosed(MenuId),
    AllMenusClosed,
    ThemeChanged(Theme),
    ShortcutChanged { action: String, text: String },
}

/// Handle returned by [`UiState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&StateChange)>;

pub struct UiState {
    /// The open menu, if any. A single slot keeps at most one menu open.
    open_menu: Option<MenuId>,

    theme: Theme,

    shortcuts: BTreeMap<String, String>,

    /// Global style scope written by `set_theme`.
    style: StyleSheet,

    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiState")
            .field("open_menu", &self.open_menu)
            .field("theme", &self.theme)
            .field("shortcuts", &self.shortcuts)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    /// Create the startup state: nothing open, dark theme, default shortcuts.
    ///
    /// The style sheet starts empty; the shell applies the theme when it
    /// mounts.
    pub fn new() -> Self {
        Self {
            open_menu: None,
            theme: Theme::default(),
            shortcuts: DEFAULT_SHORTCUTS
                .iter()
                .map(|(action, text)| (action.to_string(), text.to_string()))
                .collect(),
            style: StyleSheet::default(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Register a callback invoked after every mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&StateChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, change: StateChange) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&change);
        }
    }

    /// The currently open menu.
    pub fn current_menu(&self) -> Option<&MenuId> {
        self.open_menu.as_ref()
    }

    pub fn is_open(&self, id: &MenuId) -> bool {
        self.open_menu.as_ref() == Some(id)
    }

    /// Open a menu. Any other open menu is closed by the same write.
    pub fn open_menu(&mut self, id: &MenuId) {
        self.open_menu = Some(id.clone());
        self.notify(StateChange::MenuOpened(id.clone()));
    }

    /// Close a menu. Closing a menu that is not open changes nothing.
    pub fn close_menu(&mut self, id: &MenuId) {
        if self.is_open(id) {
            self.open_menu = None;
            self.notify(StateChange::MenuClosed(id.clone()));
        }
    }

    pub fn close_all_menus(&mut self) {
        self.open_menu = None;
        self.notify(StateChange::AllMenusClosed);
    }

    pub fn toggle_menu(&mut self, id: &MenuId) {
        if self.is_open(id) {
            self.close_menu(id);
        } else {
            self.open_menu(id);
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch theme and write its palette into the global style sheet.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        for (name, color) in theme.palette() {
            self.style.set_property(name, color);
        }
        self.notify(StateChange::ThemeChanged(theme));
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    pub fn shortcuts(&self) -> &BTreeMap<String, String> {
        &self.shortcuts
    }

    pub fn shortcut(&self, action: &str) -> Option<&str> {
        self.shortcuts.get(action).map(String::as_str)
    }

    pub fn set_shortcut(&mut self, action: impl Into<String>, text: impl Into<String>) {
        let action = action.into();
        let text = text.into();
        self.shortcuts.insert(action.clone(), text.clone());
        self.notify(StateChange::ShortcutChanged { action, text });
    }
}
