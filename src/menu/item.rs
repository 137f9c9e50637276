use crossterm::event::{KeyCode, KeyEvent};
use unicode_width::UnicodeWidthStr;

use crate::state::{MenuId, UiState};

/// One row of a dropdown panel. Rows are display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownEntry {
    Row(&'static str),
    Separator,
}

/// A labelled top-level menu that opens a dropdown.
///
/// The item keeps no open flag of its own: whether it is open is read from
/// the shared [`UiState`] under the item's id.
#[derive(Debug, Clone)]
pub struct MenuItem {
    id: MenuId,
    label: String,
    shortcut: Option<String>,
    disabled: bool,
    dropdown: Vec<DropdownEntry>,
}

impl MenuItem {
    pub fn new(id: impl Into<MenuId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            shortcut: None,
            disabled: false,
            dropdown: Vec::new(),
        }
    }

    /// Create an item whose id is derived from its label.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(MenuId::from_label(&label), label)
    }

    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn with_dropdown(mut self, entries: impl IntoIterator<Item = DropdownEntry>) -> Self {
        self.dropdown = entries.into_iter().collect();
        self
    }

    pub fn id(&self) -> &MenuId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn dropdown(&self) -> &[DropdownEntry] {
        &self.dropdown
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Disabled items are left out of the tab order.
    pub fn is_focusable(&self) -> bool {
        !self.disabled
    }

    pub fn is_open(&self, state: &UiState) -> bool {
        state.is_open(&self.id)
    }

    /// Shortcut hint: the explicit one, else the store's entry for this id.
    pub fn shortcut_text<'a>(&'a self, state: &'a UiState) -> Option<&'a str> {
        self.shortcut
            .as_deref()
            .or_else(|| state.shortcut(self.id.as_str()))
    }

    /// Toggle the dropdown, as a click does. Returns false if disabled.
    ///
    /// Opening goes through the store's single open slot, which closes
    /// whichever menu was open before.
    pub fn activate(&self, state: &mut UiState) -> bool {
        if self.disabled {
            return false;
        }
        state.toggle_menu(&self.id);
        true
    }

    /// Handle a key while this item has focus. Returns true if consumed.
    pub fn handle_key(&self, key: KeyEvent, state: &mut UiState) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(state),
            KeyCode::Esc => {
                state.close_menu(&self.id);
                true
            }
            _ => false,
        }
    }

    /// A click landed somewhere outside this item and its dropdown.
    pub fn click_outside(&self, state: &mut UiState) {
        state.close_menu(&self.id);
    }

    /// Cells taken by the label and shortcut hint, without padding.
    pub fn label_width(&self, state: &UiState) -> u16 {
        let shortcut = self
            .shortcut_text(state)
            .map(|s| s.width() + 1)
            .unwrap_or(0);
        (self.label.width() + shortcut) as u16
    }

    /// Size of the dropdown panel including its border.
    pub fn dropdown_size(&self) -> (u16, u16) {
        let widest = self
            .dropdown
            .iter()
            .map(|entry| match entry {
                DropdownEntry::Row(label) => label.width(),
                DropdownEntry::Separator => 0,
            })
            .max()
            .unwrap_or(0);
        // Border plus one cell of padding on each side.
        ((widest + 4) as u16, (self.dropdown.len() + 2) as u16)
    }
}
