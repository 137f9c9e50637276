use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use super::Command;
use crate::state::UiState;

/// A selectable context menu row.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionItem {
    pub label: String,
    pub shortcut: Option<String>,
    pub disabled: bool,
    pub command: Command,
}

/// An entry in a context menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    Separator,
    Item(ActionItem),
}

impl MenuAction {
    pub fn item(label: impl Into<String>, command: Command) -> Self {
        MenuAction::Item(ActionItem {
            label: label.into(),
            shortcut: None,
            disabled: false,
            command,
        })
    }

    /// Set the shortcut hint. No effect on separators.
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        if let MenuAction::Item(item) = &mut self {
            item.shortcut = Some(shortcut.into());
        }
        self
    }

    /// Mark as disabled. No effect on separators.
    pub fn disabled(mut self) -> Self {
        if let MenuAction::Item(item) = &mut self {
            item.disabled = true;
        }
        self
    }

    /// Whether selecting this entry runs something.
    pub fn is_actionable(&self) -> bool {
        matches!(self, MenuAction::Item(item) if !item.disabled)
    }
}

/// Outcome of a click while the context menu is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextClick {
    /// The menu is hidden; the click is not its concern.
    Ignored,
    /// The click landed outside the panel and closed it.
    Outside,
    /// The click hit the border, a separator or a disabled row.
    Inert,
    /// A row was chosen; the menu closed and its command should run.
    Selected(Command),
}

/// Floating action panel shown at the pointer.
#[derive(Debug, Clone, Default)]
pub struct ContextMenu {
    visible: bool,
    position: (u16, u16),
    items: Vec<MenuAction>,
    /// Highlighted row for keyboard navigation.
    selected: Option<usize>,
    /// Final on-screen area, fixed by the first `place` after opening.
    placed: Option<Rect>,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the menu at a cell with a fresh item list.
    ///
    /// Menu bar dropdowns are closed so the two never show together.
    pub fn open(&mut self, x: u16, y: u16, items: Vec<MenuAction>, state: &mut UiState) {
        self.visible = true;
        self.position = (x, y);
        self.items = items;
        self.selected = None;
        self.placed = None;
        state.close_all_menus();
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.items.clear();
        self.selected = None;
        self.placed = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Requested position, before any edge correction.
    pub fn position(&self) -> (u16, u16) {
        self.position
    }

    pub fn items(&self) -> &[MenuAction] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Panel size including its border.
    pub fn size(&self) -> (u16, u16) {
        let widest = self
            .items
            .iter()
            .map(|entry| match entry {
                MenuAction::Separator => 0,
                MenuAction::Item(item) => {
                    let shortcut = item.shortcut.as_deref().map(|s| s.width() + 3).unwrap_or(0);
                    item.label.width() + shortcut
                }
            })
            .max()
            .unwrap_or(0);
        ((widest + 4) as u16, (self.items.len() + 2) as u16)
    }

    /// Fix the panel's area within `viewport`.
    ///
    /// The first call after opening starts at the requested cell and moves
    /// the panel left by its width if it overflows the right edge, and up by
    /// its height if it overflows the bottom. Later calls return the same
    /// area until the menu is opened again.
    pub fn place(&mut self, viewport: Rect) -> Option<Rect> {
        if !self.visible {
            return None;
        }
        if let Some(rect) = self.placed {
            return Some(rect);
        }

        let (x, y) = self.position;
        let (width, height) = self.size();
        let x = if x.saturating_add(width) > viewport.right() {
            x.saturating_sub(width)
        } else {
            x
        };
        let y = if y.saturating_add(height) > viewport.bottom() {
            y.saturating_sub(height)
        } else {
            y
        };

        let rect = Rect::new(x, y, width, height).intersection(viewport);
        self.placed = Some(rect);
        Some(rect)
    }

    /// The placed area, or the unadjusted one if not yet placed.
    pub fn area(&self) -> Option<Rect> {
        if !self.visible {
            return None;
        }
        self.placed.or_else(|| {
            let (width, height) = self.size();
            Some(Rect::new(self.position.0, self.position.1, width, height))
        })
    }

    /// Index of the entry drawn on the given cell.
    pub fn row_at(&self, col: u16, row: u16) -> Option<usize> {
        let area = self.area()?;
        let inside_x = col > area.x && col < area.right().saturating_sub(1);
        let inside_y = row > area.y && row < area.bottom().saturating_sub(1);
        if !inside_x || !inside_y {
            return None;
        }
        let index = (row - area.y - 1) as usize;
        (index < self.items.len()).then_some(index)
    }

    /// Handle a left click.
    pub fn click(&mut self, col: u16, row: u16) -> ContextClick {
        let Some(area) = self.area() else {
            return ContextClick::Ignored;
        };

        let inside = col >= area.x && col < area.right() && row >= area.y && row < area.bottom();
        if !inside {
            self.close();
            return ContextClick::Outside;
        }

        match self.row_at(col, row) {
            Some(index) => self.choose(index),
            None => ContextClick::Inert,
        }
    }

    /// Handle a key. `None` means the menu is hidden or the key is not its
    /// concern; Escape reports `Outside`.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ContextClick> {
        if !self.visible {
            return None;
        }
        match key.code {
            KeyCode::Esc => {
                self.close();
                Some(ContextClick::Outside)
            }
            KeyCode::Down => {
                self.move_selection(true);
                Some(ContextClick::Inert)
            }
            KeyCode::Up => {
                self.move_selection(false);
                Some(ContextClick::Inert)
            }
            KeyCode::Enter => match self.selected {
                Some(index) => Some(self.choose(index)),
                None => Some(ContextClick::Inert),
            },
            _ => None,
        }
    }

    fn choose(&mut self, index: usize) -> ContextClick {
        match self.items.get(index) {
            Some(entry) if entry.is_actionable() => {
                let MenuAction::Item(item) = entry else {
                    return ContextClick::Inert;
                };
                let command = item.command;
                self.close();
                ContextClick::Selected(command)
            }
            _ => ContextClick::Inert,
        }
    }

    /// Step the highlight to the next non-separator entry, wrapping around.
    fn move_selection(&mut self, forward: bool) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let mut index = self.selected.unwrap_or(if forward { len - 1 } else { 0 });
        for _ in 0..len {
            index = if forward {
                (index + 1) % len
            } else {
                index.checked_sub(1).unwrap_or(len - 1)
            };
            if matches!(self.items[index], MenuAction::Item(_)) {
                self.selected = Some(index);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MenuId;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn items() -> Vec<MenuAction> {
        vec![
            MenuAction::item("Cut", Command::ContextCut).with_shortcut("Ctrl+X"),
            MenuAction::item("Copy", Command::ContextCopy).with_shortcut("Ctrl+C"),
            MenuAction::Separator,
            MenuAction::item("Properties", Command::Properties).disabled(),
        ]
    }

    fn open_at(x: u16, y: u16) -> ContextMenu {
        let mut state = UiState::new();
        let mut menu = ContextMenu::new();
        menu.open(x, y, items(), &mut state);
        menu
    }

    #[test]
    fn test_is_actionable() {
        assert!(MenuAction::item("Cut", Command::ContextCut).is_actionable());
        assert!(!MenuAction::item("Cut", Command::ContextCut).disabled().is_actionable());
        assert!(!MenuAction::Separator.is_actionable());
    }

    #[test]
    fn test_hidden_by_default() {
        let mut menu = ContextMenu::new();
        assert!(!menu.is_visible());
        assert!(menu.place(Rect::new(0, 0, 80, 24)).is_none());
        assert_eq!(menu.click(1, 1), ContextClick::Ignored);
        assert!(menu.handle_key(key(KeyCode::Esc)).is_none());
    }

    #[test]
    fn test_open_closes_menu_bar() {
        let mut state = UiState::new();
        state.open_menu(&MenuId::new("file"));

        let mut menu = ContextMenu::new();
        menu.open(10, 5, items(), &mut state);

        assert!(menu.is_visible());
        assert!(state.current_menu().is_none());
    }

    #[test]
    fn test_size() {
        let menu = open_at(0, 0);
        // "Copy" + "   Ctrl+C" is the widest row.
        assert_eq!(menu.size(), (17, 6));
    }

    #[test]
    fn test_place_in_center_keeps_position() {
        let mut menu = open_at(50, 10);
        let rect = menu.place(Rect::new(0, 0, 200, 50)).unwrap();
        assert_eq!((rect.x, rect.y), (50, 10));
    }

    #[test]
    fn test_place_near_edges_flips() {
        let viewport = Rect::new(0, 0, 80, 24);
        let mut menu = open_at(75, 22);
        let rect = menu.place(viewport).unwrap();

        assert_eq!((rect.x, rect.y), (75 - 17, 22 - 6));
        assert!(rect.right() <= viewport.right());
        assert!(rect.bottom() <= viewport.bottom());
        assert_eq!((rect.width, rect.height), (17, 6));
    }

    #[test]
    fn test_place_is_one_shot() {
        let mut menu = open_at(75, 22);
        let first = menu.place(Rect::new(0, 0, 80, 24)).unwrap();
        let second = menu.place(Rect::new(0, 0, 200, 50)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_click_selects_and_closes() {
        let mut menu = open_at(10, 5);
        menu.place(Rect::new(0, 0, 80, 24));

        // Row 0 (Cut) is at y=6, row 1 (Copy) at y=7.
        assert_eq!(menu.click(12, 7), ContextClick::Selected(Command::ContextCopy));
        assert!(!menu.is_visible());
        assert!(menu.items().is_empty());
    }

    #[test]
    fn test_click_disabled_or_separator_stays_open() {
        let mut menu = open_at(10, 5);
        menu.place(Rect::new(0, 0, 80, 24));

        assert_eq!(menu.click(12, 8), ContextClick::Inert);
        assert_eq!(menu.click(12, 9), ContextClick::Inert);
        assert_eq!(menu.click(10, 5), ContextClick::Inert);
        assert!(menu.is_visible());
    }

    #[test]
    fn test_click_outside_closes() {
        let mut menu = open_at(10, 5);
        menu.place(Rect::new(0, 0, 80, 24));

        assert_eq!(menu.click(0, 0), ContextClick::Outside);
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_escape_closes_without_action() {
        let mut menu = open_at(10, 5);
        assert_eq!(menu.handle_key(key(KeyCode::Esc)), Some(ContextClick::Outside));
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_keyboard_navigation_skips_separator() {
        let mut menu = open_at(10, 5);

        menu.handle_key(key(KeyCode::Down));
        assert_eq!(menu.selected(), Some(0));
        menu.handle_key(key(KeyCode::Down));
        menu.handle_key(key(KeyCode::Down));
        assert_eq!(menu.selected(), Some(3));
        menu.handle_key(key(KeyCode::Up));
        assert_eq!(menu.selected(), Some(1));

        assert_eq!(
            menu.handle_key(key(KeyCode::Enter)),
            Some(ContextClick::Selected(Command::ContextCopy))
        );
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_enter_on_disabled_does_nothing() {
        let mut menu = open_at(10, 5);
        menu.handle_key(key(KeyCode::Up));
        assert_eq!(menu.selected(), Some(3));
        assert_eq!(menu.handle_key(key(KeyCode::Enter)), Some(ContextClick::Inert));
        assert!(menu.is_visible());
    }
}
