use ratatui::layout::Rect;

use super::item::DropdownEntry::{Row, Separator};
use super::item::MenuItem;
use crate::state::{MenuId, UiState};

/// Rows taken by the menu bar at the top of the screen.
pub const MENU_BAR_HEIGHT: u16 = 1;

/// Gap between the left edge of the screen and the first label.
const BAR_INDENT: u16 = 1;

/// The fixed row of top-level menus.
#[derive(Debug, Clone)]
pub struct MenuBar {
    items: Vec<MenuItem>,
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuBar {
    /// The File / Edit / View / Project / Tools / Help bar.
    pub fn new() -> Self {
        Self::with_items(vec![
            MenuItem::new("file", "File").with_dropdown([
                Row("New Project"),
                Row("Open Project"),
                Row("Save Project"),
                Separator,
                Row("Exit"),
            ]),
            MenuItem::new("edit", "Edit").with_dropdown([
                Row("Undo"),
                Row("Redo"),
                Separator,
                Row("Cut"),
                Row("Copy"),
                Row("Paste"),
            ]),
            MenuItem::new("view", "View").with_dropdown([
                Row("Zoom In"),
                Row("Zoom Out"),
                Row("Reset View"),
                Separator,
                Row("Show Grid"),
                Row("Show Rulers"),
            ]),
            MenuItem::new("project", "Project").with_dropdown([
                Row("Database"),
                Row("Characters"),
                Row("Maps"),
                Row("Events"),
                Separator,
                Row("Game Settings"),
            ]),
            MenuItem::new("tools", "Tools").with_dropdown([
                Row("Resource Manager"),
                Row("Script Editor"),
                Row("Map Editor"),
                Row("Animation Editor"),
                Separator,
                Row("Preferences"),
            ]),
            MenuItem::new("help", "Help").with_dropdown([
                Row("Documentation"),
                Row("Tutorial"),
                Row("About"),
            ]),
        ])
    }

    pub fn with_items(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn item(&self, id: &MenuId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Label slots, left to right, on the top row of `screen`.
    pub fn layout(&self, screen: Rect, state: &UiState) -> Vec<(&MenuItem, Rect)> {
        let mut x = screen.x + BAR_INDENT;
        let mut slots = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let width = item.label_width(state) + 2;
            let slot = Rect::new(x, screen.y, width, MENU_BAR_HEIGHT).intersection(screen);
            slots.push((item, slot));
            x = x.saturating_add(width);
        }
        slots
    }

    /// The item whose label is under the cell, if any.
    pub fn item_at(&self, screen: Rect, state: &UiState, col: u16, row: u16) -> Option<&MenuItem> {
        self.layout(screen, state)
            .into_iter()
            .find(|(_, slot)| contains(*slot, col, row))
            .map(|(item, _)| item)
    }

    /// Where the dropdown of `id` sits: under its label, pulled left if it
    /// would run off the right edge.
    pub fn dropdown_rect(&self, screen: Rect, state: &UiState, id: &MenuId) -> Option<Rect> {
        let (item, slot) = self
            .layout(screen, state)
            .into_iter()
            .find(|(item, _)| item.id() == id)?;
        let (width, height) = item.dropdown_size();
        let x = if slot.x + width > screen.right() {
            screen.right().saturating_sub(width).max(screen.x)
        } else {
            slot.x
        };
        Some(Rect::new(x, slot.bottom(), width, height).intersection(screen))
    }

    /// Whether the cell lies on `item`'s label or, when open, its dropdown.
    pub fn item_contains(
        &self,
        screen: Rect,
        state: &UiState,
        item: &MenuItem,
        col: u16,
        row: u16,
    ) -> bool {
        let on_label = self
            .layout(screen, state)
            .iter()
            .any(|(i, slot)| i.id() == item.id() && contains(*slot, col, row));
        let on_dropdown = item.is_open(state)
            && self
                .dropdown_rect(screen, state, item.id())
                .is_some_and(|rect| contains(rect, col, row));
        on_label || on_dropdown
    }

    /// Ids of focusable items in tab order.
    pub fn focus_order(&self) -> impl Iterator<Item = &MenuId> {
        self.items
            .iter()
            .filter(|item| item.is_focusable())
            .map(MenuItem::id)
    }
}

fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.right() && row >= rect.y && row < rect.bottom()
}
