//! Global keyboard shortcut tables.

use super::Command;
use crate::state::MenuId;

/// Alt+letter accelerators for the top-level menus.
pub const ALT_MENUS: [(char, &str); 6] = [
    ('f', "file"),
    ('e', "edit"),
    ('v', "view"),
    ('p', "project"),
    ('t', "tools"),
    ('h', "help"),
];

/// Ctrl+letter accelerators for placeholder actions.
pub const CTRL_COMMANDS: [(char, Command); 8] = [
    ('n', Command::NewProject),
    ('o', Command::OpenProject),
    ('s', Command::SaveProject),
    ('z', Command::Undo),
    ('y', Command::Redo),
    ('x', Command::Cut),
    ('c', Command::Copy),
    ('v', Command::Paste),
];

/// Menu focused by Alt+`key`. Case-insensitive.
pub fn menu_for_alt_key(key: char) -> Option<MenuId> {
    let key = key.to_ascii_lowercase();
    ALT_MENUS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, id)| MenuId::new(*id))
}

/// Command run by Ctrl+`key`. Case-insensitive.
pub fn command_for_ctrl_key(key: char) -> Option<Command> {
    let key = key.to_ascii_lowercase();
    CTRL_COMMANDS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, command)| *command)
}
