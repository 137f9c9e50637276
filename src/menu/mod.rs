// Builder and accessor methods not yet used by the shell.
#![allow(dead_code)]

mod bar;
mod command;
mod context;
mod item;
mod keymap;

pub use bar::{MENU_BAR_HEIGHT, MenuBar};
pub use command::Command;
pub use context::{ContextClick, ContextMenu, MenuAction};
pub use item::DropdownEntry;
pub use keymap::{command_for_ctrl_key, menu_for_alt_key};
