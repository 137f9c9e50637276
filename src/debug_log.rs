//! Debug logging for input dispatch and state changes.
//!
//! Enable with the `--debug` flag. Logs are written to `~/.rpgkit/debug.log`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;
use crossterm::event::{KeyEvent, MouseEvent};

use crate::state::StateChange;

/// Global flag to enable/disable debug logging.
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Global log file handle.
static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

/// Initialize the debug logging system.
pub fn init() -> std::io::Result<PathBuf> {
    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(file);
    }
    DEBUG_ENABLED.store(true, Ordering::SeqCst);

    log_raw(&format!("=== Debug Log Started at {} ===\n", timestamp()));

    Ok(log_path)
}

/// Check if debug logging is enabled.
pub fn is_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

fn get_log_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rpgkit")
        .join("debug.log")
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S%.3f").to_string()
}

fn log_raw(msg: &str) {
    if !is_enabled() {
        return;
    }
    if let Ok(mut guard) = LOG_FILE.lock()
        && let Some(ref mut file) = *guard
    {
        let _ = file.write_all(msg.as_bytes());
        let _ = file.flush();
    }
}

fn log_with_category(category: &str, msg: &str) {
    if !is_enabled() {
        return;
    }
    log_raw(&format!("[{}] {} {}\n", timestamp(), category, msg));
}

/// Log a key press as received from the terminal.
pub fn log_key(key: &KeyEvent) {
    if !is_enabled() {
        return;
    }
    log_with_category(
        "KEY",
        &format!("code={:?} modifiers={:?}", key.code, key.modifiers),
    );
}

/// Log a mouse event.
pub fn log_mouse(mouse: &MouseEvent) {
    if !is_enabled() {
        return;
    }
    log_with_category(
        "MOUSE",
        &format!("{:?} at ({},{})", mouse.kind, mouse.column, mouse.row),
    );
}

/// Log a change published by the UI state store.
pub fn log_state_change(change: &StateChange) {
    if !is_enabled() {
        return;
    }
    let msg = match change {
        StateChange::MenuOpened(id) => format!("OPEN {id}"),
        StateChange::MenuClosed(id) => format!("CLOSE {id}"),
        StateChange::AllMenusClosed => "CLOSE_ALL".to_string(),
        StateChange::ThemeChanged(theme) => format!("THEME {theme}"),
        StateChange::ShortcutChanged { action, text } => format!("SHORTCUT {action}={text}"),
    };
    log_with_category("STATE", &msg);
}

/// Log a custom debug message.
pub fn log_debug(msg: &str) {
    if !is_enabled() {
        return;
    }
    log_with_category("DEBUG", msg);
}
