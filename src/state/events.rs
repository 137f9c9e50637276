use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::Theme;

/// Action log file name.
pub const ACTIONS_FILE: &str = "actions.log";

/// Types of events that can be logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// The shell started.
    Started,
    /// A placeholder action was invoked.
    Action,
    /// The theme was switched.
    ThemeChanged,
    /// An error occurred.
    Error,
}

/// A single event in the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Event {
    pub fn new(event_type: EventType) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Append-only log of what the user triggered.
///
/// Menu actions have no behavior yet beyond being recorded here.
#[derive(Debug, Clone)]
pub struct ActionLog {
    log_path: Option<PathBuf>,
}

impl ActionLog {
    /// Create a log writing to `actions.log` inside `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            log_path: Some(dir.as_ref().join(ACTIONS_FILE)),
        }
    }

    /// A log that records nothing.
    pub fn disabled() -> Self {
        Self { log_path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Append an event to the log file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn log(&self, event: Event) -> std::io::Result<()> {
        let Some(log_path) = &self.log_path else {
            return Ok(());
        };

        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let mut writer = BufWriter::new(file);

        // Format: timestamp | event_type | details
        let details = event.details.as_deref().unwrap_or("-");
        let event_str = serde_json::to_value(&event.event_type)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{:?}", event.event_type).to_lowercase());

        writeln!(
            writer,
            "{} | {} | {}",
            event.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            event_str,
            details
        )?;

        writer.flush()
    }

    pub fn log_started(&self, version: &str) {
        let event = Event::new(EventType::Started).with_details(version);
        let _ = self.log(event);
    }

    /// Log an invoked placeholder action.
    pub fn log_action(&self, description: &str) {
        let event = Event::new(EventType::Action).with_details(description);
        let _ = self.log(event);
    }

    pub fn log_theme_changed(&self, theme: Theme) {
        let event = Event::new(EventType::ThemeChanged).with_details(theme.to_string());
        let _ = self.log(event);
    }

    pub fn log_error(&self, error: &str) {
        let event = Event::new(EventType::Error).with_details(error);
        let _ = self.log(event);
    }
}
