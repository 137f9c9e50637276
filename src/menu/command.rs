/// Placeholder actions the shell can invoke.
///
/// None of these do real work yet; dispatching one records it in the action
/// log and shows it on the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NewProject,
    OpenProject,
    SaveProject,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    ContextCut,
    ContextCopy,
    ContextPaste,
    SelectAll,
    Properties,
}

impl Command {
    /// Message recorded when the command runs.
    pub fn describe(self) -> &'static str {
        match self {
            Command::NewProject => "New Project",
            Command::OpenProject => "Open Project",
            Command::SaveProject => "Save Project",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Cut => "Cut",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::ContextCut => "Context Cut",
            Command::ContextCopy => "Context Copy",
            Command::ContextPaste => "Context Paste",
            Command::SelectAll => "Select All",
            Command::Properties => "Properties",
        }
    }
}
