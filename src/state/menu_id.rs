use std::fmt;

/// Stable key identifying one menu in the shared UI state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(String);

impl MenuId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an identifier from a display label.
    ///
    /// The label is lower-cased and every run of whitespace becomes a single
    /// hyphen, so "Game Settings" becomes "game-settings". Callers relying on
    /// this must keep labels unique among siblings.
    pub fn from_label(label: &str) -> Self {
        let id = label
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MenuId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for MenuId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MenuId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_single_word() {
        assert_eq!(MenuId::from_label("File"), "file");
    }

    #[test]
    fn test_from_label_collapses_whitespace() {
        assert_eq!(MenuId::from_label("Game  Settings"), "game-settings");
        assert_eq!(MenuId::from_label("Resource Manager"), "resource-manager");
    }

    #[test]
    fn test_explicit_id_is_kept() {
        let id = MenuId::new("file-menu");
        assert_eq!(id.as_str(), "file-menu");
        assert_eq!(id.to_string(), "file-menu");
    }
}
