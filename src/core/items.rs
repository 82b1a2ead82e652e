// Tab Items
// Labels and keyed content shown in the tab track

use ratatui::text::Line;

/// A single entry in the tab track
#[derive(Debug, Clone, PartialEq)]
pub enum TabItem {
    /// Plain label; the label doubles as the identity key
    Label(String),
    /// Pre-rendered content with an explicit identity key
    Keyed { key: String, content: Line<'static> },
}

impl TabItem {
    pub fn label(text: impl Into<String>) -> Self {
        TabItem::Label(text.into())
    }

    pub fn keyed(key: impl Into<String>, content: impl Into<Line<'static>>) -> Self {
        TabItem::Keyed {
            key: key.into(),
            content: content.into(),
        }
    }

    /// Identity key used to tell items apart between updates
    pub fn key(&self) -> &str {
        match self {
            TabItem::Label(text) => text,
            TabItem::Keyed { key, .. } => key,
        }
    }
}

impl From<&str> for TabItem {
    fn from(text: &str) -> Self {
        TabItem::Label(text.to_string())
    }
}

impl From<String> for TabItem {
    fn from(text: String) -> Self {
        TabItem::Label(text)
    }
}

/// Keys that appear more than once, in first-seen order
pub fn duplicate_keys(items: &[TabItem]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    let mut duplicates: Vec<&str> = Vec::new();

    for item in items {
        let key = item.key();
        if seen.contains(&key) {
            if !duplicates.contains(&key) {
                duplicates.push(key);
            }
        } else {
            seen.push(key);
        }
    }

    duplicates
}
