//! # Page Snapshot
//!
//! The unit of persistence: `{ settings, blocks }`, saved and loaded as a
//! whole. There is no incremental form.

use crate::{Block, Settings, SnapshotError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Snapshot {
    pub fn new(settings: Settings, blocks: Vec<Block>) -> Self {
        Self { settings, blocks }
    }

    /// Fresh page: empty tree, small width
    pub fn new_page(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            settings: Settings::new(title, description),
            blocks: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Page identifier derived from a title: lowercase, each whitespace
/// character replaced by `-`, anything other than letters, digits, `-` and
/// `_` dropped.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageSize;

    #[test]
    fn test_new_page_defaults() {
        let snapshot = Snapshot::new_page("My Portfolio", "About me");
        assert_eq!(snapshot.settings.title, "My Portfolio");
        assert_eq!(snapshot.settings.size, PageSize::Small);
        assert!(snapshot.settings.favicon.is_none());
        assert!(snapshot.blocks.is_empty());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Portfolio"), "my-portfolio");
        assert_eq!(slugify("a  b\tc"), "a--b-c");
        assert_eq!(slugify("plain"), "plain");
        assert_eq!(slugify("Jane's Portfolio"), "janes-portfolio");
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("Café Menu"), "café-menu");
        assert_eq!(slugify("?!"), "");
    }

    #[test]
    fn test_parse_snapshot_json() {
        let json = r#"{
            "settings": { "title": "T", "description": "D", "size": "large", "favicon": "favicon_x.png" },
            "blocks": [
                { "type": "text", "id": "text-0", "content": "Hello", "color": "" },
                { "type": "grid", "id": "grid-1", "size": 2, "color": "", "children": [
                    { "type": "vertical-space", "id": "vertical-space-0", "size": 2, "columnSpan": 2 }
                ]}
            ]
        }"#;

        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.settings.size, PageSize::Large);
        assert_eq!(snapshot.settings.favicon.as_deref(), Some("favicon_x.png"));
        assert_eq!(snapshot.blocks.len(), 2);

        let grid = snapshot.blocks[1].as_grid().unwrap();
        assert_eq!(grid.children[0].column_span(), Some(2));
    }

    #[test]
    fn test_unknown_block_type_is_rejected() {
        let json = r#"{ "settings": {}, "blocks": [ { "type": "video", "id": "v" } ] }"#;
        assert!(Snapshot::from_json(json).is_err());
    }
}
