use serde::{Deserialize, Serialize};

/// Page-level metadata, persisted next to the block tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub size: PageSize,
    /// Reference to the favicon asset held by the storage backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

/// Width class of the rendered page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl Settings {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            size: PageSize::Small,
            favicon: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new("", "")
    }
}
