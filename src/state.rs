// Shared state structs to avoid circular dependencies.
// These are used by the registry, the gesture layer and the session façade.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a tab. Assigned once by the registry, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub path: String,
    pub title: String,
    pub closable: bool,
    /// Opaque presentation handle, never inspected here.
    pub icon: Option<String>,
}

/// Everything needed to open a tab; the registry assigns the id.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTab {
    pub path: String,
    pub title: String,
    #[serde(default = "default_closable")]
    pub closable: bool,
    #[serde(default)]
    pub icon: Option<String>,
}

fn default_closable() -> bool {
    true
}

impl NewTab {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            closable: true,
            icon: None,
        }
    }

    pub fn pinned(mut self) -> Self {
        self.closable = false;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub(crate) fn into_tab(self, id: TabId) -> Tab {
        Tab {
            id,
            path: self.path,
            title: self.title,
            closable: self.closable,
            icon: self.icon,
        }
    }
}

/// High-level action derived from raw input and consumed by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    Activate { id: TabId },
    Close { id: TabId },
    Reorder { from: usize, to: usize },
}

/// Immutable view handed to the presentation layer.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabSnapshot {
    pub tabs: Vec<Tab>,
    pub active_tab_id: Option<TabId>,
}

impl TabSnapshot {
    pub fn ids(&self) -> Vec<TabId> {
        self.tabs.iter().map(|t| t.id).collect()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        let id = self.active_tab_id?;
        self.tabs.iter().find(|t| t.id == id)
    }
}
