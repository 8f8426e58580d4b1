use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{NewTab, Tab};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTab {
    pub path: String,
    pub title: String,
    pub closable: bool,
    pub icon: Option<String>,
    /// Display index the tab occupied when it was closed.
    pub index: usize,
    pub closed_at: DateTime<Utc>,
}

impl ClosedTab {
    pub fn new(tab: Tab, index: usize) -> Self {
        Self {
            path: tab.path,
            title: tab.title,
            closable: tab.closable,
            icon: tab.icon,
            index,
            closed_at: Utc::now(),
        }
    }

    pub fn to_new_tab(&self) -> NewTab {
        NewTab {
            path: self.path.clone(),
            title: self.title.clone(),
            closable: self.closable,
            icon: self.icon.clone(),
        }
    }
}

/// Bounded stack of recently closed tabs. Oldest entries are evicted first,
/// reopening takes the most recent.
#[derive(Debug, Clone)]
pub struct ClosedTabs {
    tabs: VecDeque<ClosedTab>,
    capacity: usize,
}

impl ClosedTabs {
    pub fn new(capacity: usize) -> Self {
        Self {
            tabs: VecDeque::new(),
            capacity,
        }
    }

    pub fn archive(&mut self, tab: ClosedTab) {
        if self.capacity == 0 {
            return;
        }
        log::debug!("[ClosedTabs] Archived '{}' at {}", tab.title, tab.path);
        self.tabs.push_back(tab);
        while self.tabs.len() > self.capacity {
            self.tabs.pop_front();
        }
    }

    pub fn pop(&mut self) -> Option<ClosedTab> {
        let tab = self.tabs.pop_back();
        if let Some(ref t) = tab {
            log::debug!("[ClosedTabs] Restoring '{}' at {}", t.title, t.path);
        }
        tab
    }

    pub fn peek(&self) -> Option<&ClosedTab> {
        self.tabs.back()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
