use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Which tab becomes active when the active tab is closed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReelectionPolicy {
    /// Tab immediately to the left, else the new first tab.
    LeftNeighbor,
    /// Tab that slid into the closed slot, else the new last tab.
    SameIndex,
    First,
}

impl Default for ReelectionPolicy {
    fn default() -> Self {
        Self::LeftNeighbor
    }
}

impl ReelectionPolicy {
    /// Index into the remaining tabs of the new active tab, given the index
    /// the closed tab used to occupy.
    pub fn elect(self, removed_index: usize, remaining: usize) -> Option<usize> {
        if remaining == 0 {
            return None;
        }
        let idx = match self {
            Self::LeftNeighbor => removed_index.saturating_sub(1),
            Self::SameIndex => removed_index,
            Self::First => 0,
        };
        Some(idx.min(remaining - 1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Leftward displacement (device-independent pixels) a swipe must exceed to close a tab.
    pub swipe_close_threshold: f64,
    pub reelection: ReelectionPolicy,
    pub max_closed_tabs: usize,
    pub activate_on_open: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            swipe_close_threshold: 100.0,
            reelection: ReelectionPolicy::default(),
            max_closed_tabs: 25,
            activate_on_open: true,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("[Settings] Failed to parse settings: {}, returning defaults", e);
                    Self::default()
                }),
                Err(e) => {
                    log::warn!("[Settings] Failed to read file: {}, returning defaults", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp_path = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        // Write to tmp, then rename, so a crash never leaves a half-written file.
        fs::write(&tmp_path, json)?;
        fs::rename(tmp_path, path)?;

        Ok(())
    }
}
