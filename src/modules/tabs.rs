// Tab registry module - Pure logic, no I/O.
// Single source of truth for display order and the active tab.

use std::collections::HashMap;

use crate::settings::ReelectionPolicy;
use crate::state::{NewTab, Tab, TabId, TabSnapshot};

/// Ordered tab records plus the active id.
///
/// Every mutation is total: unknown ids, out-of-range indices and attempts to
/// close a non-closable tab degrade to a no-op and report `false`/`None`.
#[derive(Debug, Clone, Default)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
    active_tab_id: Option<TabId>,
    next_id: u64,
    policy: ReelectionPolicy,
}

impl TabRegistry {
    pub fn new(policy: ReelectionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Append a tab and return its fresh id. The first tab in an empty
    /// registry is always made active; otherwise `activate` decides.
    pub fn open(&mut self, tab: NewTab, activate: bool) -> TabId {
        let id = self.allocate_id();
        self.tabs.push(tab.into_tab(id));
        if activate || self.active_tab_id.is_none() {
            self.active_tab_id = Some(id);
        }
        log::info!("[Tabs] Opened {} (total: {})", id, self.tabs.len());
        debug_assert!(self.invariants_hold());
        id
    }

    /// Insert at `index` (clamped to the length) under a fresh id and make it active.
    pub fn insert_at(&mut self, tab: NewTab, index: usize) -> TabId {
        let id = self.allocate_id();
        let clamped = index.min(self.tabs.len());
        self.tabs.insert(clamped, tab.into_tab(id));
        self.active_tab_id = Some(id);
        log::info!("[Tabs] Inserted {} at index {} (total: {})", id, clamped, self.tabs.len());
        debug_assert!(self.invariants_hold());
        id
    }

    fn allocate_id(&mut self) -> TabId {
        self.next_id += 1;
        TabId::new(self.next_id)
    }

    /// Returns true if the active tab changed.
    pub fn activate(&mut self, id: TabId) -> bool {
        if !self.contains(id) {
            log::debug!("[Tabs] Ignoring activation of unknown {}", id);
            return false;
        }
        if self.active_tab_id == Some(id) {
            return false;
        }
        self.active_tab_id = Some(id);
        log::debug!("[Tabs] Activated {}", id);
        true
    }

    /// Remove a closable tab, re-electing the active tab if needed.
    /// Returns the removed record and the index it occupied.
    pub fn close(&mut self, id: TabId) -> Option<(Tab, usize)> {
        let idx = self.index_of(id)?;
        if !self.tabs[idx].closable {
            log::debug!("[Tabs] Refusing to close non-closable {}", id);
            return None;
        }

        let tab = self.tabs.remove(idx);
        if self.active_tab_id == Some(id) {
            self.active_tab_id = self
                .policy
                .elect(idx, self.tabs.len())
                .map(|new_idx| self.tabs[new_idx].id);
        }

        log::info!(
            "[Tabs] Closed {} (index {}), active now {:?}",
            id,
            idx,
            self.active_tab_id
        );
        debug_assert!(self.invariants_hold());
        Some((tab, idx))
    }

    /// Move the tab at `from` to `to`, shifting the tabs in between.
    /// Returns true if the order changed.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.tabs.len();
        if from >= len || to >= len {
            log::debug!("[Tabs] Ignoring reorder {} -> {} (len {})", from, to, len);
            return false;
        }
        if from == to {
            return false;
        }

        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        log::debug!("[Tabs] Moved index {} to {}", from, to);
        debug_assert!(self.invariants_hold());
        true
    }

    /// Rebuild the order from a full list of ids.
    ///
    /// Listed ids come first in the given order, unknown or repeated ids are
    /// skipped, and any tab missing from the list is appended so no record is
    /// lost to a stale order from the presentation layer.
    /// Returns true if the order changed.
    pub fn apply_order(&mut self, new_order: &[TabId]) -> bool {
        if self.tabs.is_empty() || new_order.is_empty() {
            return false;
        }

        let old_order = self.ids();

        let mut tab_map: HashMap<TabId, Tab> = self.tabs.drain(..).map(|t| (t.id, t)).collect();

        let mut reordered = Vec::with_capacity(tab_map.len());
        for id in new_order {
            if let Some(tab) = tab_map.remove(id) {
                reordered.push(tab);
            }
        }

        // Whatever is left keeps its previous relative order.
        for id in &old_order {
            if let Some(tab) = tab_map.remove(id) {
                reordered.push(tab);
            }
        }

        self.tabs = reordered;
        let changed = old_order != self.ids();
        if changed {
            log::debug!("[Tabs] Applied order {:?}", self.ids());
        }
        debug_assert!(self.invariants_hold());
        changed
    }

    pub fn snapshot(&self) -> TabSnapshot {
        TabSnapshot {
            tabs: self.tabs.clone(),
            active_tab_id: self.active_tab_id,
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn ids(&self) -> Vec<TabId> {
        self.tabs.iter().map(|t| t.id).collect()
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.tabs.iter().any(|t| t.id == id)
    }

    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab_id
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.and_then(|id| self.get(id))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_tab_id.and_then(|id| self.index_of(id))
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn policy(&self) -> ReelectionPolicy {
        self.policy
    }

    /// Id of the tab after (`forward`) or before the active one, wrapping around.
    /// With no active tab, forward picks the first tab and backward the last.
    pub fn neighbor_of_active(&self, forward: bool) -> Option<TabId> {
        let len = self.tabs.len();
        if len == 0 {
            return None;
        }
        let idx = match (self.active_index(), forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        Some(self.tabs[idx].id)
    }

    /// No duplicate ids and the active id, if any, refers to a listed tab.
    pub fn invariants_hold(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.tabs.len());
        let unique = self.tabs.iter().all(|t| seen.insert(t.id));
        let active_ok = self.active_tab_id.map_or(true, |id| self.contains(id));
        unique && active_ok
    }
}
