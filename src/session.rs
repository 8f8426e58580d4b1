// Session façade: raw events in, snapshots out.
// Gestures resolve to intents, intents mutate the registry, and every change
// of the active tab is reconciled with the navigator.

use crate::modules::closed_tabs::{ClosedTab, ClosedTabs};
use crate::modules::gestures::{GestureController, GestureEvent};
use crate::modules::navigation::{Navigator, RouteSynchronizer};
use crate::modules::tabs::TabRegistry;
use crate::settings::Settings;
use crate::state::{Intent, NewTab, TabId, TabSnapshot};

pub struct TabSession<N: Navigator> {
    registry: TabRegistry,
    gestures: GestureController,
    router: RouteSynchronizer,
    closed: ClosedTabs,
    navigator: N,
    activate_on_open: bool,
}

impl<N: Navigator> TabSession<N> {
    pub fn new(settings: &Settings, navigator: N) -> Self {
        Self {
            registry: TabRegistry::new(settings.reelection),
            gestures: GestureController::new(settings.swipe_close_threshold),
            router: RouteSynchronizer::new(),
            closed: ClosedTabs::new(settings.max_closed_tabs),
            navigator,
            activate_on_open: settings.activate_on_open,
        }
    }

    /// Open a tab. If it becomes active the navigator follows it.
    pub fn open(&mut self, tab: NewTab) -> TabId {
        let before = self.registry.active_tab_id();
        let id = self.registry.open(tab, self.activate_on_open);
        if self.registry.active_tab_id() != before {
            self.sync_location();
        }
        id
    }

    /// Apply an intent. Returns true if the snapshot changed.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Activate { id } => {
                let changed = self.registry.activate(id);
                // Even an already-active tab may sit on a stale location.
                if self.registry.contains(id) {
                    self.sync_location();
                }
                changed
            }
            Intent::Close { id } => {
                let before = self.registry.active_tab_id();
                let Some((tab, index)) = self.registry.close(id) else {
                    return false;
                };
                self.closed.archive(ClosedTab::new(tab, index));
                if self.registry.active_tab_id() != before {
                    self.sync_location();
                }
                true
            }
            Intent::Reorder { from, to } => self.registry.reorder(from, to),
        }
    }

    /// Feed a raw drag/touch event. Returns the intent it produced, if any,
    /// after applying it.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Option<Intent> {
        let registry = &self.registry;
        let intent = self
            .gestures
            .handle(event, |id| registry.get(id).map_or(false, |t| t.closable))?;
        self.dispatch(intent);
        Some(intent)
    }

    /// Click on a tab body.
    pub fn click_tab(&mut self, id: TabId) -> bool {
        self.dispatch(Intent::Activate { id })
    }

    /// Click on a tab's close button.
    pub fn click_close(&mut self, id: TabId) -> bool {
        self.dispatch(Intent::Close { id })
    }

    /// Full new order reported by the presentation layer.
    pub fn apply_order(&mut self, order: &[TabId]) -> bool {
        self.registry.apply_order(order)
    }

    pub fn activate_next(&mut self) -> bool {
        match self.registry.neighbor_of_active(true) {
            Some(id) => self.dispatch(Intent::Activate { id }),
            None => false,
        }
    }

    pub fn activate_previous(&mut self) -> bool {
        match self.registry.neighbor_of_active(false) {
            Some(id) => self.dispatch(Intent::Activate { id }),
            None => false,
        }
    }

    /// The external location changed. Activates the matching tab, if any;
    /// never navigates.
    pub fn location_changed(&mut self, location: &str) -> bool {
        self.router
            .on_location_changed(&mut self.registry, location)
            .is_some()
    }

    /// Reopen the most recently closed tab at its former position.
    pub fn reopen_closed(&mut self) -> Option<TabId> {
        let closed = self.closed.pop()?;
        let id = self.registry.insert_at(closed.to_new_tab(), closed.index);
        log::info!("[Tabs] Reopened '{}' as {}", closed.title, id);
        self.sync_location();
        Some(id)
    }

    fn sync_location(&mut self) {
        self.router.on_tab_activated(&self.registry, &mut self.navigator);
    }

    pub fn snapshot(&self) -> TabSnapshot {
        self.registry.snapshot()
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    /// Live swipe displacement for the tab being swiped (never positive).
    pub fn swipe_offset(&self) -> f64 {
        self.gestures.swipe_offset()
    }

    /// Slot that should show the drop indicator during a drag.
    pub fn drop_indicator(&self) -> Option<usize> {
        self.gestures.drag().drag_over_index()
    }

    pub fn closed_tabs(&self) -> &ClosedTabs {
        &self.closed
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::navigation::MemoryNavigator;

    fn session(paths: &[&str]) -> TabSession<MemoryNavigator> {
        let settings = Settings {
            activate_on_open: false,
            ..Settings::default()
        };
        let mut session = TabSession::new(&settings, MemoryNavigator::new(paths[0]));
        for path in paths {
            session.open(NewTab::new(*path, path.trim_start_matches('/')));
        }
        session
    }

    #[test]
    fn test_first_open_on_current_location_does_not_navigate() {
        let session = session(&["/a", "/b"]);
        assert!(session.navigator().history().is_empty());
    }

    #[test]
    fn test_open_with_activation_navigates() {
        let mut session = TabSession::new(&Settings::default(), MemoryNavigator::new("/"));
        session.open(NewTab::new("/a", "a"));
        session.open(NewTab::new("/b", "b"));
        assert_eq!(session.navigator().history(), ["/a", "/b"]);
        assert_eq!(session.snapshot().active_tab().unwrap().path, "/b");
    }

    #[test]
    fn test_click_activate_navigates_once() {
        let mut session = session(&["/a", "/b"]);
        let b = session.registry().ids()[1];

        assert!(session.click_tab(b));
        assert!(!session.location_changed("/b"));
        assert!(!session.click_tab(b));

        assert_eq!(session.navigator().history(), ["/b"]);
    }

    #[test]
    fn test_activate_resyncs_stale_location() {
        let mut session = session(&["/a", "/b"]);
        let a = session.registry().ids()[0];
        session.navigator_mut().set_location("/elsewhere");

        assert!(!session.click_tab(a));
        assert_eq!(session.navigator().history(), ["/a"]);
    }

    #[test]
    fn test_close_active_navigates_to_elected_tab() {
        let mut session = session(&["/a", "/b", "/c"]);
        let ids = session.registry().ids();
        session.click_tab(ids[2]);

        assert!(session.click_close(ids[2]));

        assert_eq!(session.registry().active_tab_id(), Some(ids[1]));
        assert_eq!(session.navigator().current_location(), "/b");
    }

    #[test]
    fn test_closing_last_tab_does_not_navigate() {
        let mut session = session(&["/a"]);
        let a = session.registry().ids()[0];
        assert!(session.click_close(a));
        assert_eq!(session.snapshot().active_tab_id, None);
        assert!(session.navigator().history().is_empty());
    }

    #[test]
    fn test_reopen_restores_position_and_activates() {
        let mut session = session(&["/a", "/b", "/c"]);
        let b = session.registry().ids()[1];
        session.click_close(b);

        let reopened = session.reopen_closed().unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.tabs[1].path, "/b");
        assert_eq!(snapshot.active_tab_id, Some(reopened));
        assert_ne!(reopened, b);
        assert_eq!(session.navigator().current_location(), "/b");
        assert!(session.reopen_closed().is_none());
    }

    #[test]
    fn test_gesture_close_skips_pinned_tab() {
        let mut session = session(&["/a"]);
        let pinned = session.open(NewTab::new("/p", "p").pinned());

        session.handle_gesture(GestureEvent::TouchStart { tab_id: pinned, x: 300.0 });
        session.handle_gesture(GestureEvent::TouchMove { x: 0.0 });
        let intent = session.handle_gesture(GestureEvent::TouchEnd { tab_id: pinned });

        assert_eq!(intent, None);
        assert_eq!(session.registry().len(), 2);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut session = session(&["/a", "/b"]);
        let ids = session.registry().ids();
        assert!(session.activate_previous());
        assert_eq!(session.registry().active_tab_id(), Some(ids[1]));
        assert!(session.activate_next());
        assert_eq!(session.registry().active_tab_id(), Some(ids[0]));
    }
}
