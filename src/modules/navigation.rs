// Pure navigation logic - the external location is reached only through `Navigator`.
// Binds the active tab to the navigation location in both directions.

use url::Url;

use crate::modules::tabs::TabRegistry;
use crate::state::TabId;

/// The navigation collaborator that owns the current location.
pub trait Navigator {
    fn current_location(&self) -> &str;
    fn navigate(&mut self, path: &str);
}

/// Comparable key for a location.
///
/// Absolute URLs are normalized by the `url` parser (so `https://a.com` and
/// `https://a.com/` compare equal). Plain paths lose a trailing `/` unless
/// they are the root.
pub fn normalize_location(location: &str) -> String {
    let trimmed = location.trim();
    if trimmed.contains("://") {
        if let Ok(u) = Url::parse(trimmed) {
            return u.to_string();
        }
    }
    match trimmed.trim_end_matches('/') {
        "" if trimmed.starts_with('/') => "/".to_string(),
        stripped => stripped.to_string(),
    }
}

pub fn same_location(a: &str, b: &str) -> bool {
    normalize_location(a) == normalize_location(b)
}

/// One-directional reconciliation triggered by whichever side changed.
/// Both directions compare against current state before acting, which keeps
/// a navigation caused by activation from activating anything again.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteSynchronizer;

impl RouteSynchronizer {
    pub fn new() -> Self {
        Self
    }

    /// External location changed: activate the matching tab, if any.
    /// Returns the newly activated id.
    pub fn on_location_changed(&self, registry: &mut TabRegistry, location: &str) -> Option<TabId> {
        let key = normalize_location(location);
        // Paths are not unique; an active tab already on this location wins.
        if registry
            .active_tab()
            .is_some_and(|t| normalize_location(&t.path) == key)
        {
            return None;
        }
        let id = registry
            .tabs()
            .iter()
            .find(|t| normalize_location(&t.path) == key)
            .map(|t| t.id);

        let Some(id) = id else {
            log::debug!("[Route] No tab for location {}", location);
            return None;
        };
        if registry.active_tab_id() == Some(id) {
            return None;
        }
        registry.activate(id);
        log::debug!("[Route] Location {} activated {}", location, id);
        Some(id)
    }

    /// The active tab changed: navigate to it unless the location already matches.
    /// Returns true if a navigation was requested.
    pub fn on_tab_activated(&self, registry: &TabRegistry, navigator: &mut dyn Navigator) -> bool {
        let Some(tab) = registry.active_tab() else {
            return false;
        };
        if same_location(&tab.path, navigator.current_location()) {
            return false;
        }
        log::debug!("[Route] {} requests navigation to {}", tab.id, tab.path);
        navigator.navigate(&tab.path);
        true
    }
}

/// In-memory navigator: keeps the current location and every navigation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryNavigator {
    location: String,
    history: Vec<String>,
}

impl MemoryNavigator {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            history: Vec::new(),
        }
    }

    /// Paths passed to `navigate`, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Change the location without recording a navigation (e.g. the user
    /// followed a link or used the back button).
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }
}

impl Navigator for MemoryNavigator {
    fn current_location(&self) -> &str {
        &self.location
    }

    fn navigate(&mut self, path: &str) {
        self.location = path.to_string();
        self.history.push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ReelectionPolicy;
    use crate::state::NewTab;
    use rstest::rstest;

    #[rstest]
    #[case("/inbox", "/inbox")]
    #[case("/inbox/", "/inbox")]
    #[case("  /inbox  ", "/inbox")]
    #[case("/", "/")]
    #[case("//", "/")]
    #[case("", "")]
    #[case("https://example.com", "https://example.com/")]
    #[case("https://example.com/path?query=1", "https://example.com/path?query=1")]
    #[case("inbox/", "inbox")]
    fn test_normalize_location(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_location(input), expected);
    }

    fn registry() -> TabRegistry {
        let mut registry = TabRegistry::new(ReelectionPolicy::LeftNeighbor);
        registry.open(NewTab::new("/inbox", "Inbox"), true);
        registry.open(NewTab::new("/drafts", "Drafts"), false);
        registry
    }

    #[test]
    fn test_location_change_activates_matching_tab() {
        let mut registry = registry();
        let drafts = registry.ids()[1];

        let activated = RouteSynchronizer::new().on_location_changed(&mut registry, "/drafts/");

        assert_eq!(activated, Some(drafts));
        assert_eq!(registry.active_tab_id(), Some(drafts));
    }

    #[test]
    fn test_location_change_without_match_keeps_active() {
        let mut registry = registry();
        let before = registry.active_tab_id();
        assert_eq!(RouteSynchronizer::new().on_location_changed(&mut registry, "/settings"), None);
        assert_eq!(registry.active_tab_id(), before);
    }

    #[test]
    fn test_location_change_to_active_tab_is_noop() {
        let mut registry = registry();
        assert_eq!(RouteSynchronizer::new().on_location_changed(&mut registry, "/inbox"), None);
    }

    #[test]
    fn test_location_change_keeps_active_tab_sharing_path() {
        let mut registry = registry();
        registry.open(NewTab::new("/drafts", "Drafts copy"), false);
        let copy = registry.ids()[2];
        registry.activate(copy);

        let activated = RouteSynchronizer::new().on_location_changed(&mut registry, "/drafts");

        assert_eq!(activated, None);
        assert_eq!(registry.active_tab_id(), Some(copy));
    }

    #[test]
    fn test_activation_navigates() {
        let mut registry = registry();
        let mut nav = MemoryNavigator::new("/inbox");
        registry.activate(registry.ids()[1]);

        assert!(RouteSynchronizer::new().on_tab_activated(&registry, &mut nav));
        assert_eq!(nav.history(), ["/drafts"]);
        assert_eq!(nav.current_location(), "/drafts");
    }

    #[test]
    fn test_activation_of_current_location_does_not_navigate() {
        let registry = registry();
        let mut nav = MemoryNavigator::new("/inbox/");
        assert!(!RouteSynchronizer::new().on_tab_activated(&registry, &mut nav));
        assert!(nav.history().is_empty());
    }

    #[test]
    fn test_activation_on_empty_registry_does_not_navigate() {
        let registry = TabRegistry::default();
        let mut nav = MemoryNavigator::new("/");
        assert!(!RouteSynchronizer::new().on_tab_activated(&registry, &mut nav));
    }

    #[test]
    fn test_round_trip_settles() {
        let mut registry = registry();
        let mut nav = MemoryNavigator::new("/inbox");
        let sync = RouteSynchronizer::new();

        registry.activate(registry.ids()[1]);
        sync.on_tab_activated(&registry, &mut nav);
        // The platform echoes the navigation back as a location change.
        let echoed = nav.current_location().to_string();
        assert_eq!(sync.on_location_changed(&mut registry, &echoed), None);
        assert!(!sync.on_tab_activated(&registry, &mut nav));
        assert_eq!(nav.history().len(), 1);
    }
}
