// Scripted event sequences, replayed headlessly against a `TabSession`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::modules::gestures::GestureEvent;
use crate::modules::navigation::{MemoryNavigator, Navigator};
use crate::session::TabSession;
use crate::settings::Settings;
use crate::state::{NewTab, TabId, TabSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Step {
    Gesture { event: GestureEvent },
    ClickTab { tab_id: TabId },
    ClickClose { tab_id: TabId },
    LocationChange { location: String },
    Open { tab: NewTab },
    ApplyOrder { order: Vec<TabId> },
    ReopenClosed,
    Next,
    Previous,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub tabs: Vec<NewTab>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_location() -> String {
    "/".to_string()
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// What the presentation layer would see after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub step: usize,
    pub changed: bool,
    pub location: String,
    pub swipe_offset: f64,
    pub drop_indicator: Option<usize>,
    #[serde(flatten)]
    pub snapshot: TabSnapshot,
}

pub struct ScenarioRunner {
    session: TabSession<MemoryNavigator>,
}

impl ScenarioRunner {
    /// Build a session at the scenario's location and open its initial tabs.
    pub fn new(scenario: &Scenario, settings: &Settings) -> Self {
        let mut session = TabSession::new(settings, MemoryNavigator::new(scenario.location.clone()));
        for tab in &scenario.tabs {
            session.open(tab.clone());
        }
        Self { session }
    }

    pub fn apply(&mut self, step: &Step) {
        let navigations = self.session.navigator().history().len();

        match step {
            Step::Gesture { event } => {
                self.session.handle_gesture(*event);
            }
            Step::ClickTab { tab_id } => {
                self.session.click_tab(*tab_id);
            }
            Step::ClickClose { tab_id } => {
                self.session.click_close(*tab_id);
            }
            Step::LocationChange { location } => {
                self.session.navigator_mut().set_location(location.clone());
                self.session.location_changed(location);
            }
            Step::Open { tab } => {
                self.session.open(tab.clone());
            }
            Step::ApplyOrder { order } => {
                self.session.apply_order(order);
            }
            Step::ReopenClosed => {
                self.session.reopen_closed();
            }
            Step::Next => {
                self.session.activate_next();
            }
            Step::Previous => {
                self.session.activate_previous();
            }
        }

        // A real shell reports every navigation back as a location change.
        if self.session.navigator().history().len() > navigations {
            let location = self.session.navigator().current_location().to_string();
            self.session.location_changed(&location);
        }
    }

    pub fn run(&mut self, steps: &[Step]) -> Vec<StepReport> {
        let mut reports = Vec::with_capacity(steps.len());
        for (i, step) in steps.iter().enumerate() {
            let before = self.session.snapshot();
            self.apply(step);
            reports.push(self.report(i, before));
        }
        reports
    }

    fn report(&self, step: usize, before: TabSnapshot) -> StepReport {
        let snapshot = self.session.snapshot();
        StepReport {
            step,
            changed: snapshot != before,
            location: self.session.navigator().current_location().to_string(),
            swipe_offset: self.session.swipe_offset(),
            drop_indicator: self.session.drop_indicator(),
            snapshot,
        }
    }

    pub fn session(&self) -> &TabSession<MemoryNavigator> {
        &self.session
    }
}
