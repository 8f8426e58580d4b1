// Gesture module - Pure logic.
// Turns raw drag and touch event sequences into intents. Two independent
// state machines: pointer drag-and-drop and single-finger swipe-to-close.

use serde::{Deserialize, Serialize};

use crate::state::{Intent, TabId};

/// Raw interaction events forwarded by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GestureEvent {
    DragStart { index: usize },
    DragOver { index: usize },
    DragEnd,
    /// Platform drag-cancel (pointer left the window, escape pressed).
    DragCancel,
    TouchStart { tab_id: TabId, x: f64 },
    TouchMove { x: f64 },
    TouchEnd { tab_id: TabId },
    TouchCancel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragSession {
    dragged_index: Option<usize>,
    drag_over_index: Option<usize>,
}

impl DragSession {
    pub fn start(&mut self, index: usize) {
        self.dragged_index = Some(index);
        self.drag_over_index = None;
    }

    pub fn over(&mut self, index: usize) {
        match self.dragged_index {
            Some(dragged) if dragged != index => self.drag_over_index = Some(index),
            _ => {}
        }
    }

    /// Terminal handler: always returns to idle.
    pub fn end(&mut self) -> Option<Intent> {
        let session = std::mem::take(self);
        match (session.dragged_index, session.drag_over_index) {
            (Some(from), Some(to)) if from != to => Some(Intent::Reorder { from, to }),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged_index.is_some()
    }

    pub fn dragged_index(&self) -> Option<usize> {
        self.dragged_index
    }

    /// Slot the drop indicator should be drawn at.
    pub fn drag_over_index(&self) -> Option<usize> {
        self.drag_over_index
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveSwipe {
    tab_id: TabId,
    start_x: f64,
    current_x: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeSession {
    active: Option<ActiveSwipe>,
}

impl SwipeSession {
    /// Starting a swipe abandons any swipe already in flight.
    pub fn start(&mut self, tab_id: TabId, x: f64) {
        self.active = Some(ActiveSwipe {
            tab_id,
            start_x: x,
            current_x: x,
        });
    }

    pub fn move_to(&mut self, x: f64) {
        if let Some(swipe) = self.active.as_mut() {
            swipe.current_x = x;
        }
    }

    /// Terminal handler: always returns to idle. Emits `close` only when the
    /// leftward displacement exceeds `threshold`, the touch ends on the tab it
    /// started on, and that tab is closable.
    pub fn end(&mut self, tab_id: TabId, closable: bool, threshold: f64) -> Option<Intent> {
        let swipe = self.active.take()?;
        let delta = swipe.current_x - swipe.start_x;
        if swipe.tab_id == tab_id && closable && delta < -threshold {
            Some(Intent::Close { id: tab_id })
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn swiping_tab_id(&self) -> Option<TabId> {
        self.active.map(|s| s.tab_id)
    }

    /// Live horizontal offset for visual feedback. Rightward motion clamps to zero.
    pub fn offset(&self) -> f64 {
        self.active
            .map_or(0.0, |s| (s.current_x - s.start_x).min(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureController {
    drag: DragSession,
    swipe: SwipeSession,
    swipe_threshold: f64,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl GestureController {
    pub fn new(swipe_threshold: f64) -> Self {
        Self {
            drag: DragSession::default(),
            swipe: SwipeSession::default(),
            swipe_threshold,
        }
    }

    /// Feed one raw event. `is_closable` answers for the tab a swipe ends on.
    pub fn handle(&mut self, event: GestureEvent, is_closable: impl Fn(TabId) -> bool) -> Option<Intent> {
        let intent = match event {
            GestureEvent::DragStart { index } => {
                self.drag.start(index);
                None
            }
            GestureEvent::DragOver { index } => {
                self.drag.over(index);
                None
            }
            GestureEvent::DragEnd | GestureEvent::DragCancel => self.drag.end(),
            GestureEvent::TouchStart { tab_id, x } => {
                self.swipe.start(tab_id, x);
                None
            }
            GestureEvent::TouchMove { x } => {
                self.swipe.move_to(x);
                None
            }
            GestureEvent::TouchEnd { tab_id } => {
                self.swipe.end(tab_id, is_closable(tab_id), self.swipe_threshold)
            }
            GestureEvent::TouchCancel => {
                self.swipe.cancel();
                None
            }
        };

        if let Some(intent) = intent {
            log::debug!("[Gesture] {:?} -> {:?}", event, intent);
        }
        intent
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn swipe(&self) -> &SwipeSession {
        &self.swipe
    }

    pub fn swipe_offset(&self) -> f64 {
        self.swipe.offset()
    }
}
