//! Event signaling capability used to request redraws.

use log::{debug, warn};

/// Event asking the host to redraw the listed elements.
pub const ELEMENTS_CHANGED: &str = "elements.changed";

/// Payload of [`ELEMENTS_CHANGED`]: ids in tree order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementsChanged {
    pub elements: Vec<String>,
}

pub trait EventBus {
    fn fire(&mut self, event: &str, payload: &ElementsChanged);
}

/// Bus that only logs what it is asked to fire.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventBus;

impl EventBus for LogEventBus {
    fn fire(&mut self, event: &str, payload: &ElementsChanged) {
        if payload.elements.is_empty() {
            warn!("{event}: diagram has no elements to redraw");
        } else {
            debug!("{event}: {} elements", payload.elements.len());
        }
    }
}

/// Bus that keeps every fired event, handy for hosts that poll and for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventBus {
    pub fired: Vec<(String, ElementsChanged)>,
}

impl RecordingEventBus {
    pub fn last(&self) -> Option<&(String, ElementsChanged)> {
        self.fired.last()
    }
}

impl EventBus for RecordingEventBus {
    fn fire(&mut self, event: &str, payload: &ElementsChanged) {
        self.fired.push((event.to_string(), payload.clone()));
    }
}
