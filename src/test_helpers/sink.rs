//! Event sink that records everything it receives.

use std::sync::Mutex;

use crate::events::{EventSink, LogPayload, ProgressPayload, StateChangedPayload};

/// A payload recorded by [`RecordingSink`], in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEvent {
    State(StateChangedPayload),
    Progress(ProgressPayload),
    Log(LogPayload),
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far, in order.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().expect("recording sink poisoned").clone()
    }

    pub fn states(&self) -> Vec<StateChangedPayload> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RecordedEvent::State(payload) => Some(payload),
                _ => None,
            })
            .collect()
    }

    pub fn progresses(&self) -> Vec<ProgressPayload> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RecordedEvent::Progress(payload) => Some(payload),
                _ => None,
            })
            .collect()
    }

    pub fn logs(&self) -> Vec<LogPayload> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RecordedEvent::Log(payload) => Some(payload),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: RecordedEvent) {
        self.events
            .lock()
            .expect("recording sink poisoned")
            .push(event);
    }
}

impl EventSink for RecordingSink {
    fn state_changed(&self, payload: StateChangedPayload) {
        self.push(RecordedEvent::State(payload));
    }

    fn progress(&self, payload: ProgressPayload) {
        self.push(RecordedEvent::Progress(payload));
    }

    fn log(&self, payload: LogPayload) {
        self.push(RecordedEvent::Log(payload));
    }
}
