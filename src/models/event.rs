//! Event log model.
//!
//! An append-only, chronologically ordered record of what the processor
//! did on each tick. Within a tick, arrivals come first; the active policy
//! appends finish/selection events after them, and the loop appends idle
//! markers last.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Tick;

/// Classification of a logged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A process became eligible to run.
    Arrived,
    /// A process was dispatched onto the processor.
    Selected,
    /// A process's completion was observed.
    Finished,
    /// Nothing was runnable on this tick.
    Idle,
}

impl EventKind {
    /// Label used in rendered tables.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Arrived => "arrived",
            Self::Selected => "selected",
            Self::Finished => "finished",
            Self::Idle => "idle",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Tick the event is stamped with.
    pub tick: Tick,
    /// Process involved (`None` for idle ticks).
    pub process: Option<String>,
    /// What happened.
    pub kind: EventKind,
    /// Service time left at the moment of the event, where meaningful.
    pub burst_left: Option<Tick>,
}

impl Event {
    pub fn arrived(tick: Tick, process: impl Into<String>, burst: Tick) -> Self {
        Self {
            tick,
            process: Some(process.into()),
            kind: EventKind::Arrived,
            burst_left: Some(burst),
        }
    }

    pub fn selected(tick: Tick, process: impl Into<String>, remaining: Tick) -> Self {
        Self {
            tick,
            process: Some(process.into()),
            kind: EventKind::Selected,
            burst_left: Some(remaining),
        }
    }

    pub fn finished(tick: Tick, process: impl Into<String>) -> Self {
        Self {
            tick,
            process: Some(process.into()),
            kind: EventKind::Finished,
            burst_left: None,
        }
    }

    pub fn idle(tick: Tick) -> Self {
        Self {
            tick,
            process: None,
            kind: EventKind::Idle,
            burst_left: None,
        }
    }

    /// Whether this event refers to the named process.
    pub fn is_for(&self, name: &str) -> bool {
        self.process.as_deref() == Some(name)
    }
}

/// Append-only event log of a simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event. Ticks must be non-decreasing.
    pub fn push(&mut self, event: Event) {
        debug_assert!(
            self.events.last().map_or(true, |last| last.tick <= event.tick),
            "event log must stay in tick order"
        );
        tracing::debug!(
            tick = event.tick,
            process = event.process.as_deref().unwrap_or(""),
            kind = %event.kind,
            "event"
        );
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// Events of the given kind, in log order.
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// Events for the named process, in log order.
    pub fn for_process<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.is_for(name))
    }

    /// Events stamped with `tick`, in log order.
    pub fn at_tick(&self, tick: Tick) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.tick == tick)
    }

    /// Number of events of the given kind.
    pub fn count(&self, kind: EventKind) -> usize {
        self.of_kind(kind).count()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> EventLog {
        let mut log = EventLog::new();
        log.push(Event::arrived(0, "A", 3));
        log.push(Event::selected(0, "A", 3));
        log.push(Event::arrived(1, "B", 2));
        log.push(Event::finished(3, "A"));
        log.push(Event::selected(3, "B", 2));
        log.push(Event::idle(5));
        log
    }

    #[test]
    fn test_log_queries() {
        let log = sample_log();
        assert_eq!(log.len(), 6);
        assert_eq!(log.count(EventKind::Arrived), 2);
        assert_eq!(log.count(EventKind::Idle), 1);
        assert_eq!(log.for_process("A").count(), 3);
        assert_eq!(log.at_tick(3).count(), 2);
    }

    #[test]
    fn test_idle_has_no_process() {
        let e = Event::idle(4);
        assert_eq!(e.process, None);
        assert_eq!(e.burst_left, None);
        assert!(!e.is_for(""));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(EventKind::Arrived.to_string(), "arrived");
        assert_eq!(EventKind::Idle.label(), "idle");
    }

    #[test]
    fn test_serialize_event() {
        let json = serde_json::to_value(Event::selected(2, "B", 1)).unwrap();
        assert_eq!(json["kind"], "selected");
        assert_eq!(json["process"], "B");
        assert_eq!(json["burst_left"], 1);
    }
}
