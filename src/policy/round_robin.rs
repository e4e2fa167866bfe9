//! Round-Robin with a fixed quantum.
//!
//! Runnable processes wait in a FIFO queue. The head is dispatched with a
//! fresh slice of `quantum` ticks; when the slice runs out before the
//! process finishes, it goes back to the tail of the queue, behind any
//! process that arrived on the same tick.
//!
//! Wait time is derived at completion as `turnaround - burst`: a finished
//! process spent every non-running tick since arrival waiting.

use std::collections::VecDeque;

use tracing::trace;

use super::{Policy, TickOutcome};
use crate::models::{Event, EventLog, ProcessId, ProcessTable, Tick};

/// Round-Robin policy state.
#[derive(Debug, Clone)]
pub struct RoundRobin {
    quantum: Tick,
    queue: VecDeque<ProcessId>,
    current: Option<ProcessId>,
    // Ticks left in the current process's slice.
    slice_left: Tick,
}

impl RoundRobin {
    pub fn new(quantum: Tick) -> Self {
        Self {
            quantum,
            queue: VecDeque::new(),
            current: None,
            slice_left: 0,
        }
    }

    pub fn quantum(&self) -> Tick {
        self.quantum
    }

    fn retire_finished(&mut self, now: Tick, table: &mut ProcessTable, log: &mut EventLog) -> bool {
        let Some(id) = self.current else {
            return false;
        };
        if !table[id].is_depleted() {
            return false;
        }

        let process = &mut table[id];
        let turnaround = process.mark_completed(now);
        process.wait_time = turnaround.saturating_sub(process.burst);
        log.push(Event::finished(now, process.name.as_str()));

        self.current = None;
        self.slice_left = 0;
        true
    }

    /// Returns an unfinished process whose slice has expired to the queue tail.
    fn requeue_expired(&mut self, now: Tick, table: &ProcessTable) {
        if self.slice_left > 0 {
            return;
        }
        if let Some(id) = self.current.take() {
            trace!(tick = now, process = %table[id].name, "quantum expired");
            self.queue.push_back(id);
        }
    }
}

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn admit(&mut self, id: ProcessId, _table: &ProcessTable) {
        self.queue.push_back(id);
    }

    fn tick(&mut self, now: Tick, table: &mut ProcessTable, log: &mut EventLog) -> TickOutcome {
        if !self.retire_finished(now, table, log) {
            self.requeue_expired(now, table);
        }

        if self.current.is_none() {
            let Some(next) = self.queue.pop_front() else {
                return TickOutcome::Idle;
            };
            let process = &mut table[next];
            process.mark_dispatched(now);
            log.push(Event::selected(now, process.name.as_str(), process.remaining));
            self.current = Some(next);
            self.slice_left = self.quantum;
        }

        let Some(id) = self.current else {
            return TickOutcome::Idle;
        };
        table[id].run_tick();
        self.slice_left -= 1;
        TickOutcome::Ran(id)
    }

    fn settle(&mut self, end: Tick, table: &mut ProcessTable, log: &mut EventLog) {
        self.retire_finished(end, table, log);
    }

    fn current(&self) -> Option<ProcessId> {
        self.current
    }
}
