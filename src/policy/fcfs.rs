//! First-Come First-Served.
//!
//! Non-preemptive. The runnable queue is ordered by arrival; processes
//! arriving on the same tick keep their input order. The head runs until
//! its service is exhausted, and only then is the next one dispatched.
//!
//! Since a dispatched process is never interrupted, its wait time is fixed
//! at dispatch (`now - arrival`) and equals its response time.

use std::collections::VecDeque;

use super::{Policy, TickOutcome};
use crate::models::{Event, EventLog, ProcessId, ProcessTable, Tick};

/// First-Come First-Served policy state.
#[derive(Debug, Clone, Default)]
pub struct Fcfs {
    queue: VecDeque<ProcessId>,
    // Whether the queue head has been dispatched.
    running: bool,
}

impl Fcfs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the head if its service is exhausted, recording completion at `now`.
    fn retire_finished(&mut self, now: Tick, table: &mut ProcessTable, log: &mut EventLog) {
        let Some(&head) = self.queue.front() else {
            return;
        };
        if !self.running || !table[head].is_depleted() {
            return;
        }

        let process = &mut table[head];
        process.mark_completed(now);
        log.push(Event::finished(now, process.name.as_str()));

        self.queue.pop_front();
        self.running = false;
    }
}

impl Policy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn admit(&mut self, id: ProcessId, _table: &ProcessTable) {
        self.queue.push_back(id);
    }

    fn tick(&mut self, now: Tick, table: &mut ProcessTable, log: &mut EventLog) -> TickOutcome {
        self.retire_finished(now, table, log);

        let Some(&head) = self.queue.front() else {
            return TickOutcome::Idle;
        };

        if !self.running {
            let process = &mut table[head];
            process.mark_dispatched(now);
            process.wait_time = now - process.arrival;
            log.push(Event::selected(now, process.name.as_str(), process.remaining));
            self.running = true;
        }

        table[head].run_tick();
        TickOutcome::Ran(head)
    }

    fn settle(&mut self, end: Tick, table: &mut ProcessTable, log: &mut EventLog) {
        self.retire_finished(end, table, log);
    }

    fn current(&self) -> Option<ProcessId> {
        if self.running {
            self.queue.front().copied()
        } else {
            None
        }
    }
}
