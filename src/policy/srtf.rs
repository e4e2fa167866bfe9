//! Preemptive Shortest-Remaining-Time-First.
//!
//! On every tick the runnable set is recomputed and the process with the
//! least remaining service runs. The incumbent keeps the processor on ties;
//! a challenger must be strictly shorter to preempt it. Among challengers,
//! the earliest in input order wins.
//!
//! Wait time accrues continuously: every runnable process that is not
//! chosen on a tick gains one tick of wait.

use tracing::trace;

use super::{Policy, TickOutcome};
use crate::models::{Event, EventLog, ProcessId, ProcessTable, Tick};

/// Shortest-Remaining-Time-First policy state.
#[derive(Debug, Clone, Default)]
pub struct Srtf {
    current: Option<ProcessId>,
}

impl Srtf {
    pub fn new() -> Self {
        Self::default()
    }

    fn retire_finished(&mut self, now: Tick, table: &mut ProcessTable, log: &mut EventLog) {
        let Some(id) = self.current else {
            return;
        };
        if !table[id].is_depleted() {
            return;
        }

        let process = &mut table[id];
        process.mark_completed(now);
        log.push(Event::finished(now, process.name.as_str()));
        self.current = None;
    }

    /// Chooses the process to run at `now`, preferring the incumbent on ties.
    fn pick(&self, now: Tick, table: &ProcessTable) -> Option<ProcessId> {
        let mut best = self.current.filter(|&id| table[id].is_runnable(now));
        for id in table.runnable_at(now) {
            match best {
                Some(b) if table[id].remaining >= table[b].remaining => {}
                _ => best = Some(id),
            }
        }
        best
    }
}

impl Policy for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn tick(&mut self, now: Tick, table: &mut ProcessTable, log: &mut EventLog) -> TickOutcome {
        self.retire_finished(now, table, log);

        let Some(chosen) = self.pick(now, table) else {
            self.current = None;
            return TickOutcome::Idle;
        };

        if self.current != Some(chosen) {
            if let Some(prev) = self.current {
                trace!(
                    tick = now,
                    preempted = %table[prev].name,
                    by = %table[chosen].name,
                    "preemption"
                );
            }
            let process = &mut table[chosen];
            process.mark_dispatched(now);
            log.push(Event::selected(now, process.name.as_str(), process.remaining));
            self.current = Some(chosen);
        }

        for id in table.ids() {
            if id != chosen && table[id].is_runnable(now) {
                table[id].wait_time += 1;
            }
        }

        table[chosen].run_tick();
        TickOutcome::Ran(chosen)
    }

    fn settle(&mut self, end: Tick, table: &mut ProcessTable, log: &mut EventLog) {
        self.retire_finished(end, table, log);
    }

    fn current(&self) -> Option<ProcessId> {
        self.current
    }
}
