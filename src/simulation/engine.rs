//! Tick-driven simulation loop.
//!
//! # Algorithm
//!
//! For each tick `t` in `0..run_time`:
//! 1. Log and admit every process with `arrival == t` (input order).
//! 2. Let the policy pick or continue a process and apply one tick of service.
//! 3. Log an idle marker if the policy found nothing runnable.
//!
//! After the last tick the policy settles any completion that happened on
//! that tick. The run always takes exactly `run_time` iterations, whether or
//! not every process finished.

use serde::Serialize;
use tracing::{debug, info, info_span, trace};

use super::SimulationConfig;
use crate::error::SimulationError;
use crate::metrics::MetricsReport;
use crate::models::{Event, EventKind, EventLog, Process, ProcessId, ProcessTable, Tick};
use crate::policy::{Policy, PolicyKind, TickOutcome};
use crate::validation::validate_processes;

/// Runs a complete simulation.
///
/// Takes ownership of the process list and returns it, updated, inside the
/// outcome. Configuration and process records are validated first; nothing
/// runs if either is invalid.
///
/// # Example
///
/// ```
/// use u_cpusched::models::Process;
/// use u_cpusched::simulation::{simulate, SimulationConfig};
///
/// let processes = vec![Process::new("A", 0, 3), Process::new("B", 1, 2)];
/// let outcome = simulate(processes, &SimulationConfig::fcfs(6)).unwrap();
///
/// let b = outcome.process("B").unwrap();
/// assert_eq!(b.completion_time, Some(5));
/// assert_eq!(b.wait_time, 2);
/// ```
pub fn simulate(
    processes: Vec<Process>,
    config: &SimulationConfig,
) -> Result<SimulationOutcome, SimulationError> {
    Ok(Simulator::new(processes, config)?.run())
}

/// Step-wise simulation driver.
///
/// Owns the process arena, the policy instance and the event log for the
/// duration of one run. Use [`simulate`] unless you need to observe the
/// state between ticks.
#[derive(Debug)]
pub struct Simulator {
    config: SimulationConfig,
    table: ProcessTable,
    policy: Box<dyn Policy>,
    log: EventLog,
    timeline: Vec<Option<ProcessId>>,
    // Ids sorted by arrival (stable); `arrival_cursor` marks the next arrival.
    arrival_order: Vec<ProcessId>,
    arrival_cursor: usize,
    now: Tick,
}

impl Simulator {
    /// Validates inputs and prepares a run starting at tick 0.
    pub fn new(processes: Vec<Process>, config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        validate_processes(&processes).map_err(SimulationError::InvalidProcesses)?;

        let table = ProcessTable::new(processes);
        let mut arrival_order: Vec<ProcessId> = table.ids().collect();
        arrival_order.sort_by_key(|&id| table[id].arrival);

        Ok(Self {
            config: *config,
            policy: config.policy.instantiate(),
            table,
            log: EventLog::new(),
            timeline: Vec::new(),
            arrival_order,
            arrival_cursor: 0,
            now: 0,
        })
    }

    /// Current tick (the next one to be simulated).
    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn is_done(&self) -> bool {
        self.now >= self.config.run_time
    }

    pub fn processes(&self) -> &ProcessTable {
        &self.table
    }

    pub fn events(&self) -> &EventLog {
        &self.log
    }

    /// Process holding the processor after the last simulated tick.
    pub fn running(&self) -> Option<&Process> {
        self.policy.current().map(|id| &self.table[id])
    }

    /// Simulates one tick. Returns `None` once the run length is exhausted.
    pub fn step(&mut self) -> Option<TickOutcome> {
        if self.is_done() {
            return None;
        }
        let now = self.now;

        self.admit_arrivals(now);

        let outcome = self.policy.tick(now, &mut self.table, &mut self.log);
        match outcome {
            TickOutcome::Ran(id) => {
                trace!(tick = now, process = %self.table[id].name, remaining = self.table[id].remaining, "ran");
                self.timeline.push(Some(id));
            }
            TickOutcome::Idle => {
                trace!(tick = now, "idle");
                self.log.push(Event::idle(now));
                self.timeline.push(None);
            }
        }

        self.now += 1;
        Some(outcome)
    }

    /// Runs the remaining ticks and returns the outcome.
    pub fn run(mut self) -> SimulationOutcome {
        let span = info_span!(
            "simulate",
            policy = self.policy.name(),
            run_time = self.config.run_time,
            processes = self.table.len()
        );
        let _guard = span.enter();

        while self.step().is_some() {}
        self.finish()
    }

    fn admit_arrivals(&mut self, now: Tick) {
        // `arrival_order` is sorted, so arrivals at `now` are contiguous.
        while let Some(&id) = self.arrival_order.get(self.arrival_cursor) {
            let arrival = self.table[id].arrival;
            if arrival > now {
                break;
            }
            self.arrival_cursor += 1;
            if arrival < now {
                continue;
            }
            let process = &self.table[id];
            self.log
                .push(Event::arrived(now, process.name.as_str(), process.burst));
            self.policy.admit(id, &self.table);
        }
    }

    fn finish(mut self) -> SimulationOutcome {
        let end = self.config.run_time;
        self.policy.settle(end, &mut self.table, &mut self.log);

        let completed = self.table.iter().filter(|(_, p)| p.is_complete()).count();
        let pending = self.table.len() - completed;
        info!(
            completed,
            pending,
            dispatches = self.log.count(EventKind::Selected),
            "simulation finished"
        );
        if pending > 0 {
            debug!(pending, end, "run ended with unfinished processes");
        }

        SimulationOutcome {
            policy: self.config.policy,
            run_time: end,
            events: self.log,
            processes: self.table.into_processes(),
            timeline: self.timeline,
        }
    }
}

/// Result of a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutcome {
    /// Policy that drove the run.
    pub policy: PolicyKind,
    /// Number of simulated ticks.
    pub run_time: Tick,
    /// Chronological event log.
    pub events: EventLog,
    /// Final process records, in input order.
    pub processes: Vec<Process>,
    /// Process that ran on each tick (`None` = idle), indexed by tick.
    pub timeline: Vec<Option<ProcessId>>,
}

impl SimulationOutcome {
    /// Finds a process by name.
    pub fn process(&self, name: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.name == name)
    }

    /// Process that ran on `tick`, if any.
    pub fn running_at(&self, tick: Tick) -> Option<&Process> {
        let slot = usize::try_from(tick).ok()?;
        self.timeline
            .get(slot)
            .copied()
            .flatten()
            .and_then(|id| self.processes.get(id.0))
    }

    /// Ticks on which some process ran.
    pub fn busy_ticks(&self) -> Tick {
        self.timeline.iter().filter(|slot| slot.is_some()).count() as Tick
    }

    /// Ticks on which nothing was runnable.
    pub fn idle_ticks(&self) -> Tick {
        self.timeline.iter().filter(|slot| slot.is_none()).count() as Tick
    }

    /// Whether every process completed within the run.
    pub fn all_completed(&self) -> bool {
        self.processes.iter().all(Process::is_complete)
    }

    /// Per-process metrics and summary KPIs.
    pub fn metrics(&self) -> MetricsReport {
        MetricsReport::calculate(self)
    }
}
